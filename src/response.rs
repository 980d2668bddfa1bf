use crate::headers::HeaderCollection;
use std::fmt;

/// Response buffer owned by the host for the duration of one request.
///
/// The valve and the header-negotiation stages write through it; the host
/// flushes it once the valve returns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    status: Option<u16>,
    content_type: Option<String>,
    character_encoding: Option<String>,
    headers: HeaderCollection,
    body: String,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn set_content_type<S: Into<String>>(&mut self, content_type: S) {
        self.content_type = Some(content_type.into());
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_character_encoding<S: Into<String>>(&mut self, encoding: S) {
        self.character_encoding = Some(encoding.into());
    }

    pub fn character_encoding(&self) -> Option<&str> {
        self.character_encoding.as_deref()
    }

    /// Value for the `Content-Type` header, including the charset when one is set.
    pub fn content_type_header(&self) -> Option<String> {
        let content_type = self.content_type.as_deref()?;
        Some(match self.character_encoding.as_deref() {
            Some(encoding) => format!("{content_type};charset={encoding}"),
            None => content_type.to_string(),
        })
    }

    pub fn set_header<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.set(name, value);
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    /// Discards buffered body content. Status and headers are kept.
    pub fn reset_buffer(&mut self) {
        self.body.clear();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// True once anything observable has been written.
    pub fn is_written(&self) -> bool {
        self.status.is_some() || !self.body.is_empty() || !self.headers.is_empty()
    }
}

impl fmt::Write for Response {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.body.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;
