use indexmap::IndexMap;

/// Attributes attached to a request while it travels through the valve.
pub type Attributes = IndexMap<String, String>;

/// Request view handed to the valve by the host transport.
///
/// Header fields are `Some` when the header is present, even with an empty value.
/// `tenant_domain` is resolved by the host once per request and threaded explicitly.
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub scheme: &'a str,
    pub host: Option<&'a str>,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub tenant_domain: Option<&'a str>,
    pub attributes: Attributes,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str) -> Self {
        Self {
            method,
            scheme: "https",
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(name.into(), value.into());
    }
}
