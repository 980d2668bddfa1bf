use indexmap::IndexMap;

/// Response headers in insertion order, keyed by the name as first written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: IndexMap<String, String>,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any value stored under a case-insensitive match.
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                if let Some((_, existing)) = self.headers.get_index_mut(index) {
                    *existing = value;
                }
            }
            None => {
                self.headers.insert(name, value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|index| self.headers.get_index(index))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers
            .keys()
            .position(|existing| existing.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
