use crate::constants::method;
use crate::context::RequestContext;
use std::fmt;

/// Kind of cross-origin request detected for an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorsRequestType {
    /// Simple or actual cross-origin request carrying an `Origin` header.
    Actual,
    /// `OPTIONS` request announcing the real request through `Access-Control-Request-Method`.
    Preflight,
    /// Anything else, including requests that are not cross-origin at all.
    Other,
}

impl CorsRequestType {
    pub fn label(self) -> &'static str {
        match self {
            CorsRequestType::Actual => "actual",
            CorsRequestType::Preflight => "preflight",
            CorsRequestType::Other => "other",
        }
    }

    pub fn is_cors(self) -> bool {
        !matches!(self, CorsRequestType::Other)
    }
}

impl fmt::Display for CorsRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a request with the default classifier.
pub fn classify(request: &RequestContext<'_>) -> CorsRequestType {
    RequestClassifier::default().classify(request)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestClassifier {
    /// Treat a non-preflight request whose `Origin` equals `<scheme>://<Host>` as OTHER.
    pub same_origin_is_other: bool,
}

impl RequestClassifier {
    pub fn classify(&self, request: &RequestContext<'_>) -> CorsRequestType {
        if request.method.eq_ignore_ascii_case(method::OPTIONS)
            && request.access_control_request_method.is_some()
        {
            return CorsRequestType::Preflight;
        }

        let Some(origin) = request.origin else {
            return CorsRequestType::Other;
        };

        if self.same_origin_is_other && Self::is_same_origin(request, origin) {
            return CorsRequestType::Other;
        }

        CorsRequestType::Actual
    }

    fn is_same_origin(request: &RequestContext<'_>, origin: &str) -> bool {
        let Some(host) = request.host else {
            return false;
        };
        origin
            .strip_prefix(request.scheme)
            .and_then(|rest| rest.strip_prefix("://"))
            .is_some_and(|authority| authority == host)
    }
}

#[cfg(test)]
#[path = "request_type_test.rs"]
mod request_type_test;
