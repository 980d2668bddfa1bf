use crate::constants::attribute;
use crate::context::RequestContext;
use crate::request_type::CorsRequestType;

/// Annotates a request with its CORS classification for downstream handlers.
pub trait RequestTagger: Send + Sync {
    fn tag(&self, request: &mut RequestContext<'_>, request_type: CorsRequestType);
}

/// Tags requests through [`RequestContext::attributes`] using the `cors.*` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeTagger;

impl RequestTagger for AttributeTagger {
    fn tag(&self, request: &mut RequestContext<'_>, request_type: CorsRequestType) {
        let origin = request.origin.unwrap_or_default();
        let request_headers = request.access_control_request_headers.unwrap_or_default();

        request.set_attribute(
            attribute::IS_CORS_REQUEST,
            request_type.is_cors().to_string(),
        );
        match request_type {
            CorsRequestType::Actual => {
                request.set_attribute(attribute::REQUEST_ORIGIN, origin);
                request.set_attribute(attribute::REQUEST_TYPE, request_type.label());
            }
            CorsRequestType::Preflight => {
                request.set_attribute(attribute::REQUEST_ORIGIN, origin);
                request.set_attribute(attribute::REQUEST_TYPE, request_type.label());
                request.set_attribute(attribute::REQUEST_HEADERS, request_headers);
            }
            CorsRequestType::Other => {}
        }
    }
}

#[cfg(test)]
#[path = "tagger_test.rs"]
mod tagger_test;
