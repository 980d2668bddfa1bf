pub mod constants;
mod config;
mod context;
mod error;
mod headers;
mod options;
mod request_type;
mod responder;
mod response;
mod tagger;
mod tenant;
mod util;
mod valve;

pub use config::{CorsConfiguration, CorsManager, StaticCorsManager};
pub use context::{Attributes, RequestContext};
pub use error::{CorsError, ManagementError, TenantError, TenantStoreError, ValidationError};
pub use headers::HeaderCollection;
pub use options::{ManagementErrorPolicy, ValveOptions};
pub use request_type::{CorsRequestType, RequestClassifier, classify};
pub use responder::{write_cors_error, write_tenant_error};
pub use response::Response;
pub use tagger::{AttributeTagger, RequestTagger};
pub use tenant::{
    INVALID_TENANT_DOMAIN_MARKER, TenantId, TenantManager, TenantValidator,
    classify_lookup_failure,
};
pub use valve::{CorsRequestHandler, CorsValve, Next, ValveOutcome, ValveServices};
