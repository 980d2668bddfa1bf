pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
}

pub mod content_type {
    pub const TEXT_PLAIN: &str = "text/plain";
    pub const APPLICATION_JSON: &str = "application/json";
    pub const UTF_8: &str = "UTF-8";
}

pub mod status {
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Request attribute keys written by [`crate::AttributeTagger`].
pub mod attribute {
    pub const IS_CORS_REQUEST: &str = "cors.isCorsRequest";
    pub const REQUEST_ORIGIN: &str = "cors.request.origin";
    pub const REQUEST_TYPE: &str = "cors.request.type";
    pub const REQUEST_HEADERS: &str = "cors.request.headers";
}

/// Prefix of every plain-text error body written by the valve.
pub const MESSAGE_PREFIX: &str = "CORS Valve: ";
