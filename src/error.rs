use crate::constants::status;
use thiserror::Error;

/// CORS-domain failures rendered as plain-text responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorsError {
    #[error("CORS origin denied")]
    OriginDenied,
    #[error("Unsupported HTTP method")]
    UnsupportedMethod,
    #[error("Unsupported HTTP request header")]
    UnsupportedRequestHeader,
    #[error("Invalid simple/actual CORS request")]
    InvalidActualRequest,
    #[error("Invalid preflight CORS request")]
    InvalidPreflightRequest,
    #[error("Invalid preflight CORS request: Missing Access-Control-Request-Method header")]
    MissingRequestMethodHeader,
    #[error("Generic HTTP requests not allowed")]
    GenericHttpNotAllowed,
    /// Failure reported by a header-negotiation stage with its own status and message.
    #[error("{message}")]
    Other { status: u16, message: String },
}

impl CorsError {
    pub fn other<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Other {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            CorsError::OriginDenied => 403,
            CorsError::UnsupportedMethod => 405,
            CorsError::UnsupportedRequestHeader => 403,
            CorsError::InvalidActualRequest => 400,
            CorsError::InvalidPreflightRequest => 400,
            CorsError::MissingRequestMethodHeader => 400,
            CorsError::GenericHttpNotAllowed => 403,
            CorsError::Other { status, .. } => *status,
        }
    }
}

/// Outcome of a failed tenant check, rendered as a JSON response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenantError {
    #[error("invalid tenant domain : {domain}")]
    Inactive { domain: String },
    #[error("Error occurred while validating tenant domain: {domain}")]
    LookupFailure { domain: String },
}

impl TenantError {
    pub fn status_code(&self) -> u16 {
        match self {
            TenantError::Inactive { .. } => status::NOT_FOUND,
            TenantError::LookupFailure { .. } => status::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn domain(&self) -> &str {
        match self {
            TenantError::Inactive { domain } | TenantError::LookupFailure { domain } => domain,
        }
    }
}

/// Errors raised by the tenant directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenantStoreError {
    #[error("user store error: {0}")]
    UserStore(String),
    #[error("{0}")]
    Runtime(String),
}

/// Failure of the CORS policy store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("CORS management service error: {message}")]
pub struct ManagementError {
    pub message: String,
}

impl ManagementError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur when validating valve options or CORS configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("management error status must be a 5xx code, got {0}")]
    ManagementStatusOutOfRange(u16),
    #[error("`{0}` is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("`{0}` is not a valid HTTP header name")]
    InvalidHeaderName(String),
    #[error("max age must be -1 or greater, got {0}")]
    InvalidMaxAge(i64),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
