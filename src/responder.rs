//! Error bodies written by the valve.
//!
//! CORS failures are rendered as a single `text/plain` line rather than a container
//! error page so that XHR debugging tools can read the cause directly.

use crate::constants::{MESSAGE_PREFIX, content_type};
use crate::error::{CorsError, TenantError};
use crate::response::Response;
use serde::Serialize;
use std::fmt::Write as _;
use std::io;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TenantErrorBody<'a> {
    code: u16,
    message: &'a str,
    description: &'a str,
}

/// Writes `CORS Valve: <message>` with the error's status code.
pub fn write_cors_error(error: &CorsError, response: &mut Response) -> io::Result<()> {
    let status = error.status_code();
    response.set_status(status);
    response.reset_buffer();
    response.set_content_type(content_type::TEXT_PLAIN);
    writeln!(response, "{MESSAGE_PREFIX}{error}").map_err(io::Error::other)?;

    debug!(status, error = %error, "CORS valve error when intercepting an HTTP request");
    Ok(())
}

/// Writes the JSON body for a failed tenant check.
pub fn write_tenant_error(error: &TenantError, response: &mut Response) -> io::Result<()> {
    let code = error.status_code();
    let message = error.message();

    response.set_content_type(content_type::APPLICATION_JSON);
    response.set_status(code);
    response.set_character_encoding(content_type::UTF_8);

    let body = serde_json::to_string(&TenantErrorBody {
        code,
        message: &message,
        description: &message,
    })?;
    response.write_str(&body).map_err(io::Error::other)?;
    Ok(())
}

#[cfg(test)]
#[path = "responder_test.rs"]
mod responder_test;
