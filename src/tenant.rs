use crate::error::{TenantError, TenantStoreError};
use crate::responder::write_tenant_error;
use crate::response::Response;
use crate::util::is_blank;
use std::io;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::debug;

pub type TenantId = i32;

/// Marker the tenant directory puts in runtime errors caused by an unknown domain.
pub const INVALID_TENANT_DOMAIN_MARKER: &str = "Invalid tenant domain";

/// Tenant directory consulted before any CORS processing.
pub trait TenantManager: Send + Sync {
    fn get_tenant_id(&self, tenant_domain: &str) -> Result<TenantId, TenantStoreError>;

    fn is_tenant_active(&self, tenant_id: TenantId) -> Result<bool, TenantStoreError>;
}

/// Maps a tenant directory failure to the error reported to the caller.
///
/// Runtime errors are told apart by message text only: a message containing
/// [`INVALID_TENANT_DOMAIN_MARKER`] means the domain is unknown (404), anything else
/// is an infrastructure failure (500). User store errors always mean 404.
pub fn classify_lookup_failure(tenant_domain: &str, error: &TenantStoreError) -> TenantError {
    let domain = tenant_domain.to_string();
    match error {
        TenantStoreError::UserStore(_) => TenantError::Inactive { domain },
        TenantStoreError::Runtime(message)
            if !is_blank(message) && message.contains(INVALID_TENANT_DOMAIN_MARKER) =>
        {
            TenantError::Inactive { domain }
        }
        TenantStoreError::Runtime(_) => TenantError::LookupFailure { domain },
    }
}

#[derive(Clone)]
pub struct TenantValidator {
    tenant_manager: Arc<dyn TenantManager>,
}

impl TenantValidator {
    pub fn new(tenant_manager: Arc<dyn TenantManager>) -> Self {
        Self { tenant_manager }
    }

    /// Confirms the tenant is active. Requests without a tenant domain pass.
    pub fn check(&self, tenant_domain: Option<&str>) -> Result<(), TenantError> {
        let Some(domain) = tenant_domain.filter(|domain| !domain.is_empty()) else {
            return Ok(());
        };

        let active = self
            .tenant_manager
            .get_tenant_id(domain)
            .and_then(|tenant_id| self.tenant_manager.is_tenant_active(tenant_id))
            .map_err(|error| {
                debug!(
                    tenant_domain = domain,
                    error = %error,
                    "Error occurred while validating tenant domain"
                );
                classify_lookup_failure(domain, &error)
            })?;

        if active {
            Ok(())
        } else {
            Err(TenantError::Inactive {
                domain: domain.to_string(),
            })
        }
    }

    /// Runs [`check`](Self::check) and writes the JSON error response on failure.
    ///
    /// `Break` tells the caller to stop processing; the response is already complete.
    pub fn validate(
        &self,
        tenant_domain: Option<&str>,
        response: &mut Response,
    ) -> io::Result<ControlFlow<TenantError>> {
        match self.check(tenant_domain) {
            Ok(()) => Ok(ControlFlow::Continue(())),
            Err(error) => {
                write_tenant_error(&error, response)?;
                Ok(ControlFlow::Break(error))
            }
        }
    }
}

#[cfg(test)]
#[path = "tenant_test.rs"]
mod tenant_test;
