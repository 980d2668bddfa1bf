use crate::constants::method;
use crate::error::{ManagementError, ValidationError};
use crate::util::is_http_token;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

static DEFAULT_CONFIGURATION: Lazy<CorsConfiguration> = Lazy::new(CorsConfiguration::default);

/// Effective CORS settings of one tenant.
///
/// Only `tag_requests` and `allow_generic_http_requests` drive the valve itself;
/// the remaining fields are read by the header-negotiation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfiguration {
    pub allow_generic_http_requests: bool,
    pub allow_any_origin: bool,
    pub allowed_origins: Vec<String>,
    pub allow_subdomains: bool,
    pub supported_methods: Vec<String>,
    pub support_any_header: bool,
    pub supported_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub supports_credentials: bool,
    /// Seconds, `-1` to omit `Access-Control-Max-Age`.
    pub max_age: i64,
    pub tag_requests: bool,
}

impl Default for CorsConfiguration {
    fn default() -> Self {
        Self {
            allow_generic_http_requests: true,
            allow_any_origin: false,
            allowed_origins: Vec::new(),
            allow_subdomains: false,
            supported_methods: vec![
                method::GET.into(),
                method::POST.into(),
                method::HEAD.into(),
                method::OPTIONS.into(),
            ],
            support_any_header: true,
            supported_headers: Vec::new(),
            exposed_headers: Vec::new(),
            supports_credentials: false,
            max_age: 3600,
            tag_requests: false,
        }
    }
}

impl CorsConfiguration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(invalid) = self
            .supported_methods
            .iter()
            .find(|value| !is_http_token(value))
        {
            return Err(ValidationError::InvalidMethod(invalid.clone()));
        }

        if let Some(invalid) = self
            .supported_headers
            .iter()
            .chain(self.exposed_headers.iter())
            .find(|value| !is_http_token(value))
        {
            return Err(ValidationError::InvalidHeaderName(invalid.clone()));
        }

        if self.max_age < -1 {
            return Err(ValidationError::InvalidMaxAge(self.max_age));
        }

        Ok(())
    }
}

/// Per-tenant CORS policy store.
pub trait CorsManager: Send + Sync {
    /// Returns the configuration for `tenant_domain`, or the platform default when `None`.
    fn get_cors_configuration(
        &self,
        tenant_domain: Option<&str>,
    ) -> Result<CorsConfiguration, ManagementError>;
}

/// In-memory policy store with a fallback for tenants without their own entry.
#[derive(Debug, Clone)]
pub struct StaticCorsManager {
    fallback: CorsConfiguration,
    tenants: IndexMap<String, CorsConfiguration>,
}

impl Default for StaticCorsManager {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_CONFIGURATION.clone(),
            tenants: IndexMap::new(),
        }
    }
}

impl StaticCorsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: CorsConfiguration) -> Result<Self, ValidationError> {
        fallback.validate()?;
        Ok(Self {
            fallback,
            tenants: IndexMap::new(),
        })
    }

    pub fn insert<S: Into<String>>(
        &mut self,
        tenant_domain: S,
        configuration: CorsConfiguration,
    ) -> Result<(), ValidationError> {
        configuration.validate()?;
        self.tenants.insert(tenant_domain.into(), configuration);
        Ok(())
    }

    pub fn tenants(&self) -> impl Iterator<Item = &str> {
        self.tenants.keys().map(String::as_str)
    }
}

impl CorsManager for StaticCorsManager {
    fn get_cors_configuration(
        &self,
        tenant_domain: Option<&str>,
    ) -> Result<CorsConfiguration, ManagementError> {
        let configuration = tenant_domain
            .and_then(|domain| self.tenants.get(domain))
            .unwrap_or(&self.fallback);
        Ok(configuration.clone())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
