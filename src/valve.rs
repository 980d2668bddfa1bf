use crate::config::{CorsConfiguration, CorsManager};
use crate::context::RequestContext;
use crate::error::{CorsError, ManagementError, ValidationError};
use crate::options::{ManagementErrorPolicy, ValveOptions};
use crate::request_type::CorsRequestType;
use crate::responder::write_cors_error;
use crate::response::Response;
use crate::tagger::{AttributeTagger, RequestTagger};
use crate::tenant::{TenantManager, TenantValidator};
use std::io;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, error, trace};

const CONFIGURATION_UNAVAILABLE: &str = "Error occurred while retrieving CORS configuration";

/// Header negotiation for cross-origin requests.
pub trait CorsRequestHandler: Send + Sync {
    /// Adds the CORS response headers for an actual request, or rejects it.
    fn handle_actual(
        &self,
        request: &RequestContext<'_>,
        configuration: &CorsConfiguration,
        response: &mut Response,
    ) -> Result<(), CorsError>;

    /// Produces the complete preflight response, or rejects the request.
    fn handle_preflight(
        &self,
        request: &RequestContext<'_>,
        configuration: &CorsConfiguration,
        response: &mut Response,
    ) -> Result<(), CorsError>;
}

/// Downstream request-processing chain.
pub trait Next {
    fn invoke(&mut self, request: &RequestContext<'_>, response: &mut Response) -> io::Result<()>;
}

/// How one invocation of the valve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveOutcome {
    /// Passed to the downstream chain.
    Forwarded,
    /// Answered by the preflight stage; never forwarded.
    Handled,
    /// Generic HTTP request refused by tenant policy.
    Denied,
    /// An error response was written.
    Errored,
    /// Policy store failed and nothing was written.
    Dropped,
}

/// Collaborators injected into a [`CorsValve`].
#[derive(Clone)]
pub struct ValveServices {
    pub tenant_manager: Arc<dyn TenantManager>,
    pub cors_manager: Arc<dyn CorsManager>,
    pub request_handler: Arc<dyn CorsRequestHandler>,
    pub tagger: Arc<dyn RequestTagger>,
}

impl ValveServices {
    pub fn new(
        tenant_manager: Arc<dyn TenantManager>,
        cors_manager: Arc<dyn CorsManager>,
        request_handler: Arc<dyn CorsRequestHandler>,
    ) -> Self {
        Self {
            tenant_manager,
            cors_manager,
            request_handler,
            tagger: Arc::new(AttributeTagger),
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn RequestTagger>) -> Self {
        self.tagger = tagger;
        self
    }
}

/// Request interceptor enforcing tenant availability and per-tenant CORS policy.
pub struct CorsValve {
    options: ValveOptions,
    tenant_validator: TenantValidator,
    cors_manager: Arc<dyn CorsManager>,
    request_handler: Arc<dyn CorsRequestHandler>,
    tagger: Arc<dyn RequestTagger>,
}

impl CorsValve {
    pub fn new(options: ValveOptions, services: ValveServices) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self {
            options,
            tenant_validator: TenantValidator::new(services.tenant_manager),
            cors_manager: services.cors_manager,
            request_handler: services.request_handler,
            tagger: services.tagger,
        })
    }

    pub fn options(&self) -> &ValveOptions {
        &self.options
    }

    /// Runs one request through the valve.
    ///
    /// Every failure except a policy store error under [`ManagementErrorPolicy::Silent`]
    /// leaves a complete response in `response`. `next` is invoked at most once and
    /// never after an error response was written. I/O errors come from `next` or from
    /// writing the response and are left to the host.
    pub fn invoke(
        &self,
        request: &mut RequestContext<'_>,
        response: &mut Response,
        next: &mut dyn Next,
    ) -> io::Result<ValveOutcome> {
        let request_type = self.options.classifier.classify(request);
        let tenant_domain = request.tenant_domain.filter(|domain| !domain.is_empty());

        if let ControlFlow::Break(error) = self.tenant_validator.validate(tenant_domain, response)? {
            debug!(
                tenant_domain = error.domain(),
                status = error.status_code(),
                "request rejected by tenant validation"
            );
            return Ok(ValveOutcome::Errored);
        }

        let configuration = match self.cors_manager.get_cors_configuration(tenant_domain) {
            Ok(configuration) => configuration,
            Err(error) => return self.on_management_error(&error, response),
        };

        if configuration.tag_requests {
            self.tagger.tag(request, request_type);
        }

        trace!(%request_type, ?tenant_domain, "dispatching request");

        match request_type {
            CorsRequestType::Actual => {
                match self
                    .request_handler
                    .handle_actual(request, &configuration, response)
                {
                    Ok(()) => {
                        next.invoke(request, response)?;
                        Ok(ValveOutcome::Forwarded)
                    }
                    Err(error) => Self::reject(&error, response, ValveOutcome::Errored),
                }
            }
            CorsRequestType::Preflight => {
                match self
                    .request_handler
                    .handle_preflight(request, &configuration, response)
                {
                    Ok(()) => Ok(ValveOutcome::Handled),
                    Err(error) => Self::reject(&error, response, ValveOutcome::Errored),
                }
            }
            CorsRequestType::Other if configuration.allow_generic_http_requests => {
                next.invoke(request, response)?;
                Ok(ValveOutcome::Forwarded)
            }
            CorsRequestType::Other => Self::reject(
                &CorsError::GenericHttpNotAllowed,
                response,
                ValveOutcome::Denied,
            ),
        }
    }

    fn reject(
        error: &CorsError,
        response: &mut Response,
        outcome: ValveOutcome,
    ) -> io::Result<ValveOutcome> {
        write_cors_error(error, response)?;
        Ok(outcome)
    }

    fn on_management_error(
        &self,
        management_error: &ManagementError,
        response: &mut Response,
    ) -> io::Result<ValveOutcome> {
        error!(
            error = %management_error,
            "CORS management service error when intercepting an HTTP request"
        );
        match self.options.management_error {
            ManagementErrorPolicy::Silent => Ok(ValveOutcome::Dropped),
            ManagementErrorPolicy::Respond { status } => Self::reject(
                &CorsError::other(status, CONFIGURATION_UNAVAILABLE),
                response,
                ValveOutcome::Errored,
            ),
        }
    }
}

#[cfg(test)]
#[path = "valve_test.rs"]
mod valve_test;
