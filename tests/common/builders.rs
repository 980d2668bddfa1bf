use super::fakes::{FailingCorsManager, FakeTenantDirectory, RecordingHandler, RecordingNext};
use std::sync::Arc;
use tenant_cors_valve::constants::method;
use tenant_cors_valve::{
    CorsConfiguration, CorsManager, CorsValve, RequestContext, Response, StaticCorsManager,
    ValveOptions, ValveOutcome, ValveServices,
};

pub struct Harness {
    pub valve: CorsValve,
    pub handler: Arc<RecordingHandler>,
    pub directory: Arc<FakeTenantDirectory>,
}

pub struct ValveBuilder {
    options: ValveOptions,
    directory: FakeTenantDirectory,
    manager: StaticCorsManager,
    failing_manager: bool,
    handler: RecordingHandler,
}

impl ValveBuilder {
    pub fn new() -> Self {
        Self {
            options: ValveOptions::default(),
            directory: FakeTenantDirectory::new().tenant("acme", 1, true),
            manager: StaticCorsManager::new(),
            failing_manager: false,
            handler: RecordingHandler::default(),
        }
    }

    pub fn options(mut self, options: ValveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn directory(mut self, directory: FakeTenantDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn configuration(mut self, tenant_domain: &str, config: CorsConfiguration) -> Self {
        self.manager
            .insert(tenant_domain, config)
            .expect("valid CORS configuration");
        self
    }

    pub fn failing_manager(mut self) -> Self {
        self.failing_manager = true;
        self
    }

    pub fn handler(mut self, handler: RecordingHandler) -> Self {
        self.handler = handler;
        self
    }

    pub fn build(self) -> Harness {
        let handler = Arc::new(self.handler);
        let directory = Arc::new(self.directory);
        let manager: Arc<dyn CorsManager> = if self.failing_manager {
            Arc::new(FailingCorsManager)
        } else {
            Arc::new(self.manager)
        };
        let services = ValveServices::new(directory.clone(), manager, handler.clone());
        Harness {
            valve: CorsValve::new(self.options, services).expect("valid valve options"),
            handler,
            directory,
        }
    }
}

pub fn valve() -> ValveBuilder {
    ValveBuilder::new()
}

#[derive(Clone)]
pub struct RequestBuilder {
    method: String,
    host: Option<String>,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
    tenant_domain: Option<String>,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            host: None,
            origin: None,
            request_method: None,
            request_headers: None,
            tenant_domain: Some("acme".into()),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, value: impl Into<String>) -> Self {
        self.request_method = Some(value.into());
        self
    }

    pub fn request_headers(mut self, value: impl Into<String>) -> Self {
        self.request_headers = Some(value.into());
        self
    }

    pub fn tenant(mut self, tenant_domain: impl Into<String>) -> Self {
        self.tenant_domain = Some(tenant_domain.into());
        self
    }

    pub fn without_tenant(mut self) -> Self {
        self.tenant_domain = None;
        self
    }

    pub fn context(&self) -> RequestContext<'_> {
        RequestContext {
            host: self.host.as_deref(),
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
            tenant_domain: self.tenant_domain.as_deref(),
            ..RequestContext::new(&self.method)
        }
    }

    /// Runs the request through `valve` and returns what the host would observe.
    pub fn send(&self, valve: &CorsValve) -> Exchange {
        self.send_with(valve, RecordingNext::default())
    }

    pub fn send_with(&self, valve: &CorsValve, mut next: RecordingNext) -> Exchange {
        let mut ctx = self.context();
        let mut response = Response::new();
        let outcome = valve
            .invoke(&mut ctx, &mut response, &mut next)
            .expect("valve invocation should not fail with I/O error");
        Exchange {
            outcome,
            response,
            next,
        }
    }
}

pub struct Exchange {
    pub outcome: ValveOutcome,
    pub response: Response,
    pub next: RecordingNext,
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET).origin("https://app.example")
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
        .origin("https://app.example")
        .request_method(method::POST)
}

pub fn plain_request() -> RequestBuilder {
    RequestBuilder::new(method::POST)
}
