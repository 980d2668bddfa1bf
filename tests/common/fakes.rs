use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tenant_cors_valve::constants::{attribute, header};
use tenant_cors_valve::{
    Attributes, CorsConfiguration, CorsError, CorsManager, CorsRequestHandler, CorsRequestType,
    ManagementError, Next, RequestContext, Response, TenantId, TenantManager, TenantStoreError,
};

#[derive(Default)]
pub struct FakeTenantDirectory {
    tenants: HashMap<String, (TenantId, bool)>,
    id_failure: Option<TenantStoreError>,
    activity_failure: Option<TenantStoreError>,
    lookups: AtomicUsize,
}

impl FakeTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(mut self, domain: &str, id: TenantId, active: bool) -> Self {
        self.tenants.insert(domain.to_string(), (id, active));
        self
    }

    pub fn failing_id_lookup(mut self, error: TenantStoreError) -> Self {
        self.id_failure = Some(error);
        self
    }

    pub fn failing_activity_check(mut self, error: TenantStoreError) -> Self {
        self.activity_failure = Some(error);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TenantManager for FakeTenantDirectory {
    fn get_tenant_id(&self, tenant_domain: &str) -> Result<TenantId, TenantStoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.id_failure {
            return Err(error.clone());
        }
        self.tenants
            .get(tenant_domain)
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                TenantStoreError::Runtime(format!("Invalid tenant domain {tenant_domain}"))
            })
    }

    fn is_tenant_active(&self, tenant_id: TenantId) -> Result<bool, TenantStoreError> {
        if let Some(error) = &self.activity_failure {
            return Err(error.clone());
        }
        Ok(self
            .tenants
            .values()
            .any(|(id, active)| *id == tenant_id && *active))
    }
}

pub struct FailingCorsManager;

impl CorsManager for FailingCorsManager {
    fn get_cors_configuration(
        &self,
        _tenant_domain: Option<&str>,
    ) -> Result<CorsConfiguration, ManagementError> {
        Err(ManagementError::new("configuration registry unreachable"))
    }
}

/// Stage call as seen by the header-negotiation fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCall {
    pub kind: CorsRequestType,
    pub tag: Option<String>,
}

#[derive(Default)]
pub struct RecordingHandler {
    reject_actual: Option<CorsError>,
    reject_preflight: Option<CorsError>,
    calls: Mutex<Vec<StageCall>>,
}

impl RecordingHandler {
    pub fn rejecting_actual(error: CorsError) -> Self {
        Self {
            reject_actual: Some(error),
            ..Self::default()
        }
    }

    pub fn rejecting_preflight(error: CorsError) -> Self {
        Self {
            reject_preflight: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StageCall> {
        self.calls.lock().expect("handler lock").clone()
    }

    fn record(&self, kind: CorsRequestType, request: &RequestContext<'_>) {
        self.calls.lock().expect("handler lock").push(StageCall {
            kind,
            tag: request
                .attribute(attribute::REQUEST_TYPE)
                .map(str::to_string),
        });
    }
}

impl CorsRequestHandler for RecordingHandler {
    fn handle_actual(
        &self,
        request: &RequestContext<'_>,
        _configuration: &CorsConfiguration,
        response: &mut Response,
    ) -> Result<(), CorsError> {
        self.record(CorsRequestType::Actual, request);
        if let Some(error) = &self.reject_actual {
            return Err(error.clone());
        }
        if let Some(origin) = request.origin {
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            response.set_header(header::VARY, header::ORIGIN);
        }
        Ok(())
    }

    fn handle_preflight(
        &self,
        request: &RequestContext<'_>,
        configuration: &CorsConfiguration,
        response: &mut Response,
    ) -> Result<(), CorsError> {
        self.record(CorsRequestType::Preflight, request);
        if let Some(error) = &self.reject_preflight {
            return Err(error.clone());
        }
        response.set_status(200);
        response.set_header(
            "Access-Control-Allow-Methods",
            configuration.supported_methods.join(", "),
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNext {
    pub calls: usize,
    pub attributes: Vec<Attributes>,
    fail: bool,
}

impl RecordingNext {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Value of attribute `name` as seen by each downstream call.
    pub fn seen(&self, name: &str) -> Vec<Option<&str>> {
        self.attributes
            .iter()
            .map(|attributes| attributes.get(name).map(String::as_str))
            .collect()
    }
}

impl Next for RecordingNext {
    fn invoke(&mut self, request: &RequestContext<'_>, response: &mut Response) -> io::Result<()> {
        self.calls += 1;
        self.attributes.push(request.attributes.clone());
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"));
        }
        response.set_status(200);
        Ok(())
    }
}
