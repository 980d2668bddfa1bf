use crate::error::ValidationError;
use crate::request_type::RequestClassifier;

/// What the valve does when the CORS policy store fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagementErrorPolicy {
    /// Log the failure and return without writing a response or forwarding the request.
    #[default]
    Silent,
    /// Write a plain-text error with the given 5xx status.
    Respond { status: u16 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValveOptions {
    pub classifier: RequestClassifier,
    pub management_error: ManagementErrorPolicy,
}

impl ValveOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let ManagementErrorPolicy::Respond { status } = self.management_error
            && !(500..=599).contains(&status)
        {
            return Err(ValidationError::ManagementStatusOutOfRange(status));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
