use thiserror::Error;

use crate::provider::ServiceId;

/// Failures of a location search. Callers collapse both into a single
/// user-visible error state.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The geocoder had no match for the query.
    #[error("Location not found: '{0}'")]
    NotFound(String),

    /// An upstream service was unreachable, answered with a non-success
    /// status, or sent a body that could not be decoded.
    #[error("Failed to fetch data from {service}: {message}")]
    Fetch { service: ServiceId, message: String },
}

impl LookupError {
    pub fn fetch(service: ServiceId, message: impl Into<String>) -> Self {
        LookupError::Fetch { service, message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
