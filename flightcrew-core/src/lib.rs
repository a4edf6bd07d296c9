pub mod search;
pub mod offers;
pub mod geo;
pub mod supplier;
pub mod tool;
pub mod report;

pub use offers::{Offer, OfferCollection};
pub use search::{DateInput, FlightFinderInput, SearchParams, TimestampPolicy};
pub use supplier::FlightSearchBackend;
pub use tool::FlightFinderTool;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Never raised today: request input is coerced rather than rejected.
    #[error("Request build failed: {0}")]
    RequestBuild(String),
    #[error("Backend call failed{}: {}", status_suffix(.status), .reason)]
    BackendCall { status: Option<u16>, reason: String },
    #[error("Validation failed at {context}: {reason}")]
    Validation { context: String, reason: String },
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn backend(status: Option<u16>, reason: impl Into<String>) -> Self {
        CoreError::BackendCall { status, reason: reason.into() }
    }

    pub fn validation(context: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CoreError::Validation { context: context.into(), reason: reason.to_string() }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

pub type CoreResult<T> = Result<T, CoreError>;
