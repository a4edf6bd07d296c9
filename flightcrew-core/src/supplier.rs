use async_trait::async_trait;
use serde_json::Value;

use crate::search::SearchParams;
use crate::CoreResult;

#[async_trait]
pub trait FlightSearchBackend: Send + Sync {
    /// Run a flight-offer search and return the raw offers payload.
    ///
    /// Non-success statuses and transport failures both come back as
    /// [`crate::CoreError::BackendCall`]; nothing is retried here.
    async fn search_offers(&self, params: &SearchParams) -> CoreResult<Value>;
}

