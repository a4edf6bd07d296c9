use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::offers::OfferCollection;
use crate::search::{FlightFinderInput, TimestampPolicy};
use crate::supplier::FlightSearchBackend;
use crate::{CoreError, CoreResult};

/// Callable flight search exposed to an agent orchestrator.
///
/// Builds the request, calls the backend once and validates the answer.
pub struct FlightFinderTool<'a> {
    backend: &'a dyn FlightSearchBackend,
    policy: TimestampPolicy,
}

impl<'a> FlightFinderTool<'a> {
    pub fn new(backend: &'a dyn FlightSearchBackend) -> Self {
        Self { backend, policy: TimestampPolicy::default() }
    }

    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        "Flight Finder Tool"
    }

    pub fn description(&self) -> &str {
        "Finds flights given at a minimum the start date for travel and the origin airport code."
    }

    /// JSON schema of the arguments accepted by [`FlightFinderTool::execute`].
    pub fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "start_date": {
                    "description": "Earliest date to look for flights.",
                    "type": "string"
                },
                "end_date": {
                    "description": "Latest date to look for flights.",
                    "type": ["string", "null"]
                },
                "origin": {
                    "description": "Origin airport code.",
                    "type": "string"
                },
                "destination": {
                    "description": "Destination airport code.",
                    "type": ["string", "null"]
                },
                "adults": {
                    "description": "Number of adult passengers requested.",
                    "type": ["integer", "null"],
                    "minimum": 0
                }
            },
            "required": ["start_date", "origin"]
        })
    }

    pub async fn run(&self, input: &FlightFinderInput) -> CoreResult<OfferCollection> {
        let params = input.normalize(self.policy).to_params();
        debug!("Finding flights with params: {:?}", params.pairs());

        let payload = self.backend.search_offers(&params).await.map_err(|e| {
            warn!("Flight search failed: {}", e);
            e
        })?;

        let offers = OfferCollection::from_response(payload)?;
        info!("Found {} flights", offers.len());
        Ok(offers)
    }

    /// Decode orchestrator-supplied arguments, then [`run`](Self::run).
    pub async fn execute(&self, arguments: Value) -> CoreResult<OfferCollection> {
        let input: FlightFinderInput = serde_json::from_value(arguments)
            .map_err(|e| CoreError::validation("tool arguments", e))?;
        self.run(&input).await
    }
}
