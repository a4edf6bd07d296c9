use async_trait::async_trait;
use flightcrew_core::search::SearchParams;
use flightcrew_core::{CoreError, CoreResult, FlightSearchBackend};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use crate::app_config::AmadeusConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Authenticated Amadeus self-service client.
///
/// Built once per run; the bearer token is not refreshed, which is fine for a
/// single search but not for long-lived use.
#[derive(Clone)]
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl AmadeusClient {
    /// Exchange the configured key/secret for a bearer token.
    pub async fn connect(config: &AmadeusConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CoreError::Configuration(format!("HTTP client: {}", e)))?;
        let base_url = config.base_url();

        let response = http
            .post(format!("{}{}", base_url, TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", config.api_key.as_str()),
                ("client_secret", config.api_secret.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_ok(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CoreError::validation("token response", e))?;

        info!("Authenticated against {} (token valid for {}s)", base_url, token.expires_in);
        Ok(Self { http, base_url, access_token: token.access_token })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FlightSearchBackend for AmadeusClient {
    async fn search_offers(&self, params: &SearchParams) -> CoreResult<Value> {
        info!("Requesting flight offers from {}", self.base_url);
        let response = self
            .http
            .get(format!("{}{}", self.base_url, FLIGHT_OFFERS_PATH))
            .bearer_auth(&self.access_token)
            .query(params.pairs())
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_ok(response).await?;
        // a 200 that is not JSON is a bad payload, not a failed call
        let body: Value = response.json().await.map_err(|e| CoreError::validation("response", e))?;
        info!("Flights found successfully.");
        Ok(body)
    }
}

fn transport_error(err: reqwest::Error) -> CoreError {
    error!("Request failed: {}", err);
    CoreError::backend(None, format!("Request failed: {}", err))
}

/// Only a 200 counts as success; anything else becomes a `BackendCall` error
/// carrying the status and reason.
async fn ensure_ok(response: reqwest::Response) -> CoreResult<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::OK {
        return Ok(response);
    }

    let mut reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    let body = response.text().await.unwrap_or_default();
    if let Some(detail) = error_detail(&body) {
        reason = format!("{}: {}", reason, detail);
    }
    error!("Response was {} - {}", status.as_u16(), reason);
    Err(CoreError::backend(Some(status.as_u16()), reason))
}

/// First entry of an Amadeus `{"errors": [...]}` body, or an OAuth error description.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if let Some(first) = value.get("errors").and_then(|e| e.get(0)) {
        let title = first.get("title").and_then(Value::as_str);
        let detail = first.get("detail").and_then(Value::as_str);
        return match (title, detail) {
            (Some(t), Some(d)) => Some(format!("{} - {}", t, d)),
            (Some(t), None) => Some(t.to_string()),
            (None, Some(d)) => Some(d.to_string()),
            (None, None) => None,
        };
    }
    value
        .get("error_description")
        .and_then(Value::as_str)
        .map(str::to_string)
}
