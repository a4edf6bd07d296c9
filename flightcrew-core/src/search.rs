use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADULTS: u32 = 2;

/// Placeholder some producers send instead of a real null.
const NULL_PLACEHOLDER: &str = "None";

/// A travel date as handed over by the caller: either text that is already
/// formatted or a structured timestamp.
///
/// JSON strings always land in `Text`, so tool arguments are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Text(String),
    Timestamp(DateTime<FixedOffset>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Timestamp(value)
    }
}

/// How a structured start timestamp becomes the `departureDate` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Ignore the supplied timestamp and send the current local time in ISO form.
    /// This is what the legacy flight finder did.
    #[default]
    CurrentTime,
    /// Send the calendar date of the supplied timestamp.
    Supplied,
}

impl TimestampPolicy {
    fn departure_date(self, start: &DateInput) -> String {
        match start {
            DateInput::Text(text) => text.clone(),
            DateInput::Timestamp(ts) => match self {
                TimestampPolicy::CurrentTime => {
                    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
                }
                TimestampPolicy::Supplied => ts.date_naive().format("%Y-%m-%d").to_string(),
            },
        }
    }
}

/// Loosely-typed search input, as accepted by the flight finder tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightFinderInput {
    /// Earliest date to look for flights.
    pub start_date: DateInput,
    /// Latest date to look for flights. Accepted but not forwarded.
    #[serde(default)]
    pub end_date: Option<DateInput>,
    /// Origin airport code.
    pub origin: String,
    /// Destination airport code; absent means "anywhere".
    #[serde(default)]
    pub destination: Option<String>,
    /// Number of adult passengers.
    #[serde(default)]
    pub adults: Option<u32>,
}

impl FlightFinderInput {
    pub fn new(start_date: impl Into<DateInput>, origin: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: None,
            origin: origin.into(),
            destination: None,
            adults: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_end_date(mut self, end_date: impl Into<DateInput>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_adults(mut self, adults: u32) -> Self {
        self.adults = Some(adults);
        self
    }

    /// Normalize into a canonical request. Never fails; the backend rejects bad codes.
    pub fn normalize(&self, policy: TimestampPolicy) -> SearchRequest {
        let destination = self
            .destination
            .as_deref()
            .filter(|d| !d.is_empty() && *d != NULL_PLACEHOLDER)
            .map(str::to_string);

        SearchRequest {
            origin: self.origin.clone(),
            destination,
            departure_date: policy.departure_date(&self.start_date),
            adults: self.adults.unwrap_or(DEFAULT_ADULTS),
        }
    }
}

/// Canonical flight-offer search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: Option<String>,
    pub departure_date: String,
    pub adults: u32,
}

impl SearchRequest {
    pub fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::default();
        params.push("departureDate", self.departure_date.clone());
        params.push("originLocationCode", self.origin.clone());
        if let Some(destination) = &self.destination {
            params.push("destinationLocationCode", destination.clone());
        }
        params.push("adults", self.adults.to_string());
        params
    }
}

/// Flat, ordered query parameter set for the flight-offers endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchParams(Vec<(&'static str, String)>);

impl SearchParams {
    fn push(&mut self, key: &'static str, value: String) {
        self.0.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
