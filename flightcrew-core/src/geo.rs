use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// A named place with coordinates, used to resolve free-text locations to airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Full name of the location.
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    pub state: String,
}

/// Resolved free-text locations (city, state, coordinates).
///
/// Not wired into the flight search yet; kept as the strict model for a
/// location lookup step in front of the finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocations {
    pub results: Vec<GeoLocation>,
}

impl GeoLocations {
    /// Validate a lookup result; every location must carry every field.
    pub fn from_value(value: serde_json::Value) -> CoreResult<Self> {
        serde_json::from_value(value).map_err(|e| CoreError::validation("geo locations", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geo_locations_deserialization() {
        let locations = GeoLocations::from_value(json!({
            "results": [{
                "name": "Santa Fe",
                "lat": 35.687,
                "lon": -105.9378,
                "country": "US",
                "state": "New Mexico"
            }]
        }))
        .expect("valid locations");
        assert_eq!(locations.results[0].name, "Santa Fe");
    }

    #[test]
    fn test_geo_location_requires_state() {
        let err = GeoLocations::from_value(json!({
            "results": [{ "name": "Paris", "lat": 48.85, "lon": 2.35, "country": "FR" }]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("state"));
    }
}
