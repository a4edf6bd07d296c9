//! Flight-offer search response model.
//!
//! Field names follow the backend's camelCase JSON. Every field is required,
//! monetary amounts stay decimal strings, and sequence order is the order the
//! backend returned (its ranking), so nothing here is ever re-sorted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CoreError, CoreResult};

pub type JsonObject = Map<String, Value>;

/// Validated offers in response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferCollection {
    pub results: Vec<Offer>,
}

impl OfferCollection {
    /// Validate one raw payload per offer. Any nonconforming offer fails the whole batch.
    pub fn from_offers(raw: Vec<Value>) -> CoreResult<Self> {
        let mut results = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            let context = offer_context(index, &value);
            let offer = serde_json::from_value::<Offer>(value)
                .map_err(|e| CoreError::validation(context, e))?;
            results.push(offer);
        }
        Ok(Self { results })
    }

    /// Validate a whole backend response: either the offers array itself or the
    /// `{ "data": [...] }` envelope around it.
    pub fn from_response(response: Value) -> CoreResult<Self> {
        match response {
            Value::Array(items) => Self::from_offers(items),
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(items)) => Self::from_offers(items),
                Some(other) => Err(CoreError::validation(
                    "response.data",
                    format!("expected an array of offers, found {}", json_kind(&other)),
                )),
                None => Err(CoreError::validation("response", "missing field `data`")),
            },
            other => Err(CoreError::validation(
                "response",
                format!("expected an array of offers, found {}", json_kind(&other)),
            )),
        }
    }

    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| CoreError::validation("response", e))?;
        Self::from_response(value)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Offer> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a OfferCollection {
    type Item = &'a Offer;
    type IntoIter = std::slice::Iter<'a, Offer>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

fn offer_context(index: usize, value: &Value) -> String {
    match value.get("id").and_then(Value::as_str) {
        Some(id) => format!("offer[{}] (id={})", index, id),
        None => format!("offer[{}]", index),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One priced flight proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "type")]
    pub offer_type: String,
    pub id: String,
    pub source: String,
    pub instant_ticketing_required: bool,
    pub non_homogeneous: bool,
    pub one_way: bool,
    pub is_upsell_offer: bool,
    pub last_ticketing_date: String,
    pub last_ticketing_date_time: String,
    pub number_of_bookable_seats: u32,
    pub itineraries: Vec<Itinerary>,
    pub price: Price,
    pub pricing_options: PricingOptions,
    pub validating_airline_codes: Vec<String>,
    /// Kept as raw objects; see [`Offer::traveler_pricing_details`] for the typed view.
    pub traveler_pricings: Vec<JsonObject>,
}

impl Offer {
    /// Strictly parse the per-traveler pricing records.
    pub fn traveler_pricing_details(&self) -> CoreResult<Vec<TravelerPricing>> {
        self.traveler_pricings
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value(Value::Object(raw.clone())).map_err(|e| {
                    CoreError::validation(
                        format!("offer (id={}).travelerPricings[{}]", self.id, index),
                        e,
                    )
                })
            })
            .collect()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.itineraries.iter().flat_map(|i| i.segments.iter())
    }

    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments().next()
    }

    /// Final leg of the outbound itinerary.
    pub fn outbound_last_segment(&self) -> Option<&Segment> {
        self.itineraries.first().and_then(|i| i.segments.last())
    }

    /// Stops across the first itinerary: intermediate connections plus technical stops.
    pub fn total_stops(&self) -> u32 {
        self.itineraries
            .first()
            .map(|i| {
                let connections = i.segments.len().saturating_sub(1) as u32;
                i.segments
                    .iter()
                    .fold(connections, |acc, s| acc.saturating_add(s.number_of_stops))
            })
            .unwrap_or(0)
    }
}

/// One directional journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// ISO-8601 duration, e.g. `PT1H29M`.
    pub duration: String,
    pub segments: Vec<Segment>,
}

/// One non-stop leg with a single carrier and flight number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: JsonObject,
    pub arrival: JsonObject,
    pub carrier_code: String,
    pub number: String,
    pub aircraft: JsonObject,
    pub duration: String,
    pub id: String,
    pub number_of_stops: u32,
    #[serde(rename = "blacklistedInEU")]
    pub blacklisted_in_eu: bool,
}

impl Segment {
    pub fn departure_airport(&self) -> Option<&str> {
        self.departure.get("iataCode").and_then(Value::as_str)
    }

    pub fn arrival_airport(&self) -> Option<&str> {
        self.arrival.get("iataCode").and_then(Value::as_str)
    }

    pub fn departure_time(&self) -> Option<&str> {
        self.departure.get("at").and_then(Value::as_str)
    }

    pub fn arrival_time(&self) -> Option<&str> {
        self.arrival.get("at").and_then(Value::as_str)
    }

    /// Carrier code and flight number, e.g. `UA5773`.
    pub fn flight_designator(&self) -> String {
        format!("{}{}", self.carrier_code, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    pub total: String,
    pub base: String,
    pub fees: Vec<Fee>,
    pub grand_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: String,
    #[serde(rename = "type")]
    pub fee_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOptions {
    pub fare_type: Vec<String>,
    pub included_checked_bags_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    pub traveler_id: String,
    pub fare_option: String,
    pub traveler_type: String,
    pub price: TravelerPrice,
    pub fare_details_by_segment: Vec<FareDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelerPrice {
    pub currency: String,
    pub total: String,
    pub base: String,
}

/// Fare detail for one segment of one traveler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDetail {
    pub segment_id: String,
    pub cabin: String,
    pub fare_basis: String,
    pub branded_fare: String,
    pub branded_fare_label: String,
    pub class: String,
    pub included_checked_bags: BagAllowance,
    pub included_cabin_bags: BagAllowance,
    pub amenities: Vec<Amenity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagAllowance {
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub description: String,
    pub is_chargeable: bool,
    pub amenity_type: String,
    pub amenity_provider: AmenityProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityProvider {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segment() -> Value {
        json!({
            "departure": { "iataCode": "DEN", "terminal": "B", "at": "2025-06-01T08:00:00" },
            "arrival": { "iataCode": "SAF", "at": "2025-06-01T09:29:00" },
            "carrierCode": "UA",
            "number": "5773",
            "aircraft": { "code": "E7W" },
            "duration": "PT1H29M",
            "id": "1",
            "numberOfStops": 0,
            "blacklistedInEU": false
        })
    }

    fn offer() -> Value {
        json!({
            "type": "flight-offer",
            "id": "1",
            "source": "GDS",
            "instantTicketingRequired": false,
            "nonHomogeneous": false,
            "oneWay": false,
            "isUpsellOffer": false,
            "lastTicketingDate": "2025-05-20",
            "lastTicketingDateTime": "2025-05-20",
            "numberOfBookableSeats": 9,
            "itineraries": [{ "duration": "PT1H29M", "segments": [segment()] }],
            "price": {
                "currency": "USD",
                "total": "188.70",
                "base": "157.21",
                "fees": [{ "amount": "0.00", "type": "SUPPLIER" }],
                "grandTotal": "188.70"
            },
            "pricingOptions": { "fareType": ["PUBLISHED"], "includedCheckedBagsOnly": false },
            "validatingAirlineCodes": ["UA"],
            "travelerPricings": [{ "travelerId": "1" }]
        })
    }

    #[test]
    fn test_offer_deserialization() {
        let collection = OfferCollection::from_offers(vec![offer()]).expect("valid offer");
        assert_eq!(collection.len(), 1);
        let offer = &collection.results[0];
        assert_eq!(offer.offer_type, "flight-offer");
        assert_eq!(offer.price.total, "188.70");
        assert_eq!(offer.itineraries[0].segments[0].flight_designator(), "UA5773");
        assert!(!offer.itineraries[0].segments[0].blacklisted_in_eu);
    }

    #[test]
    fn test_missing_nested_field_fails_whole_batch() {
        let mut broken = offer();
        broken["id"] = json!("2");
        broken["itineraries"][0]["segments"][0]
            .as_object_mut()
            .unwrap()
            .remove("carrierCode");

        let err = OfferCollection::from_offers(vec![offer(), broken]).unwrap_err();
        match err {
            CoreError::Validation { context, reason } => {
                assert_eq!(context, "offer[1] (id=2)");
                assert!(reason.contains("carrierCode"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut broken = offer();
        broken["numberOfBookableSeats"] = json!("nine");
        assert!(OfferCollection::from_offers(vec![broken]).is_err());

        let mut broken = offer();
        broken["price"]["total"] = json!(188.70);
        assert!(OfferCollection::from_offers(vec![broken]).is_err());

        let mut broken = offer();
        broken["itineraries"][0]["segments"][0]["departure"] = json!("DEN");
        assert!(OfferCollection::from_offers(vec![broken]).is_err());
    }

    #[test]
    fn test_negative_stop_count_rejected() {
        let mut broken = offer();
        broken["itineraries"][0]["segments"][0]["numberOfStops"] = json!(-1);
        assert!(OfferCollection::from_offers(vec![broken]).is_err());
    }

    #[test]
    fn test_response_envelope() {
        let collection =
            OfferCollection::from_response(json!({ "meta": { "count": 1 }, "data": [offer()] }))
                .expect("envelope");
        assert_eq!(collection.len(), 1);

        let err = OfferCollection::from_response(json!({ "meta": {} })).unwrap_err();
        assert!(err.to_string().contains("missing field `data`"));

        let err = OfferCollection::from_response(json!("nope")).unwrap_err();
        assert!(err.to_string().contains("found a string"));
    }

    #[test]
    fn test_empty_response_is_valid() {
        let collection = OfferCollection::from_response(json!([])).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_traveler_pricing_details_are_strict() {
        let collection = OfferCollection::from_offers(vec![offer()]).unwrap();
        let err = collection.results[0].traveler_pricing_details().unwrap_err();
        assert!(err.to_string().contains("travelerPricings[0]"));
    }

    #[test]
    fn test_segment_accessors() {
        let collection = OfferCollection::from_offers(vec![offer()]).unwrap();
        let offer = &collection.results[0];
        let seg = offer.first_segment().unwrap();
        assert_eq!(seg.departure_airport(), Some("DEN"));
        assert_eq!(seg.arrival_airport(), Some("SAF"));
        assert_eq!(seg.departure_time(), Some("2025-06-01T08:00:00"));
        assert_eq!(offer.total_stops(), 0);
    }

    #[test]
    fn test_total_stops_saturates_on_huge_stop_counts() {
        let mut raw = offer();
        raw["itineraries"][0]["segments"] = json!([segment(), segment()]);
        raw["itineraries"][0]["segments"][0]["numberOfStops"] = json!(u32::MAX);

        let collection = OfferCollection::from_offers(vec![raw]).expect("u32 stop count is valid");
        assert_eq!(collection.results[0].total_stops(), u32::MAX);

        let report = crate::report::render_report("", &collection);
        assert!(report.contains(&format!("| {} |", u32::MAX)));
    }
}
