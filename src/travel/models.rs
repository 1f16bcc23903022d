//! Travel-data payloads, normalised to one shape.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::pricing::coerce::parse_decimal;

use super::client::TravelClientError;

/// One leg of a round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelLeg {
    pub distance_meters: Decimal,
    pub duration_seconds: Decimal,
    pub fare: Decimal,
}

impl TravelLeg {
    /// Parse `{distance: {value}, duration: {value}, fare: {value}}`.
    ///
    /// Distance and duration are required; fare defaults to zero.
    /// Bare numbers are accepted in place of `{value}` objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            distance_meters: metric(obj.get("distance")?)?,
            duration_seconds: metric(obj.get("duration")?)?,
            fare: obj.get("fare").and_then(metric).unwrap_or(Decimal::ZERO),
        })
    }
}

fn metric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Object(obj) => obj.get("value").and_then(parse_decimal),
        other => parse_decimal(other),
    }
}

/// Outbound and return legs between a member and the venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelData {
    pub outbound: TravelLeg,
    pub return_trip: TravelLeg,
}

impl TravelData {
    /// Normalise either payload shape the travel endpoint has served:
    ///
    /// - `{outbound, returnTrip}` (`return` accepted as an alias)
    /// - legacy `{rows: [{elements: [...]}]}`, where the second element (or
    ///   the second row) is the return leg; the outbound leg is mirrored when
    ///   no return leg is present.
    pub fn from_json(payload: &Value) -> Result<Self, TravelClientError> {
        if let Some(outbound) = payload.get("outbound") {
            let outbound = TravelLeg::from_value(outbound)
                .ok_or(TravelClientError::Malformed("outbound leg"))?;
            let return_trip = payload
                .get("returnTrip")
                .or_else(|| payload.get("return"))
                .and_then(TravelLeg::from_value)
                .ok_or(TravelClientError::Malformed("return leg"))?;
            return Ok(Self {
                outbound,
                return_trip,
            });
        }

        if let Some(rows) = payload.get("rows").and_then(Value::as_array) {
            let elements = |row: usize| {
                rows.get(row)
                    .and_then(|r| r.get("elements"))
                    .and_then(Value::as_array)
            };

            let first_row = elements(0).ok_or(TravelClientError::Malformed("legacy rows"))?;
            let outbound = first_row
                .first()
                .and_then(TravelLeg::from_value)
                .ok_or(TravelClientError::Malformed("legacy outbound element"))?;
            let return_trip = first_row
                .get(1)
                .or_else(|| elements(1).and_then(|e| e.first()))
                .and_then(TravelLeg::from_value)
                .unwrap_or_else(|| outbound.clone());

            return Ok(Self {
                outbound,
                return_trip,
            });
        }

        Err(TravelClientError::Malformed("unrecognised travel payload"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn leg(distance: i64, duration: i64, fare: f64) -> Value {
        json!({
            "distance": {"text": "x", "value": distance},
            "duration": {"text": "y", "value": duration},
            "fare": {"currency": "GBP", "value": fare}
        })
    }

    #[test]
    fn test_modern_shape() {
        let data = TravelData::from_json(&json!({
            "outbound": leg(16093, 1800, 4.5),
            "returnTrip": leg(16100, 4000, 0.0)
        }))
        .unwrap();

        assert_eq!(data.outbound.distance_meters, dec!(16093));
        assert_eq!(data.outbound.duration_seconds, dec!(1800));
        assert_eq!(data.outbound.fare, dec!(4.5));
        assert_eq!(data.return_trip.duration_seconds, dec!(4000));
    }

    #[test]
    fn test_return_alias_and_missing_fare() {
        let data = TravelData::from_json(&json!({
            "outbound": {"distance": {"value": 1000}, "duration": {"value": 60}},
            "return": {"distance": 1000, "duration": "60"}
        }))
        .unwrap();
        assert_eq!(data.outbound.fare, Decimal::ZERO);
        assert_eq!(data.return_trip.duration_seconds, dec!(60));
    }

    #[test]
    fn test_legacy_two_elements() {
        let data = TravelData::from_json(&json!({
            "rows": [{"elements": [leg(1000, 600, 1.0), leg(2000, 1200, 2.0)]}]
        }))
        .unwrap();
        assert_eq!(data.outbound.distance_meters, dec!(1000));
        assert_eq!(data.return_trip.distance_meters, dec!(2000));
    }

    #[test]
    fn test_legacy_second_row() {
        let data = TravelData::from_json(&json!({
            "rows": [
                {"elements": [leg(1000, 600, 1.0)]},
                {"elements": [leg(3000, 900, 0.0)]}
            ]
        }))
        .unwrap();
        assert_eq!(data.return_trip.distance_meters, dec!(3000));
    }

    #[test]
    fn test_legacy_single_leg_is_mirrored() {
        let data = TravelData::from_json(&json!({
            "rows": [{"elements": [leg(1000, 600, 1.0)]}]
        }))
        .unwrap();
        assert_eq!(data.return_trip, data.outbound);
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(TravelData::from_json(&json!({})).is_err());
        assert!(TravelData::from_json(&json!({"outbound": leg(1, 1, 0.0)})).is_err());
        assert!(TravelData::from_json(&json!({"outbound": {"distance": 5}})).is_err());
        assert!(TravelData::from_json(&json!({"rows": []})).is_err());
        assert!(TravelData::from_json(&json!({
            "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
        }))
        .is_err());
    }
}
