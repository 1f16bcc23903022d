//! Request DTOs for pricing API endpoints.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::coerce::{parse_event_date, string_field};
use super::county::SelectedAddress;
use super::models::{Act, Lineup};
use super::services::{LineupSelection, PricingInput};

/// Request to price an act for an enquiry.
///
/// Every field is taken as raw JSON and coerced in [`into_parts`], so a
/// wrongly shaped field degrades to "missing" instead of rejecting the
/// request.
///
/// [`into_parts`]: CalculateActPricingRequest::into_parts
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateActPricingRequest {
    /// Stored act document, passed through as-is
    #[serde(default)]
    pub act: Option<Value>,
    #[serde(default)]
    pub selected_county: Option<Value>,
    /// Address text or `{address, town, county, postcode}` object
    #[serde(default)]
    pub selected_address: Option<Value>,
    #[serde(default, alias = "date")]
    pub event_date: Option<Value>,
    #[serde(default)]
    pub lineup_id: Option<Value>,
    /// Explicit lineup document; wins over `lineupId`
    #[serde(default)]
    pub lineup: Option<Value>,
}

impl CalculateActPricingRequest {
    /// Parse the loosely-typed parts into the act and pricing input.
    pub fn into_parts(self) -> (Option<Act>, PricingInput) {
        let act = self.act.as_ref().and_then(Act::from_document);

        let lineup_id = string_field(self.lineup_id.as_ref());
        let lineup = match (&self.lineup, lineup_id) {
            (Some(value), _) if !value.is_null() => Lineup::from_value(value)
                .map(LineupSelection::Explicit)
                .unwrap_or(LineupSelection::Invalid),
            (_, Some(id)) => LineupSelection::ById(id),
            _ => LineupSelection::Smallest,
        };

        let selected_address = self
            .selected_address
            .filter(|v| !v.is_null())
            .and_then(|v| match serde_json::from_value::<SelectedAddress>(v) {
                Ok(address) => Some(address),
                Err(e) => {
                    warn!("Ignoring malformed selectedAddress: {}", e);
                    None
                }
            });

        let input = PricingInput {
            selected_county: self
                .selected_county
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_string),
            selected_address,
            event_date: self
                .event_date
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_event_date),
            lineup,
        };

        (act, input)
    }
}

/// Request to resolve a county
#[derive(Debug, Deserialize)]
pub struct ResolveCountyRequest {
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub address: Option<SelectedAddress>,
}

/// Request to quote one member's MU travel
#[derive(Debug, Deserialize)]
pub struct TravelQuoteRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
}
