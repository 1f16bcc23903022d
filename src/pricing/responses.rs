//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::travel::TravelData;

use super::calculators::MemberTravelCost;
use super::county::{CountyResolution, CountySource};
use super::policy::TravelDecision;
use super::services::{LineupSummary, MemberTravelLine, PricingResult};
use super::trace::DecisionTrace;

/// Response for act pricing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    #[serde(with = "rust_decimal::serde::str_option")]
    pub total: Option<Decimal>,
    pub travel_calculated: bool,
    pub decision: Option<TravelDecision>,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fee_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub travel_fee_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub before_margin_subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_added_approx: Decimal,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forced_test_price: bool,
    pub county: Option<CountyResolution>,
    pub lineup: Option<LineupResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub travel_breakdown: Vec<MemberTravelResponse>,
    pub trace: DecisionTrace,
}

impl From<PricingResult> for PricingResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            total: result.total,
            travel_calculated: result.travel_calculated,
            decision: result.decision,
            base_fee_total: result.base_fee_total,
            travel_fee_total: result.travel_fee_total,
            margin_multiplier: result.margin_multiplier,
            before_margin_subtotal: result.before_margin_subtotal,
            margin_added_approx: result.margin_added_approx,
            forced_test_price: result.forced_test_price,
            county: result.county,
            lineup: result.lineup.map(LineupResponse::from),
            travel_breakdown: result
                .travel_breakdown
                .into_iter()
                .map(MemberTravelResponse::from)
                .collect(),
            trace: result.trace,
        }
    }
}

/// Lineup that was priced
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupResponse {
    pub id: Option<String>,
    pub act_size: String,
    pub member_count: usize,
    pub travel_eligible: usize,
    pub northern_team: bool,
}

impl From<LineupSummary> for LineupResponse {
    fn from(summary: LineupSummary) -> Self {
        Self {
            id: summary.id,
            act_size: summary.act_size,
            member_count: summary.member_count,
            travel_eligible: summary.travel_eligible,
            northern_team: summary.northern_team,
        }
    }
}

/// Per-member travel line
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTravelResponse {
    pub member: String,
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<MemberTravelCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl From<MemberTravelLine> for MemberTravelResponse {
    fn from(line: MemberTravelLine) -> Self {
        Self {
            member: line.member,
            postcode: line.postcode,
            cost: line.cost,
            skipped: line.skipped,
        }
    }
}

/// Response for county resolution
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyResponse {
    pub county: String,
    pub source: CountySource,
    pub outcode: Option<String>,
    pub is_northern: bool,
}

/// Response for a single travel quote
#[derive(Debug, Serialize)]
pub struct TravelQuoteResponse {
    pub travel: TravelData,
    pub cost: MemberTravelCost,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
