//! HTTP routes for the pricing API.

use axum::{extract::State, routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::travel::TravelClientError;
use crate::AppState;

use super::calculators::mu_travel_cost;
use super::coerce::parse_event_date;
use super::county::{is_northern_county, resolve_county};
use super::requests::{CalculateActPricingRequest, ResolveCountyRequest, TravelQuoteRequest};
use super::responses::{CountyResponse, PricingResponse, TravelQuoteResponse};
use super::services::calculate_act_pricing;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/act", post(calculate_act))
        .route("/county", post(county))
        .route("/travel", post(travel_quote))
}

/// Price an act. Never fails on bad act data; see `PricingResponse`.
async fn calculate_act(
    State(state): State<AppState>,
    Json(request): Json<CalculateActPricingRequest>,
) -> Json<PricingResponse> {
    let (act, input) = request.into_parts();
    let result = calculate_act_pricing(
        state.distance.as_ref(),
        &state.policy,
        act.as_ref(),
        &input,
    )
    .await;
    Json(result.into())
}

/// Resolve the county for a county string and/or address
async fn county(Json(request): Json<ResolveCountyRequest>) -> Result<Json<CountyResponse>> {
    let has_county = request
        .county
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());
    if !has_county && request.address.is_none() {
        return Err(AppError::BadRequest(
            "county or address is required".to_string(),
        ));
    }

    let resolution = resolve_county(request.county.as_deref(), request.address.as_ref());
    Ok(Json(CountyResponse {
        is_northern: is_northern_county(&resolution.county),
        county: resolution.county,
        source: resolution.source,
        outcode: resolution.outcode,
    }))
}

/// Quote one round trip at MU rates
async fn travel_quote(
    State(state): State<AppState>,
    Json(request): Json<TravelQuoteRequest>,
) -> Result<Json<TravelQuoteResponse>> {
    let origin = request.origin.trim();
    let destination = request.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(AppError::BadRequest(
            "origin and destination are required".to_string(),
        ));
    }
    let date = parse_event_date(&request.date)
        .ok_or_else(|| AppError::BadRequest(format!("invalid date '{}'", request.date)))?;

    let travel = state.distance.travel_data(origin, destination, date).await?;
    let cost = mu_travel_cost(&travel, &state.policy.mu_rates)
        .ok_or(TravelClientError::Malformed("travel cost out of range"))?;

    Ok(Json(TravelQuoteResponse { travel, cost }))
}
