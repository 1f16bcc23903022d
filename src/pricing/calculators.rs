//! Core pricing calculation functions.
//!
//! Pure functions for fee math - no I/O. The service layer decides which
//! members and which travel policy apply, then calls into these.

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::travel::TravelData;

use super::models::Member;
use super::policy::MuRates;

const METERS_PER_MILE: Decimal = Decimal::from_parts(1_609_344, 0, 0, false, 3);
const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use actbook_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(1396.5), 0), dec!(1397));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Fee a single member adds to the booking.
///
/// The base fee only counts for essential members; essential additional
/// roles are always added on top. `None` when the sum overflows.
pub fn member_total(member: &Member) -> Option<Decimal> {
    let base = if member.is_essential {
        member.fee
    } else {
        Decimal::ZERO
    };
    member
        .additional_roles
        .iter()
        .filter(|r| r.is_essential)
        .try_fold(base, |acc, r| acc.checked_add(r.additional_fee))
}

/// Sum of [`member_total`] over a lineup.
pub fn base_fee_total(members: &[Member]) -> Option<Decimal> {
    members
        .iter()
        .try_fold(Decimal::ZERO, |acc, m| acc.checked_add(member_total(m)?))
}

/// Flat county travel: one fee per travelling member.
pub fn county_travel_fee(per_member_fee: Decimal, eligible_members: usize) -> Option<Decimal> {
    per_member_fee.checked_mul(Decimal::from(eligible_members))
}

/// MU-rate cost breakdown for one member's round trip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTravelCost {
    #[serde(with = "rust_decimal::serde::str")]
    pub miles: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fuel_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub time_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub late_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub toll_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Price a round trip at MU rates.
///
/// Fuel on total miles, time on total hours, tolls from both fares and a
/// late fee when the return leg runs over the threshold. `None` when the
/// legs are too large to price.
pub fn mu_travel_cost(data: &TravelData, rates: &MuRates) -> Option<MemberTravelCost> {
    let meters = data
        .outbound
        .distance_meters
        .checked_add(data.return_trip.distance_meters)?;
    let seconds = data
        .outbound
        .duration_seconds
        .checked_add(data.return_trip.duration_seconds)?;

    let miles = meters.checked_div(METERS_PER_MILE)?;
    let hours = seconds.checked_div(SECONDS_PER_HOUR)?;

    let fuel_fee = miles.checked_mul(rates.fuel_per_mile)?;
    let time_fee = hours.checked_mul(rates.time_per_hour)?;
    let late_fee = if data.return_trip.duration_seconds > rates.late_return_after_secs {
        rates.late_return_fee
    } else {
        Decimal::ZERO
    };
    let toll_fee = data.outbound.fare.checked_add(data.return_trip.fare)?;

    let total = [time_fee, late_fee, toll_fee]
        .into_iter()
        .try_fold(fuel_fee, Decimal::checked_add)?;

    Some(MemberTravelCost {
        miles,
        hours,
        fuel_fee,
        time_fee,
        late_fee,
        toll_fee,
        total,
    })
}

/// Result of applying the margin multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct MarginResult {
    pub before_margin: Decimal,
    pub total: Decimal,
    pub margin_added: Decimal,
}

/// `round((base + travel) * multiplier)` to whole currency units.
pub fn apply_margin(
    base_fee_total: Decimal,
    travel_fee_total: Decimal,
    multiplier: Decimal,
) -> Option<MarginResult> {
    let before_margin = base_fee_total.checked_add(travel_fee_total)?;
    let total = round_money(before_margin.checked_mul(multiplier)?, 0);
    Some(MarginResult {
        before_margin,
        total,
        margin_added: total.checked_sub(before_margin)?,
    })
}
