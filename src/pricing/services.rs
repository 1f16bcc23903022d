//! Act pricing service.
//!
//! Resolves the lineup, county and travel policy for a booking enquiry,
//! prices travel (county flat fee or MU-rate lookups through a
//! [`DistanceClient`]) and applies the act's margin.

use chrono::NaiveDate;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::travel::{DistanceClient, TravelClientError, TravelData};

use super::calculators::{
    apply_margin, base_fee_total, county_travel_fee, mu_travel_cost, MemberTravelCost,
};
use super::county::{is_northern_county, resolve_county, CountyResolution, SelectedAddress};
use super::models::{Act, Lineup, Member};
use super::policy::{select_travel_policy, MuRates, PolicyInputs, PricingPolicy, TravelDecision};
use super::trace::DecisionTrace;

/// Which lineup to price
#[derive(Debug, Clone, Default)]
pub enum LineupSelection {
    /// Fewest band members
    #[default]
    Smallest,
    ById(String),
    Explicit(Lineup),
    /// The caller sent something that isn't a lineup
    Invalid,
}

/// Everything about the enquiry except the act itself
#[derive(Debug, Clone, Default)]
pub struct PricingInput {
    pub selected_county: Option<String>,
    pub selected_address: Option<SelectedAddress>,
    pub event_date: Option<NaiveDate>,
    pub lineup: LineupSelection,
}

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("No act supplied")]
    MissingAct,

    #[error("No usable lineup: {0}")]
    MissingLineup(String),

    #[error("{0} out of range")]
    Overflow(&'static str),
}

/// Lineup that was priced
#[derive(Debug, Clone, PartialEq)]
pub struct LineupSummary {
    pub id: Option<String>,
    pub act_size: String,
    pub member_count: usize,
    pub travel_eligible: usize,
    pub northern_team: bool,
}

/// Travel outcome for one member on the MU path
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTravelLine {
    pub member: String,
    pub postcode: Option<String>,
    pub cost: Option<MemberTravelCost>,
    pub skipped: Option<String>,
}

/// Result of act pricing
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    /// `None` when no lineup could be priced
    pub total: Option<Decimal>,
    pub travel_calculated: bool,
    pub decision: Option<TravelDecision>,
    pub base_fee_total: Decimal,
    pub travel_fee_total: Decimal,
    pub margin_multiplier: Decimal,
    pub before_margin_subtotal: Decimal,
    pub margin_added_approx: Decimal,
    pub forced_test_price: bool,
    pub county: Option<CountyResolution>,
    pub lineup: Option<LineupSummary>,
    pub travel_breakdown: Vec<MemberTravelLine>,
    pub trace: DecisionTrace,
}

impl PricingResult {
    fn empty(total: Option<Decimal>, margin_multiplier: Decimal, trace: DecisionTrace) -> Self {
        Self {
            total,
            travel_calculated: false,
            decision: None,
            base_fee_total: Decimal::ZERO,
            travel_fee_total: Decimal::ZERO,
            margin_multiplier,
            before_margin_subtotal: Decimal::ZERO,
            margin_added_approx: Decimal::ZERO,
            forced_test_price: false,
            county: None,
            lineup: None,
            travel_breakdown: vec![],
            trace,
        }
    }

    /// Zero price, used when there is no act to price.
    pub fn zeroed(margin_multiplier: Decimal, trace: DecisionTrace) -> Self {
        Self::empty(Some(Decimal::ZERO), margin_multiplier, trace)
    }

    /// No price at all, used when the act has no usable lineup or its
    /// numbers cannot be priced.
    pub fn unpriced(margin_multiplier: Decimal, trace: DecisionTrace) -> Self {
        Self::empty(None, margin_multiplier, trace)
    }

    /// Nominal price for test listings.
    pub fn forced_test(price: Decimal, margin_multiplier: Decimal, trace: DecisionTrace) -> Self {
        Self {
            forced_test_price: true,
            ..Self::empty(Some(price), margin_multiplier, trace)
        }
    }
}

/// Price an act for an enquiry.
///
/// Fails only when there is no act or no usable lineup; everything else
/// (unresolvable county, failed travel lookups, bad numbers) degrades to a
/// price with the reason recorded in the trace.
pub async fn price_act<C>(
    client: &C,
    policy: &PricingPolicy,
    act: Option<&Act>,
    input: &PricingInput,
) -> Result<PricingResult, PricingError>
where
    C: DistanceClient + ?Sized,
{
    let act = act.ok_or(PricingError::MissingAct)?;
    let mut trace = DecisionTrace::new();
    let margin_multiplier = act
        .margin_multiplier
        .unwrap_or(policy.default_margin_multiplier);

    if act.is_test {
        trace.info("test_act", format!("test act, forcing price {}", policy.test_act_price));
        return Ok(PricingResult::forced_test(
            policy.test_act_price,
            margin_multiplier,
            trace,
        ));
    }

    let lineup = select_lineup(act, &input.lineup)?;
    trace.info(
        "lineup",
        format!(
            "pricing lineup '{}' with {} member(s)",
            lineup.act_size,
            lineup.band_members.len()
        ),
    );

    let county = resolve_county(
        input.selected_county.as_deref(),
        input.selected_address.as_ref(),
    );
    if county.is_resolved() {
        trace.info(
            "county",
            format!("resolved '{}' from {:?}", county.county, county.source),
        );
    } else {
        trace.info("county", "no county resolved");
    }

    let (members, northern_team) = pricing_members(act, lineup, &county, &mut trace);
    let eligible: Vec<&Member> = members.iter().filter(|m| !m.is_manager_like()).collect();
    let base_fees = base_fee_total(members).ok_or(PricingError::Overflow("base fee total"))?;

    let county_fee = if county.is_resolved() {
        act.county_fees.fee_for(&county.county)
    } else {
        None
    };
    let outcome = select_travel_policy(&PolicyInputs {
        use_county_travel_fee: act.use_county_travel_fee,
        county: &county.county,
        county_fee,
        eligible_members: eligible.len(),
    });
    match outcome.fallback {
        None => trace.info(
            "decision",
            format!("county rate {} per member", outcome.county_fee),
        ),
        Some(reason) => trace.info("decision", format!("mu ({})", reason)),
    }

    let travel = match outcome.decision {
        TravelDecision::County => TravelOutcome {
            total: county_travel_fee(outcome.county_fee, eligible.len())
                .ok_or(PricingError::Overflow("county travel fee"))?,
            calculated: true,
            breakdown: vec![],
        },
        TravelDecision::Mu => {
            mu_travel(client, &policy.mu_rates, act, &eligible, input, &mut trace).await
        }
    };

    let margin = apply_margin(base_fees, travel.total, margin_multiplier)
        .ok_or(PricingError::Overflow("margin total"))?;
    trace.info(
        "margin",
        format!(
            "({} + {}) x {} = {}",
            base_fees, travel.total, margin_multiplier, margin.total
        ),
    );

    info!(
        act = act.id.as_deref().unwrap_or("-"),
        decision = ?outcome.decision,
        total = %margin.total,
        "Priced act"
    );

    Ok(PricingResult {
        total: Some(margin.total),
        travel_calculated: travel.calculated,
        decision: Some(outcome.decision),
        base_fee_total: base_fees,
        travel_fee_total: travel.total,
        margin_multiplier,
        before_margin_subtotal: margin.before_margin,
        margin_added_approx: margin.margin_added,
        forced_test_price: false,
        lineup: Some(LineupSummary {
            id: lineup.id.clone(),
            act_size: lineup.act_size.clone(),
            member_count: members.len(),
            travel_eligible: eligible.len(),
            northern_team,
        }),
        county: Some(county),
        travel_breakdown: travel.breakdown,
        trace,
    })
}

/// Fail-soft pricing for display paths.
///
/// A missing act prices at zero and a missing lineup prices at `None`;
/// neither is an error to the caller.
pub async fn calculate_act_pricing<C>(
    client: &C,
    policy: &PricingPolicy,
    act: Option<&Act>,
    input: &PricingInput,
) -> PricingResult
where
    C: DistanceClient + ?Sized,
{
    let margin_multiplier = act
        .and_then(|a| a.margin_multiplier)
        .unwrap_or(policy.default_margin_multiplier);

    match price_act(client, policy, act, input).await {
        Ok(result) => result,
        Err(err) => {
            warn!("Act pricing fell back: {}", err);
            let mut trace = DecisionTrace::new();
            trace.warn("error", err.to_string());
            match err {
                PricingError::MissingAct => PricingResult::zeroed(margin_multiplier, trace),
                PricingError::MissingLineup(_) | PricingError::Overflow(_) => {
                    PricingResult::unpriced(margin_multiplier, trace)
                }
            }
        }
    }
}

fn select_lineup<'a>(act: &'a Act, selection: &'a LineupSelection) -> Result<&'a Lineup, PricingError> {
    match selection {
        LineupSelection::Smallest => act
            .smallest_lineup()
            .ok_or_else(|| PricingError::MissingLineup("act has no lineups".to_string())),
        LineupSelection::ById(id) => act
            .lineup_by_id(id)
            .ok_or_else(|| PricingError::MissingLineup(format!("lineup {} not found", id))),
        LineupSelection::Explicit(lineup) => Ok(lineup),
        LineupSelection::Invalid => Err(PricingError::MissingLineup(
            "supplied lineup is malformed".to_string(),
        )),
    }
}

/// Members to price: the northern team for northern gigs when the act has
/// one, otherwise the lineup's band members.
fn pricing_members<'a>(
    act: &'a Act,
    lineup: &'a Lineup,
    county: &CountyResolution,
    trace: &mut DecisionTrace,
) -> (&'a [Member], bool) {
    if act.use_different_team_for_northern_gigs && is_northern_county(&county.county) {
        if act.northern_team.is_empty() {
            trace.warn(
                "northern_team",
                format!("'{}' is northern but the act has no northern team", county.county),
            );
        } else {
            trace.info(
                "northern_team",
                format!(
                    "'{}' is northern, using northern team of {}",
                    county.county,
                    act.northern_team.len()
                ),
            );
            return (&act.northern_team, true);
        }
    }
    (&lineup.band_members, false)
}

struct TravelOutcome {
    total: Decimal,
    calculated: bool,
    breakdown: Vec<MemberTravelLine>,
}

impl TravelOutcome {
    fn skipped() -> Self {
        Self {
            total: Decimal::ZERO,
            calculated: false,
            breakdown: vec![],
        }
    }
}

/// MU-rate travel for every eligible member with a postcode.
///
/// Lookups run concurrently; results are summed in member order. A failed
/// lookup skips that member only.
async fn mu_travel<C>(
    client: &C,
    rates: &MuRates,
    act: &Act,
    eligible: &[&Member],
    input: &PricingInput,
    trace: &mut DecisionTrace,
) -> TravelOutcome
where
    C: DistanceClient + ?Sized,
{
    let destination = input
        .selected_address
        .as_ref()
        .and_then(SelectedAddress::destination);
    let (Some(destination), Some(date)) = (destination, input.event_date) else {
        trace.warn("travel", "missing destination or event date, travel not calculated");
        return TravelOutcome::skipped();
    };

    if act.cost_per_mile > Decimal::ZERO {
        trace.info(
            "travel",
            format!("act costPerMile {} noted, MU rates apply", act.cost_per_mile),
        );
    }

    let destination = destination.as_str();
    let lookups = eligible.iter().map(|member| async move {
        let result: Option<Result<TravelData, TravelClientError>> = match member.postcode.as_deref() {
            Some(origin) => Some(client.travel_data(origin, destination, date).await),
            None => None,
        };
        (*member, result)
    });
    let results = join_all(lookups).await;

    let mut total = Decimal::ZERO;
    let mut priced = 0usize;
    let mut breakdown = Vec::with_capacity(results.len());

    for (member, result) in results {
        let label = member.label();
        let line = match result {
            None => {
                trace.warn("travel", format!("{} has no postcode, skipped", label));
                MemberTravelLine {
                    member: label,
                    postcode: None,
                    cost: None,
                    skipped: Some("no postcode".to_string()),
                }
            }
            Some(Err(err)) => {
                trace.warn("travel", format!("lookup failed for {}: {}", label, err));
                MemberTravelLine {
                    member: label,
                    postcode: member.postcode.clone(),
                    cost: None,
                    skipped: Some(err.to_string()),
                }
            }
            Some(Ok(data)) => {
                let priced_cost = mu_travel_cost(&data, rates)
                    .and_then(|cost| Some((total.checked_add(cost.total)?, cost)));
                match priced_cost {
                    Some((running, cost)) => {
                        total = running;
                        priced += 1;
                        MemberTravelLine {
                            member: label,
                            postcode: member.postcode.clone(),
                            cost: Some(cost),
                            skipped: None,
                        }
                    }
                    None => {
                        trace.warn(
                            "travel",
                            format!("travel cost for {} out of range, skipped", label),
                        );
                        MemberTravelLine {
                            member: label,
                            postcode: member.postcode.clone(),
                            cost: None,
                            skipped: Some("travel cost out of range".to_string()),
                        }
                    }
                }
            }
        };
        breakdown.push(line);
    }

    trace.info(
        "travel",
        format!("mu travel {} for {} of {} member(s)", total, priced, eligible.len()),
    );

    TravelOutcome {
        total,
        calculated: priced > 0,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    use crate::pricing::county::CountySource;
    use crate::pricing::trace::TraceLevel;
    use crate::travel::TravelLeg;

    /// Returns fixed legs per origin postcode; unknown origins fail.
    #[derive(Default)]
    struct StubDistance {
        legs: HashMap<String, TravelData>,
        calls: AtomicUsize,
    }

    impl StubDistance {
        fn with(mut self, origin: &str, meters: Decimal, out_secs: Decimal, back_secs: Decimal, fare: Decimal) -> Self {
            self.legs.insert(
                origin.to_string(),
                TravelData {
                    outbound: TravelLeg {
                        distance_meters: meters,
                        duration_seconds: out_secs,
                        fare,
                    },
                    return_trip: TravelLeg {
                        distance_meters: meters,
                        duration_seconds: back_secs,
                        fare: Decimal::ZERO,
                    },
                },
            );
            self
        }
    }

    #[async_trait]
    impl DistanceClient for StubDistance {
        async fn travel_data(
            &self,
            origin: &str,
            _destination: &str,
            _date: NaiveDate,
        ) -> Result<TravelData, TravelClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.legs
                .get(origin)
                .cloned()
                .ok_or(TravelClientError::Status(503))
        }
    }

    fn member(name: &str, fee: i64, postcode: Option<&str>) -> Value {
        json!({
            "firstName": name,
            "instrument": "Vocals",
            "isEssential": true,
            "fee": fee,
            "postCode": postcode
        })
    }

    /// Three essential members at 300 each plus a non-essential manager.
    fn kent_act() -> Value {
        json!({
            "_id": "act-1",
            "useCountyTravelFee": true,
            "countyFees": {"kent": 50},
            "lineups": [{
                "_id": "trio",
                "actSize": "3-Piece",
                "bandMembers": [
                    member("Ann", 300, Some("ME14 4AA")),
                    member("Bob", 300, Some("CT1 1AA")),
                    member("Cat", 300, None),
                    {"firstName": "Max", "title": "Manager", "isEssential": false, "fee": 500}
                ]
            }]
        })
    }

    fn act(doc: Value) -> Act {
        Act::from_document(&doc).unwrap()
    }

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 6, 20)
    }

    fn address(text: &str) -> Option<SelectedAddress> {
        Some(SelectedAddress::Text(text.to_string()))
    }

    #[tokio::test]
    async fn test_county_path_scenario() {
        let act = act(kent_act());
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };
        let stub = StubDistance::default();

        let result = price_act(&stub, &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        assert_eq!(result.decision, Some(TravelDecision::County));
        assert_eq!(result.base_fee_total, dec!(900));
        assert_eq!(result.travel_fee_total, dec!(150));
        assert_eq!(result.margin_multiplier, dec!(1.33));
        assert_eq!(result.before_margin_subtotal, dec!(1050));
        assert_eq!(result.total, Some(dec!(1397)));
        assert_eq!(result.margin_added_approx, dec!(347));
        assert!(result.travel_calculated);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);

        let lineup = result.lineup.unwrap();
        assert_eq!(lineup.member_count, 4);
        assert_eq!(lineup.travel_eligible, 3);
    }

    #[tokio::test]
    async fn test_county_resolved_from_outcode() {
        let act = act(kent_act());
        let input = PricingInput {
            selected_address: address("The Barn, Maidstone ME14 4AA"),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        assert_eq!(result.decision, Some(TravelDecision::County));
        assert_eq!(result.county.unwrap().source, CountySource::Outcode);
        assert_eq!(result.travel_fee_total, dec!(150));
    }

    #[tokio::test]
    async fn test_mu_fallback_without_destination_or_date() {
        let act = act(kent_act());
        let input = PricingInput {
            selected_address: address("Flat 2, Main St"),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        assert_eq!(result.decision, Some(TravelDecision::Mu));
        assert!(!result.travel_calculated);
        assert_eq!(result.travel_fee_total, dec!(0));
        // round(900 * 1.33) = 1197
        assert_eq!(result.total, Some(dec!(1197)));
        assert!(result.trace.has_warnings());
    }

    #[tokio::test]
    async fn test_mu_path_prices_each_member() {
        let mut doc = kent_act();
        doc["useCountyTravelFee"] = json!(false);
        let act = act(doc);
        // Ann: 10 miles each way, 30 min out, 70 min back (late), 2.50 toll
        // Bob: lookup fails; Cat: no postcode
        let stub = StubDistance::default().with(
            "ME14 4AA",
            dec!(16093.44),
            dec!(1800),
            dec!(4200),
            dec!(2.50),
        );
        let input = PricingInput {
            selected_address: address("Hall Lane, Preston PR1 2AA"),
            event_date: date(),
            ..Default::default()
        };

        let result = price_act(&stub, &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        // fuel 20 * 0.56 = 11.20; time 1.6666.. h * 13.23 = 22.05; late 136; toll 2.50
        let ann = result.travel_breakdown[0].cost.as_ref().unwrap();
        assert_eq!(ann.fuel_fee, dec!(11.20));
        assert_eq!(ann.late_fee, dec!(136));
        assert_eq!(ann.toll_fee, dec!(2.50));
        assert_eq!(result.travel_fee_total, ann.total);

        assert!(result.travel_breakdown[1].skipped.is_some());
        assert_eq!(result.travel_breakdown[2].skipped.as_deref(), Some("no postcode"));
        // Manager is not travel-eligible
        assert_eq!(result.travel_breakdown.len(), 3);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);

        assert_eq!(result.decision, Some(TravelDecision::Mu));
        assert!(result.travel_calculated);
        assert_eq!(
            result.total,
            Some(crate::pricing::round_money(
                (dec!(900) + result.travel_fee_total) * dec!(1.33),
                0
            ))
        );
    }

    #[tokio::test]
    async fn test_mu_all_lookups_fail_is_not_calculated() {
        let mut doc = kent_act();
        doc["useCountyTravelFee"] = json!("no");
        let act = act(doc);
        let input = PricingInput {
            selected_address: address("PR1 2AA"),
            event_date: date(),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        assert!(!result.travel_calculated);
        assert_eq!(result.travel_fee_total, dec!(0));
        assert_eq!(result.total, Some(dec!(1197)));
    }

    #[tokio::test]
    async fn test_zero_county_fee_falls_back_to_mu() {
        let mut doc = kent_act();
        doc["countyFees"] = json!({"kent": 0});
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();
        assert_eq!(result.decision, Some(TravelDecision::Mu));
    }

    #[tokio::test]
    async fn test_test_act_short_circuits() {
        let mut doc = kent_act();
        doc["meta"] = json!({"isTest": "yes"});
        doc["lineups"] = json!([]);
        let act = act(doc);

        let result = price_act(
            &StubDistance::default(),
            &PricingPolicy::default(),
            Some(&act),
            &PricingInput::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.total, Some(dec!(0.50)));
        assert!(result.forced_test_price);
        assert_eq!(result.decision, None);
    }

    #[tokio::test]
    async fn test_northern_team_substitution() {
        let mut doc = kent_act();
        doc["useDifferentTeamForNorthernGigs"] = json!(true);
        doc["countyFees"] = json!({"Lancashire": 80});
        doc["northernTeam"] = json!([
            member("Nia", 400, Some("PR1 1AA")),
            member("Ned", 400, Some("BB1 1AA"))
        ]);
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Lancashire".to_string()),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();

        assert_eq!(result.base_fee_total, dec!(800));
        assert_eq!(result.travel_fee_total, dec!(160));
        let lineup = result.lineup.unwrap();
        assert!(lineup.northern_team);
        assert_eq!(lineup.member_count, 2);
        // round(960 * 1.33) = round(1276.8)
        assert_eq!(result.total, Some(dec!(1277)));
    }

    #[tokio::test]
    async fn test_northern_flag_ignored_for_southern_county() {
        let mut doc = kent_act();
        doc["useDifferentTeamForNorthernGigs"] = json!(true);
        doc["northernTeam"] = json!([member("Nia", 400, None)]);
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();
        assert_eq!(result.base_fee_total, dec!(900));
        assert!(!result.lineup.unwrap().northern_team);
    }

    #[tokio::test]
    async fn test_custom_margin_multiplier() {
        let mut doc = kent_act();
        doc["pricing"] = json!({"marginMultiplier": "1.5"});
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };

        let result = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap();
        assert_eq!(result.margin_multiplier, dec!(1.5));
        assert_eq!(result.total, Some(dec!(1575)));
    }

    #[tokio::test]
    async fn test_lineup_selection() {
        let mut doc = kent_act();
        doc["lineups"]
            .as_array_mut()
            .unwrap()
            .push(json!({"_id": "duo", "actSize": "Duo", "bandMembers": [member("Dee", 200, None)]}));
        let act = act(doc);
        let stub = StubDistance::default();
        let policy = PricingPolicy::default();

        let smallest = price_act(&stub, &policy, Some(&act), &PricingInput::default())
            .await
            .unwrap();
        assert_eq!(smallest.lineup.unwrap().act_size, "Duo");

        let by_id = PricingInput {
            lineup: LineupSelection::ById("trio".to_string()),
            ..Default::default()
        };
        let result = price_act(&stub, &policy, Some(&act), &by_id).await.unwrap();
        assert_eq!(result.base_fee_total, dec!(900));

        let missing = PricingInput {
            lineup: LineupSelection::ById("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            price_act(&stub, &policy, Some(&act), &missing).await,
            Err(PricingError::MissingLineup(_))
        ));
    }

    #[tokio::test]
    async fn test_fail_soft_results() {
        let stub = StubDistance::default();
        let policy = PricingPolicy::default();

        let no_act = calculate_act_pricing(&stub, &policy, None, &PricingInput::default()).await;
        assert_eq!(no_act.total, Some(dec!(0)));
        assert!(!no_act.travel_calculated);

        let empty = act(json!({"lineups": []}));
        let no_lineup =
            calculate_act_pricing(&stub, &policy, Some(&empty), &PricingInput::default()).await;
        assert_eq!(no_lineup.total, None);
        assert!(!no_lineup.travel_calculated);

        let invalid = PricingInput {
            lineup: LineupSelection::Invalid,
            ..Default::default()
        };
        let result = calculate_act_pricing(&stub, &policy, Some(&act(kent_act())), &invalid).await;
        assert_eq!(result.total, None);
    }

    #[tokio::test]
    async fn test_pricing_is_idempotent() {
        let mut doc = kent_act();
        doc["useCountyTravelFee"] = json!(false);
        let act = act(doc);
        let stub = StubDistance::default()
            .with("ME14 4AA", dec!(20000), dec!(1500), dec!(1500), dec!(0))
            .with("CT1 1AA", dec!(40000), dec!(2500), dec!(3700), dec!(1.2));
        let input = PricingInput {
            selected_address: address("PR1 2AA"),
            event_date: date(),
            ..Default::default()
        };
        let policy = PricingPolicy::default();

        let first = calculate_act_pricing(&stub, &policy, Some(&act), &input).await;
        let second = calculate_act_pricing(&stub, &policy, Some(&act), &input).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_oversized_fee_prices_to_null() {
        let mut doc = kent_act();
        doc["lineups"][0]["bandMembers"] = json!([
            member("Ann", 300, Some("ME14 4AA")),
            {"isEssential": true, "fee": "79228162514264337593543950335"}
        ]);
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };

        let err = price_act(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
            .await
            .unwrap_err();
        assert_eq!(err, PricingError::Overflow("base fee total"));

        let result =
            calculate_act_pricing(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
                .await;
        assert_eq!(result.total, None);
        assert!(!result.travel_calculated);
        assert_eq!(result.trace.find("error").unwrap().level, TraceLevel::Warn);
    }

    #[tokio::test]
    async fn test_oversized_margin_prices_to_null() {
        let mut doc = kent_act();
        doc["pricing"] = json!({"marginMultiplier": "79228162514264337593543950335"});
        let act = act(doc);
        let input = PricingInput {
            selected_county: Some("Kent".to_string()),
            ..Default::default()
        };

        let result =
            calculate_act_pricing(&StubDistance::default(), &PricingPolicy::default(), Some(&act), &input)
                .await;
        assert_eq!(result.total, None);
        assert!(result.trace.find("error").unwrap().detail.contains("margin total"));
    }

    #[tokio::test]
    async fn test_oversized_travel_leg_skips_member() {
        let mut doc = kent_act();
        doc["useCountyTravelFee"] = json!(false);
        let act = act(doc);
        let stub = StubDistance::default()
            .with("ME14 4AA", Decimal::MAX, dec!(1800), dec!(1800), dec!(0))
            .with("CT1 1AA", dec!(16093.44), dec!(1800), dec!(1800), dec!(0));
        let input = PricingInput {
            selected_address: address("PR1 2AA"),
            event_date: date(),
            ..Default::default()
        };

        let result = calculate_act_pricing(&stub, &PricingPolicy::default(), Some(&act), &input).await;

        assert_eq!(
            result.travel_breakdown[0].skipped.as_deref(),
            Some("travel cost out of range")
        );
        assert!(result.travel_breakdown[1].cost.is_some());
        assert!(result.travel_calculated);
        // Bob only: 20 miles * 0.56 + 1 hour * 13.23
        assert_eq!(result.travel_fee_total, dec!(24.43));
        assert!(result.trace.has_warnings());
    }

    #[test]
    fn test_pricing_error_display() {
        assert!(PricingError::MissingAct.to_string().contains("act"));
        assert!(PricingError::MissingLineup("lineup x not found".to_string())
            .to_string()
            .contains("lineup x"));
    }
}
