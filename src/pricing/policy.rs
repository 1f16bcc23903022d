//! Travel-policy selection and the rate card it prices against.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// MU-style travel rates
#[derive(Debug, Clone, PartialEq)]
pub struct MuRates {
    pub fuel_per_mile: Decimal,
    pub time_per_hour: Decimal,
    /// Charged when the return leg takes longer than `late_return_after_secs`.
    pub late_return_fee: Decimal,
    pub late_return_after_secs: Decimal,
}

impl Default for MuRates {
    fn default() -> Self {
        Self {
            fuel_per_mile: dec!(0.56),
            time_per_hour: dec!(13.23),
            late_return_fee: dec!(136),
            late_return_after_secs: dec!(3600),
        }
    }
}

/// Service-wide pricing settings
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    pub default_margin_multiplier: Decimal,
    pub test_act_price: Decimal,
    pub mu_rates: MuRates,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            default_margin_multiplier: dec!(1.33),
            test_act_price: dec!(0.50),
            mu_rates: MuRates::default(),
        }
    }
}

/// How travel is priced for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelDecision {
    /// Flat per-member fee for the event county
    County,
    /// Distance/time lookups at MU rates
    Mu,
}

/// Why a county request ended up on MU rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    CountyFeesDisabled,
    NoCounty,
    NoCountyFee,
    NoEligibleMembers,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FallbackReason::CountyFeesDisabled => "county travel fees disabled for act",
            FallbackReason::NoCounty => "no county resolved",
            FallbackReason::NoCountyFee => "no county fee configured",
            FallbackReason::NoEligibleMembers => "no travel-eligible members",
        };
        f.write_str(text)
    }
}

/// Inputs to [`select_travel_policy`]
#[derive(Debug, Clone)]
pub struct PolicyInputs<'a> {
    pub use_county_travel_fee: bool,
    pub county: &'a str,
    pub county_fee: Option<Decimal>,
    pub eligible_members: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub decision: TravelDecision,
    /// Per-member fee; zero unless the decision is `County`.
    pub county_fee: Decimal,
    pub fallback: Option<FallbackReason>,
}

/// Pick county or MU travel pricing.
///
/// County pricing survives only when the act opts in, a county resolved,
/// the county has a positive per-member fee and someone is travelling.
pub fn select_travel_policy(inputs: &PolicyInputs<'_>) -> PolicyOutcome {
    let fallback = if !inputs.use_county_travel_fee {
        Some(FallbackReason::CountyFeesDisabled)
    } else if inputs.county.trim().is_empty() {
        Some(FallbackReason::NoCounty)
    } else if inputs.county_fee.map_or(true, |fee| fee <= Decimal::ZERO) {
        Some(FallbackReason::NoCountyFee)
    } else if inputs.eligible_members == 0 {
        Some(FallbackReason::NoEligibleMembers)
    } else {
        None
    };

    match fallback {
        None => PolicyOutcome {
            decision: TravelDecision::County,
            county_fee: inputs.county_fee.unwrap_or(Decimal::ZERO),
            fallback: None,
        },
        Some(reason) => PolicyOutcome {
            decision: TravelDecision::Mu,
            county_fee: Decimal::ZERO,
            fallback: Some(reason),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(flag: bool, county: &str, fee: Option<Decimal>, eligible: usize) -> PolicyInputs<'_> {
        PolicyInputs {
            use_county_travel_fee: flag,
            county,
            county_fee: fee,
            eligible_members: eligible,
        }
    }

    #[test]
    fn test_county_when_everything_lines_up() {
        let outcome = select_travel_policy(&inputs(true, "Kent", Some(dec!(50)), 3));
        assert_eq!(outcome.decision, TravelDecision::County);
        assert_eq!(outcome.county_fee, dec!(50));
        assert_eq!(outcome.fallback, None);
    }

    #[test]
    fn test_mu_when_disabled() {
        let outcome = select_travel_policy(&inputs(false, "Kent", Some(dec!(50)), 3));
        assert_eq!(outcome.decision, TravelDecision::Mu);
        assert_eq!(outcome.fallback, Some(FallbackReason::CountyFeesDisabled));
    }

    #[test]
    fn test_mu_fallbacks() {
        let cases = [
            (inputs(true, "", Some(dec!(50)), 3), FallbackReason::NoCounty),
            (inputs(true, "  ", Some(dec!(50)), 3), FallbackReason::NoCounty),
            (inputs(true, "Kent", None, 3), FallbackReason::NoCountyFee),
            (inputs(true, "Kent", Some(dec!(0)), 3), FallbackReason::NoCountyFee),
            (inputs(true, "Kent", Some(dec!(50)), 0), FallbackReason::NoEligibleMembers),
        ];
        for (input, reason) in cases {
            let outcome = select_travel_policy(&input);
            assert_eq!(outcome.decision, TravelDecision::Mu);
            assert_eq!(outcome.county_fee, Decimal::ZERO);
            assert_eq!(outcome.fallback, Some(reason));
        }
    }

    #[test]
    fn test_default_rates() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.default_margin_multiplier, dec!(1.33));
        assert_eq!(policy.test_act_price, dec!(0.50));
        assert_eq!(policy.mu_rates.fuel_per_mile, dec!(0.56));
        assert_eq!(policy.mu_rates.time_per_hour, dec!(13.23));
        assert_eq!(policy.mu_rates.late_return_fee, dec!(136));
    }

    #[test]
    fn test_decision_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TravelDecision::County).unwrap(), "\"county\"");
        assert_eq!(serde_json::to_string(&TravelDecision::Mu).unwrap(), "\"mu\"");
    }
}
