//! Typed act models used by the pricing engine.
//!
//! These are built from the marketplace's JSON act documents via
//! `from_document`/`from_value`. All shape tolerance lives in those
//! constructors; the fields themselves are plain typed values.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::coerce::{decimal_or_zero, document_id, parse_decimal, string_field, truthy_field};

/// Field paths that mark an act as a test listing.
const TEST_FLAG_PATHS: &[&str] = &[
    "/isTest",
    "/is_test",
    "/testAct",
    "/pricing/isTest",
    "/meta/isTest",
    "/flags/isTest",
];

/// Act document reduced to the fields pricing needs
#[derive(Debug, Clone, Default)]
pub struct Act {
    pub id: Option<String>,
    pub name: Option<String>,
    pub lineups: Vec<Lineup>,
    pub county_fees: CountyFeeTable,
    pub use_county_travel_fee: bool,
    pub cost_per_mile: Decimal,
    pub use_different_team_for_northern_gigs: bool,
    pub northern_team: Vec<Member>,
    /// Configured multiplier, if the document carries a usable one.
    pub margin_multiplier: Option<Decimal>,
    pub is_test: bool,
}

impl Act {
    /// Build an act from a stored document. Returns `None` for non-objects.
    pub fn from_document(doc: &Value) -> Option<Self> {
        let obj = doc.as_object()?;

        let lineups = obj
            .get("lineups")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Lineup::from_value).collect())
            .unwrap_or_default();

        let northern_team = members_from(obj.get("northernTeam"));

        // pricing.marginMultiplier wins over the top-level field
        let margin_multiplier = [
            doc.pointer("/pricing/marginMultiplier"),
            obj.get("marginMultiplier"),
        ]
        .into_iter()
        .flatten()
        .filter_map(parse_decimal)
        .find(|m| *m > Decimal::ZERO);

        let is_test = TEST_FLAG_PATHS
            .iter()
            .any(|path| truthy_field(doc.pointer(path)));

        Some(Self {
            id: document_id(obj.get("_id")).or_else(|| document_id(obj.get("id"))),
            name: string_field(obj.get("tscName")).or_else(|| string_field(obj.get("name"))),
            lineups,
            county_fees: obj
                .get("countyFees")
                .map(CountyFeeTable::from_value)
                .unwrap_or_default(),
            use_county_travel_fee: truthy_field(obj.get("useCountyTravelFee")),
            cost_per_mile: decimal_or_zero(obj.get("costPerMile")),
            use_different_team_for_northern_gigs: truthy_field(
                obj.get("useDifferentTeamForNorthernGigs"),
            ),
            northern_team,
            margin_multiplier,
            is_test,
        })
    }

    /// Lineup with the fewest band members; the first one wins a tie.
    pub fn smallest_lineup(&self) -> Option<&Lineup> {
        self.lineups.iter().min_by_key(|l| l.band_members.len())
    }

    /// Lineup by its stored id.
    pub fn lineup_by_id(&self, id: &str) -> Option<&Lineup> {
        self.lineups
            .iter()
            .find(|l| l.id.as_deref() == Some(id.trim()))
    }
}

/// A priced configuration of the act (e.g. "4-Piece")
#[derive(Debug, Clone, Default)]
pub struct Lineup {
    pub id: Option<String>,
    pub act_size: String,
    pub band_members: Vec<Member>,
}

impl Lineup {
    /// Parse a lineup. Anything without a `bandMembers` array is not a lineup.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let members = obj.get("bandMembers")?.as_array()?;

        Some(Self {
            id: document_id(obj.get("_id")).or_else(|| document_id(obj.get("lineupId"))),
            act_size: string_field(obj.get("actSize")).unwrap_or_default(),
            band_members: members.iter().filter_map(Member::from_value).collect(),
        })
    }
}

/// A performer or crew entry in a lineup
#[derive(Debug, Clone, Default)]
pub struct Member {
    pub first_name: Option<String>,
    pub instrument: Option<String>,
    pub title: Option<String>,
    pub is_essential: bool,
    pub fee: Decimal,
    pub additional_roles: Vec<Role>,
    pub postcode: Option<String>,
}

impl Member {
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let additional_roles = obj
            .get("additionalRoles")
            .and_then(Value::as_array)
            .map(|roles| roles.iter().filter_map(Role::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            first_name: string_field(obj.get("firstName")),
            instrument: string_field(obj.get("instrument")),
            title: string_field(obj.get("title")),
            is_essential: truthy_field(obj.get("isEssential")),
            fee: decimal_or_zero(obj.get("fee")),
            additional_roles,
            postcode: string_field(obj.get("postCode"))
                .or_else(|| string_field(obj.get("postcode"))),
        })
    }

    /// Managers travel on their own account and are never travel-eligible.
    pub fn is_manager_like(&self) -> bool {
        [self.instrument.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| {
                let text = text.to_lowercase();
                text.contains("manager") || text.contains("management")
            })
    }

    /// Short label for logs and breakdowns.
    pub fn label(&self) -> String {
        match (&self.first_name, &self.instrument) {
            (Some(name), Some(instrument)) => format!("{} ({})", name, instrument),
            (Some(name), None) => name.clone(),
            (None, Some(instrument)) => instrument.clone(),
            (None, None) => "member".to_string(),
        }
    }
}

/// Extra duty a member can cover (e.g. sound engineering)
#[derive(Debug, Clone, Default)]
pub struct Role {
    pub role: String,
    pub is_essential: bool,
    pub additional_fee: Decimal,
}

impl Role {
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            role: string_field(obj.get("role")).unwrap_or_default(),
            is_essential: truthy_field(obj.get("isEssential")),
            additional_fee: decimal_or_zero(obj.get("additionalFee")),
        })
    }
}

fn members_from(value: Option<&Value>) -> Vec<Member> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Member::from_value).collect())
        .unwrap_or_default()
}

/// Per-member flat travel fee by county, keyed by normalised county name
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountyFeeTable(HashMap<String, Decimal>);

impl CountyFeeTable {
    /// Load from any of the stored shapes:
    /// `{"Kent": 50}`, `[["Kent", 50]]` or `[{"county": "Kent", "fee": 50}]`.
    pub fn from_value(value: &Value) -> Self {
        let mut table = HashMap::new();

        match value {
            Value::Object(map) => {
                for (county, fee) in map {
                    table.insert(normalize_county(county), parse_decimal(fee));
                }
            }
            Value::Array(entries) => {
                for entry in entries {
                    let pair = match entry {
                        Value::Array(pair) if pair.len() == 2 => {
                            pair[0].as_str().map(|c| (c, &pair[1]))
                        }
                        Value::Object(obj) => obj
                            .get("county")
                            .and_then(Value::as_str)
                            .zip(obj.get("fee")),
                        _ => None,
                    };
                    if let Some((county, fee)) = pair {
                        table.insert(normalize_county(county), parse_decimal(fee));
                    }
                }
            }
            _ => {}
        }

        Self(
            table
                .into_iter()
                .filter_map(|(county, fee)| Some((county, fee?)))
                .filter(|(county, _)| !county.is_empty())
                .collect(),
        )
    }

    /// Fee for a county name in any casing/spacing.
    pub fn fee_for(&self, county: &str) -> Option<Decimal> {
        self.0.get(&normalize_county(county)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for CountyFeeTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(county, fee)| (normalize_county(county.as_ref()), fee))
                .collect(),
        )
    }
}

/// Lowercase, trim and collapse inner whitespace.
pub fn normalize_county(county: &str) -> String {
    county
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
