//! County resolution from a selected county and/or event address.
//!
//! Precedence: explicit county > structured address county > county derived
//! from the postcode outcode > empty. An empty county means county travel
//! pricing cannot apply.

use serde::{Deserialize, Serialize};

use super::models::normalize_county;
use super::regions::{NORTHERN_COUNTIES, OUTCODE_GROUPS};

/// Event address as sent by the booking form: free text or structured parts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SelectedAddress {
    Text(String),
    Structured(AddressParts),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddressParts {
    #[serde(default, alias = "line1", alias = "addressLine1")]
    pub address: Option<String>,
    #[serde(default, alias = "addressLine2")]
    pub line2: Option<String>,
    #[serde(default, alias = "city")]
    pub town: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, alias = "postCode", alias = "postalCode")]
    pub postcode: Option<String>,
}

impl SelectedAddress {
    /// The whole address as one comma-separated line.
    pub fn text(&self) -> String {
        match self {
            SelectedAddress::Text(text) => text.trim().to_string(),
            SelectedAddress::Structured(parts) => [
                &parts.address,
                &parts.line2,
                &parts.town,
                &parts.county,
                &parts.postcode,
            ]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        }
    }

    /// Postcode, preferring an explicit postcode field over the free text.
    pub fn postcode(&self) -> Option<Postcode> {
        if let SelectedAddress::Structured(AddressParts {
            postcode: Some(pc), ..
        }) = self
        {
            if let Some(found) = extract_postcode(pc) {
                return Some(found);
            }
        }
        extract_postcode(&self.text())
    }

    /// Destination for travel lookups: full postcode if one is present,
    /// otherwise the address text.
    pub fn destination(&self) -> Option<String> {
        if let Some(Postcode {
            outcode,
            inward: Some(inward),
        }) = self.postcode()
        {
            return Some(format!("{} {}", outcode, inward));
        }
        let text = self.text();
        (!text.is_empty()).then_some(text)
    }
}

/// A UK postcode found in free text. `inward` is missing for bare outcodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postcode {
    pub outcode: String,
    pub inward: Option<String>,
}

/// Where a resolved county came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountySource {
    Explicit,
    AddressField,
    Outcode,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyResolution {
    /// Empty when nothing resolved
    pub county: String,
    pub source: CountySource,
    pub outcode: Option<String>,
}

impl CountyResolution {
    pub fn is_resolved(&self) -> bool {
        !self.county.is_empty()
    }
}

/// Resolve the event county from an explicit county and/or the event address.
pub fn resolve_county(
    explicit: Option<&str>,
    address: Option<&SelectedAddress>,
) -> CountyResolution {
    let outcode = address.and_then(|a| a.postcode()).map(|pc| pc.outcode);

    let (county, source) = if let Some(county) = explicit.and_then(sanitize_county) {
        (county, CountySource::Explicit)
    } else if let Some(county) = address_county_field(address) {
        (county, CountySource::AddressField)
    } else if let Some(county) = outcode.as_deref().and_then(county_for_outcode) {
        (county.to_string(), CountySource::Outcode)
    } else {
        (String::new(), CountySource::None)
    };

    CountyResolution {
        county,
        source,
        outcode,
    }
}

fn address_county_field(address: Option<&SelectedAddress>) -> Option<String> {
    match address? {
        SelectedAddress::Structured(parts) => parts.county.as_deref().and_then(sanitize_county),
        SelectedAddress::Text(_) => None,
    }
}

/// Clean up a county string. Anything containing a digit is an address
/// fragment, not a county, and is rejected.
pub fn sanitize_county(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':'));
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Find a UK postcode in free text.
///
/// A full postcode (outcode + inward code, spaced or compact) wins over a
/// bare outcode; otherwise the first token shaped like an outcode is used.
pub fn extract_postcode(text: &str) -> Option<Postcode> {
    let upper = text.to_uppercase();
    let tokens: Vec<&str> = upper
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for (i, token) in tokens.iter().enumerate() {
        if parse_outcode(token).is_some() {
            if let Some(next) = tokens.get(i + 1).filter(|t| is_inward(t)) {
                return Some(Postcode {
                    outcode: token.to_string(),
                    inward: Some(next.to_string()),
                });
            }
        } else if (5..=7).contains(&token.len()) {
            let (out, inward) = token.split_at(token.len() - 3);
            if parse_outcode(out).is_some() && is_inward(inward) {
                return Some(Postcode {
                    outcode: out.to_string(),
                    inward: Some(inward.to_string()),
                });
            }
        }
    }

    tokens
        .iter()
        .find(|t| parse_outcode(t).is_some())
        .map(|t| Postcode {
            outcode: t.to_string(),
            inward: None,
        })
}

/// Split an outcode shaped like `[A-Z]{1,2}\d{1,2}[A-Z]?` into area and district.
fn parse_outcode(token: &str) -> Option<(&str, u8)> {
    let letters = token.bytes().take_while(u8::is_ascii_uppercase).count();
    if !(1..=2).contains(&letters) {
        return None;
    }
    let rest = &token[letters..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&digits) {
        return None;
    }
    let suffix = &rest[digits..];
    if suffix.len() > 1 || !suffix.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let district = rest[..digits].parse().ok()?;
    Some((&token[..letters], district))
}

fn is_inward(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_uppercase()
        && bytes[2].is_ascii_uppercase()
}

/// County for an outcode; the first matching county group wins.
pub fn county_for_outcode(outcode: &str) -> Option<&'static str> {
    let upper = outcode.trim().to_uppercase();
    let (area, district) = parse_outcode(&upper)?;
    OUTCODE_GROUPS
        .iter()
        .find(|group| group.spans.iter().any(|s| s.contains(area, district)))
        .map(|group| group.county)
}

/// Whether a county belongs to the northern set (case-insensitive, trimmed).
pub fn is_northern_county(county: &str) -> bool {
    let normalized = normalize_county(county);
    !normalized.is_empty() && NORTHERN_COUNTIES.contains(&normalized.as_str())
}
