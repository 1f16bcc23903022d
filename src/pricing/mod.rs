//! Act pricing engine.
//!
//! Prices a lineup for a booking enquiry: member base fees, travel (a
//! per-county flat fee or MU-rate distance lookups) and the act's margin.
//! Act documents arrive as loosely-typed JSON and are coerced defensively.

pub mod calculators;
pub mod coerce;
pub mod county;
pub mod models;
pub mod policy;
pub mod regions;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod trace;

// Re-export commonly used items
pub use calculators::round_money;
pub use county::{resolve_county, CountyResolution, SelectedAddress};
pub use models::Act;
pub use policy::{MuRates, PricingPolicy, TravelDecision};
pub use routes::router;
pub use services::{calculate_act_pricing, price_act, PricingError, PricingInput, PricingResult};
pub use trace::DecisionTrace;
