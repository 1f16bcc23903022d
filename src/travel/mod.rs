//! External travel-data collaborator used for MU-rate travel pricing.

pub mod client;
pub mod models;

pub use client::{DistanceClient, HttpDistanceClient, TravelClientError};
pub use models::{TravelData, TravelLeg};
