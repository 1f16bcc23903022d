//! Service configuration, read from the environment (`.env` via dotenvy).

use std::{env, fmt::Display, str::FromStr, time::Duration};

use rust_decimal::Decimal;

use crate::pricing::policy::{MuRates, PricingPolicy};

/// Travel API used when `TRAVEL_API_BASE_URL` is unset
pub const DEFAULT_TRAVEL_API_BASE_URL: &str = "http://localhost:3000/api/v1/";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key} must be greater than zero")]
    NotPositive { key: &'static str },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub travel_api_base_url: String,
    pub travel_api_timeout: Duration,
    pub travel_cache_ttl: Duration,
    pub travel_cache_capacity: u64,
    pub policy: PricingPolicy,
    /// Used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = PricingPolicy::default();

        let margin = parse_or(
            var("DEFAULT_MARGIN_MULTIPLIER"),
            "DEFAULT_MARGIN_MULTIPLIER",
            defaults.default_margin_multiplier,
        )?;

        let policy = PricingPolicy {
            default_margin_multiplier: positive("DEFAULT_MARGIN_MULTIPLIER", margin)?,
            test_act_price: defaults.test_act_price,
            mu_rates: MuRates {
                fuel_per_mile: parse_or(
                    var("MU_FUEL_RATE_PER_MILE"),
                    "MU_FUEL_RATE_PER_MILE",
                    defaults.mu_rates.fuel_per_mile,
                )?,
                time_per_hour: parse_or(
                    var("MU_TIME_RATE_PER_HOUR"),
                    "MU_TIME_RATE_PER_HOUR",
                    defaults.mu_rates.time_per_hour,
                )?,
                late_return_fee: parse_or(
                    var("MU_LATE_RETURN_FEE"),
                    "MU_LATE_RETURN_FEE",
                    defaults.mu_rates.late_return_fee,
                )?,
                ..defaults.mu_rates
            },
        };

        let timeout_secs: u64 = parse_or(var("TRAVEL_API_TIMEOUT_SECS"), "TRAVEL_API_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(ConfigError::NotPositive {
                key: "TRAVEL_API_TIMEOUT_SECS",
            });
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(var("PORT"), "PORT", 8080)?,
            travel_api_base_url: var("TRAVEL_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TRAVEL_API_BASE_URL.to_string()),
            travel_api_timeout: Duration::from_secs(timeout_secs),
            travel_cache_ttl: Duration::from_secs(parse_or(
                var("TRAVEL_CACHE_TTL_SECS"),
                "TRAVEL_CACHE_TTL_SECS",
                6 * 60 * 60,
            )?),
            travel_cache_capacity: parse_or(var("TRAVEL_CACHE_CAPACITY"), "TRAVEL_CACHE_CAPACITY", 2000)?,
            policy,
            log_filter: var("RUST_LOG").unwrap_or_else(|| "actbook_pricing=info,tower_http=info".to_string()),
        })
    }

    pub fn uses_default_travel_api(&self) -> bool {
        self.travel_api_base_url == DEFAULT_TRAVEL_API_BASE_URL
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn positive(key: &'static str, value: Decimal) -> Result<Decimal, ConfigError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { key })
    }
}
