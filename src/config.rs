//! Configuration loaded from the Lambda environment at cold start.

use std::env;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::Region;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

/// Names of the document-store collections the booking API works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub tables: String,
    pub reservations: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            tables: "Tables".to_string(),
            reservations: "Reservations".to_string(),
        }
    }
}

/// Settings for the booking API function.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub collections: Collections,
    /// Human-readable name of the Cognito user pool
    pub user_pool_name: String,
    /// Human-readable name of the app client inside that pool
    pub client_name: String,
    pub region: Option<String>,
    /// API Gateway stage that prefixes request paths, e.g. `Prod`
    pub api_stage: Option<String>,
}

impl BookingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Collections::default();
        Ok(Self {
            collections: Collections {
                tables: lookup("tables_table").unwrap_or(defaults.tables),
                reservations: lookup("reservations_table").unwrap_or(defaults.reservations),
            },
            user_pool_name: lookup("booking_userpool").ok_or(ConfigError::Missing("booking_userpool"))?,
            client_name: lookup("client_name").ok_or(ConfigError::Missing("client_name"))?,
            region: lookup("region").filter(|r| !r.is_empty()),
            api_stage: lookup("api_stage").filter(|s| !s.is_empty()),
        })
    }
}

/// Read a variable, falling back to `default` when unset.
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

/// Load the shared AWS SDK configuration, honouring an explicit region override.
pub async fn load_aws_config(region: Option<&str>) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    match region {
        Some(region) => loader.region(Region::new(region.to_string())).load().await,
        None => loader.load().await,
    }
}
