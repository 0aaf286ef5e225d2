//! Runtime settings for a storefront session.
//!
//! Every field has a working default. Deployments override them through
//! `STOREFRONT_*` environment variables:
//!
//! | variable | field |
//! |---|---|
//! | `STOREFRONT_API_URL` | [`StorefrontConfig::api_url`] |
//! | `STOREFRONT_POSTAL_URL` | [`StorefrontConfig::postal_url`] |
//! | `STOREFRONT_SHIPPING_COST` | [`StorefrontConfig::shipping_cost`] |
//! | `STOREFRONT_DELIVERY_DAYS` | [`StorefrontConfig::delivery_days`] |
//! | `STOREFRONT_CARRIER` | [`StorefrontConfig::carrier`] |
//! | `STOREFRONT_TIMEOUT_SECS` | [`StorefrontConfig::request_timeout`] |

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Base URL of the backend REST API, without a trailing slash.
    pub api_url: String,
    /// Base URL of the postal-code lookup service.
    pub postal_url: String,
    /// Flat shipping cost added to the cart subtotal at checkout.
    pub shipping_cost: f64,
    /// Business-day lead time sent with the delivery details.
    pub delivery_days: u32,
    /// Carrier name sent with the delivery details.
    pub carrier: String,
    pub request_timeout: Duration,
    /// Queue depth of each state actor.
    pub store_buffer: usize,
    /// How many notices a slow listener may fall behind before losing some.
    pub notice_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            postal_url: "https://viacep.com.br/ws".to_string(),
            shipping_cost: 15.90,
            delivery_days: 5,
            carrier: "Transportadora Padrão".to_string(),
            request_timeout: Duration::from_secs(15),
            store_buffer: 32,
            notice_capacity: 64,
        }
    }
}

impl StorefrontConfig {
    /// Defaults overridden by whatever `STOREFRONT_*` variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("STOREFRONT_POSTAL_URL") {
            config.postal_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("STOREFRONT_SHIPPING_COST") {
            let cost: f64 = parse_field("STOREFRONT_SHIPPING_COST", &raw)?;
            if !cost.is_finite() || cost < 0.0 {
                return Err(invalid("STOREFRONT_SHIPPING_COST", &raw, "must be a non-negative amount"));
            }
            config.shipping_cost = cost;
        }
        if let Some(raw) = lookup("STOREFRONT_DELIVERY_DAYS") {
            config.delivery_days = parse_field("STOREFRONT_DELIVERY_DAYS", &raw)?;
        }
        if let Some(carrier) = lookup("STOREFRONT_CARRIER") {
            config.carrier = carrier;
        }
        if let Some(raw) = lookup("STOREFRONT_TIMEOUT_SECS") {
            let secs: u64 = parse_field("STOREFRONT_TIMEOUT_SECS", &raw)?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_field<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err: T::Err| invalid(key, raw, &err.to_string()))
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
