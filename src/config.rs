//! Checkout configuration: what the form charges and in which currency.
//!
//! Defaults match the demo checkout (49.99 USD). Binaries overlay
//! environment variables on top:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PAYFORM_AMOUNT_CENTS` | `amount_cents` |
//! | `PAYFORM_CURRENCY` | `currency` |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable overriding [`CheckoutConfig::amount_cents`].
pub const ENV_AMOUNT_CENTS: &str = "PAYFORM_AMOUNT_CENTS";

/// Environment variable overriding [`CheckoutConfig::currency`].
pub const ENV_CURRENCY: &str = "PAYFORM_CURRENCY";

/// Charge parameters attached to every tokenization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Charge amount in minor units (cents).
    pub amount_cents: u64,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            amount_cents: 4999,
            currency: "USD".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Builds a config from the defaults plus any `PAYFORM_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config using `lookup` to resolve variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_AMOUNT_CENTS) {
            config.amount_cents = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_AMOUNT_CENTS,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_CURRENCY) {
            config = config.with_currency(&raw)?;
        }

        tracing::debug!(
            amount_cents = config.amount_cents,
            currency = %config.currency,
            "checkout config loaded"
        );
        Ok(config)
    }

    /// Replaces the currency after checking it is a three-letter ISO 4217 code.
    ///
    /// Lowercase input is accepted and stored uppercase.
    pub fn with_currency(mut self, raw: &str) -> Result<Self, ConfigError> {
        let currency = raw.trim().to_uppercase();
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCurrency(raw.to_string()));
        }
        self.currency = currency;
        Ok(self)
    }

    /// Amount as a decimal number of major units, e.g. `49.99`.
    pub fn amount(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Amount formatted for display, e.g. `49.99`.
    pub fn display_amount(&self) -> DisplayAmount {
        DisplayAmount(self.amount_cents)
    }
}

/// Renders minor units as `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAmount(u64);

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// The offending variable.
        key: &'static str,
        /// The raw value.
        value: String,
    },

    /// A currency was not a three-letter code.
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.amount_cents, 4999);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.display_amount().to_string(), "49.99");
        assert!((config.amount() - 49.99).abs() < 1e-9);
    }

    #[test]
    fn test_overrides() {
        let config = CheckoutConfig::from_lookup(lookup(&[
            (ENV_AMOUNT_CENTS, "1050"),
            (ENV_CURRENCY, "cop"),
        ]))
        .unwrap();
        assert_eq!(config.amount_cents, 1050);
        assert_eq!(config.currency, "COP");
        assert_eq!(config.display_amount().to_string(), "10.50");
    }

    #[test]
    fn test_invalid_amount() {
        let err = CheckoutConfig::from_lookup(lookup(&[(ENV_AMOUNT_CENTS, "49.99")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_AMOUNT_CENTS,
                value: "49.99".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_currency() {
        assert!(CheckoutConfig::from_lookup(lookup(&[(ENV_CURRENCY, "DOLLARS")])).is_err());
        assert!(CheckoutConfig::from_lookup(lookup(&[(ENV_CURRENCY, "U$D")])).is_err());
    }

    #[test]
    fn test_with_currency() {
        let config = CheckoutConfig::default().with_currency(" eur ").unwrap();
        assert_eq!(config.currency, "EUR");

        let err = CheckoutConfig::default().with_currency("dollars").unwrap_err();
        assert_eq!(err, ConfigError::InvalidCurrency("dollars".to_string()));
        assert!(CheckoutConfig::default().with_currency("").is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CheckoutConfig = serde_json::from_str(r#"{"currency":"EUR"}"#).unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.amount_cents, 4999);
    }
}
