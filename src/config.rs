//! Runtime settings for the bank.

use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`BankConfig::logout_seconds`].
pub const LOGOUT_SECONDS_VAR: &str = "BANKIST_LOGOUT_SECONDS";

/// Environment variable overriding [`BankConfig::loan_delay_ms`].
pub const LOAN_DELAY_VAR: &str = "BANKIST_LOAN_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Inactivity countdown in seconds. Must be at least 1.
    pub logout_seconds: u32,

    /// Approval delay before a loan is credited. `0` credits immediately.
    pub loan_delay_ms: u64,

    /// A loan is granted only if some movement exceeds `amount * ratio`.
    pub loan_history_ratio: Decimal,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            logout_seconds: 120,
            loan_delay_ms: 2_500,
            loan_history_ratio: Decimal::new(1, 1),
        }
    }
}

impl BankConfig {
    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOGOUT_SECONDS_VAR) {
            config.logout_seconds = match raw.trim().parse::<u32>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(BankError::InvalidConfig {
                        key: LOGOUT_SECONDS_VAR,
                        value: raw,
                    })
                }
            };
        }

        if let Some(raw) = lookup(LOAN_DELAY_VAR) {
            config.loan_delay_ms = raw.trim().parse::<u64>().map_err(|_| BankError::InvalidConfig {
                key: LOAN_DELAY_VAR,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BankConfig::default();
        assert_eq!(config.logout_seconds, 120);
        assert_eq!(config.loan_delay_ms, 2_500);
        assert_eq!(config.loan_history_ratio.to_string(), "0.1");
    }

    #[test]
    fn test_overrides_apply() {
        let config = BankConfig::from_lookup(lookup_from(&[
            (LOGOUT_SECONDS_VAR, " 30 "),
            (LOAN_DELAY_VAR, "0"),
        ]))
        .unwrap();

        assert_eq!(config.logout_seconds, 30);
        assert_eq!(config.loan_delay_ms, 0);
    }

    #[test]
    fn test_zero_logout_is_rejected() {
        let err = BankConfig::from_lookup(lookup_from(&[(LOGOUT_SECONDS_VAR, "0")])).unwrap_err();
        assert!(matches!(err, BankError::InvalidConfig { key: LOGOUT_SECONDS_VAR, .. }));
    }

    #[test]
    fn test_garbage_delay_is_rejected() {
        let err = BankConfig::from_lookup(lookup_from(&[(LOAN_DELAY_VAR, "soon")])).unwrap_err();
        assert!(err.to_string().contains(LOAN_DELAY_VAR));
    }
}
