//! Command script records for CSV parsing and their typed form.

use crate::money::Money;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw command row as read from CSV.
///
/// Only the fields a command needs are filled; the rest may be empty or
/// missing entirely.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// login, logout, transfer, loan, close, sort, wait
    pub command: String,

    /// Login/close username, or transfer recipient
    pub username: Option<String>,

    pub pin: Option<String>,

    /// Amount for transfer/loan, seconds for wait
    pub value: Option<String>,
}

impl CommandRecord {
    /// Parses the raw CSV row into a typed command.
    ///
    /// Returns `None` for unknown commands or missing/unparsable fields.
    pub fn parse(&self) -> Option<Command> {
        let command = self.command.trim().to_lowercase();

        match command.as_str() {
            "login" => Some(Command::Login {
                username: self.username()?,
                pin: self.pin()?,
            }),
            "logout" => Some(Command::Logout),
            "transfer" => Some(Command::Transfer {
                to: self.username()?,
                amount: self.amount()?,
            }),
            "loan" => Some(Command::Loan {
                amount: self.amount()?,
            }),
            "close" => Some(Command::Close {
                username: self.username()?,
                pin: self.pin()?,
            }),
            "sort" => Some(Command::Sort),
            "wait" => Some(Command::Wait {
                millis: self.wait_millis()?,
            }),
            _ => None,
        }
    }

    fn username(&self) -> Option<String> {
        let name = self.username.as_ref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }

    fn pin(&self) -> Option<u32> {
        self.pin.as_ref()?.trim().parse().ok()
    }

    fn amount(&self) -> Option<Money> {
        let raw = self.value.as_ref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Money::from_str(raw).ok()
    }

    /// Seconds (fractions allowed) converted to whole milliseconds.
    fn wait_millis(&self) -> Option<u64> {
        let raw = self.value.as_ref()?.trim();
        let seconds = Decimal::from_str(raw).ok()?;
        if seconds.is_sign_negative() {
            return None;
        }
        (seconds * Decimal::ONE_THOUSAND).trunc().to_u64()
    }
}

/// A parsed command ready to run against the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, pin: u32 },

    Logout,

    /// Move `amount` from the logged-in account to `to`.
    Transfer { to: String, amount: Money },

    /// Request a loan for the logged-in account.
    Loan { amount: Money },

    /// Close the logged-in account after re-entering its credentials.
    Close { username: String, pin: u32 },

    /// Flip the movement display order.
    Sort,

    /// Let logical time pass.
    Wait { millis: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(command: &str, username: Option<&str>, pin: Option<&str>, value: Option<&str>) -> CommandRecord {
        CommandRecord {
            command: command.to_string(),
            username: username.map(str::to_string),
            pin: pin.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_login() {
        let parsed = record("login", Some("hn"), Some("1111"), None).parse().unwrap();
        assert_eq!(
            parsed,
            Command::Login {
                username: "hn".to_string(),
                pin: 1111
            }
        );
    }

    #[test]
    fn test_parse_transfer_handles_whitespace() {
        let parsed = record("  Transfer ", Some(" un "), None, Some(" 70.5 ")).parse().unwrap();
        match parsed {
            Command::Transfer { to, amount } => {
                assert_eq!(to, "un");
                assert_eq!(amount.to_string(), "70.50");
            }
            other => panic!("Expected Transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_amount_is_kept_for_validation() {
        let parsed = record("loan", None, None, Some("-5")).parse().unwrap();
        assert_eq!(
            parsed,
            Command::Loan {
                amount: Money::from_units(-5)
            }
        );
    }

    #[test]
    fn test_parse_wait_fractional_seconds() {
        let parsed = record("wait", None, None, Some("2.5")).parse().unwrap();
        assert_eq!(parsed, Command::Wait { millis: 2_500 });
    }

    #[test]
    fn test_parse_commands_without_fields() {
        assert_eq!(record("sort", None, None, None).parse(), Some(Command::Sort));
        assert_eq!(record("logout", None, None, None).parse(), Some(Command::Logout));
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(record("deposit", Some("hn"), None, Some("1")).parse().is_none());
        assert!(record("login", Some("hn"), Some("abc"), None).parse().is_none());
        assert!(record("login", Some(""), Some("1111"), None).parse().is_none());
        assert!(record("transfer", Some("un"), None, Some("lots")).parse().is_none());
        assert!(record("loan", None, None, None).parse().is_none());
        assert!(record("wait", None, None, Some("-1")).parse().is_none());
    }
}
