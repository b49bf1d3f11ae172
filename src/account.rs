//! Account model and movement history.
//!
//! Each movement carries its own timestamp, so the amount list and the
//! timestamp list are always the same length and index-aligned.

use crate::money::Money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Stable identity of an account inside a store.
///
/// Usernames are derived and may collide, so operations that must hit one
/// specific account (closure, session binding, loan crediting) go through
/// this id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single signed amount with the instant it was booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: Money, timestamp: DateTime<Utc>) -> Self {
        Movement { amount, timestamp }
    }

    /// Positive amounts are deposits; zero and negative are withdrawals.
    pub fn is_deposit(&self) -> bool {
        self.amount.is_positive()
    }
}

/// A simulated bank account.
///
/// # Invariants
///
/// - `balance` equals the sum of `movements` after every operation that goes
///   through the bank (see [`crate::summary::calculate_balance`])
/// - `username` is empty until [`crate::username::create_usernames`] runs
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,

    /// Full display name, e.g. "Hazar Namdar".
    pub owner: String,

    /// Login handle derived from `owner`. Not guaranteed unique.
    pub username: String,

    movements: Vec<Movement>,

    /// Interest rate in percent, e.g. `1.2` for 1.2%.
    pub interest_rate: Decimal,

    pub pin: u32,

    /// Cached sum of all movement amounts.
    pub balance: Money,

    /// ISO currency code used for display.
    pub currency: String,

    /// BCP 47 locale tag used for display.
    pub locale: String,
}

impl Account {
    /// Creates an account with the given history. The username and balance
    /// are filled in when the account is added to a bank.
    pub fn new(
        id: AccountId,
        owner: impl Into<String>,
        movements: Vec<Movement>,
        interest_rate: Decimal,
        pin: u32,
    ) -> Self {
        Account {
            id,
            owner: owner.into(),
            username: String::new(),
            movements,
            interest_rate,
            pin,
            balance: Money::ZERO,
            currency: "EUR".to_string(),
            locale: "en-US".to_string(),
        }
    }

    /// Sets display currency and locale.
    pub fn with_display(mut self, currency: impl Into<String>, locale: impl Into<String>) -> Self {
        self.currency = currency.into();
        self.locale = locale.into();
        self
    }

    /// Movement history in booking order.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Amounts in booking order.
    pub fn amounts(&self) -> impl Iterator<Item = Money> + '_ {
        self.movements.iter().map(|m| m.amount)
    }

    /// Timestamps in booking order, parallel to [`Account::amounts`].
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|m| m.timestamp)
    }

    /// Appends a movement. Callers refresh the cached balance afterwards.
    pub fn push_movement(&mut self, amount: Money, timestamp: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, timestamp));
    }

    /// Returns `true` if any single movement is strictly larger than `threshold`.
    ///
    /// `threshold` is compared unrounded, so it may fall between cents.
    pub fn has_movement_above(&self, threshold: Decimal) -> bool {
        self.amounts().any(|amount| amount.as_decimal() > threshold)
    }

    /// Exact username and PIN match.
    pub fn matches_credentials(&self, username: &str, pin: u32) -> bool {
        self.username == username && self.pin == pin
    }

    /// First whitespace-separated token of the owner's name.
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }
}
