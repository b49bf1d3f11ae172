//! Presentation helpers: movement rows, date labels and money text.
//!
//! Nothing here mutates state. The bank hands these functions plain values
//! and a frontend decides how to paint the result.

use crate::account::{Account, Movement};
use crate::money::Money;
use crate::summary::Summary;
use chrono::{DateTime, Utc};
use serde::Serialize;

const MS_PER_DAY: i64 = 86_400_000;

/// Format used once a movement is more than a week old.
pub const DATE_FORMAT: &str = "%a, %d/%m/%Y, %H:%M";

/// Shown while nobody is logged in.
pub const LOGGED_OUT_WELCOME: &str = "Log in to get started";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

/// One rendered line of the movement list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementRow {
    /// 1-based position in the displayed order.
    pub position: usize,
    pub kind: MovementKind,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
    pub date_label: String,
    pub value_label: String,
}

/// Everything a frontend needs to draw the logged-in view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub welcome: String,
    pub date_label: String,
    pub balance: Money,
    pub balance_label: String,
    pub summary: Summary,
    pub sorted: bool,
    pub movements: Vec<MovementRow>,
    pub timer: String,
}

/// Builds the movement rows for `account`.
///
/// Unsorted rows keep booking order. Sorted rows are ordered ascending by
/// amount; each row keeps its own timestamp, and equal amounts keep their
/// booking order.
pub fn display_movements(account: &Account, sorted: bool, now: DateTime<Utc>) -> Vec<MovementRow> {
    let mut movements: Vec<Movement> = account.movements().to_vec();
    if sorted {
        movements.sort_by_key(|m| m.amount);
    }

    movements
        .into_iter()
        .enumerate()
        .map(|(i, m)| MovementRow {
            position: i + 1,
            kind: if m.is_deposit() {
                MovementKind::Deposit
            } else {
                MovementKind::Withdrawal
            },
            amount: m.amount,
            timestamp: m.timestamp,
            date_label: format_movement_date(m.timestamp, now),
            value_label: format_currency(m.amount, &account.currency),
        })
        .collect()
}

/// Whole days between two instants, rounded to the nearest day.
pub fn days_passed(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let ms = (a - b).num_milliseconds().abs();
    (ms + MS_PER_DAY / 2) / MS_PER_DAY
}

/// "Today", "Yesterday", "N Days Ago" for the last week, else a full date.
pub fn format_movement_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_passed(now, date) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d <= 7 => format!("{} Days Ago", d),
        _ => date.format(DATE_FORMAT).to_string(),
    }
}

pub fn format_currency(amount: Money, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

/// Greeting for the logged-in account, or the logged-out prompt.
pub fn welcome_message(account: Option<&Account>) -> String {
    match account {
        Some(acc) => format!("Welcome back, {}", acc.first_name()),
        None => LOGGED_OUT_WELCOME.to_string(),
    }
}
