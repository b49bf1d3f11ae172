//! Balance and summary calculators.

use crate::account::Account;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::Serialize;

/// Income, outgo and interest derived from a movement history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Sum of strictly positive movements.
    pub income: Money,

    /// Sum of zero and negative movements. Never positive.
    pub outgo: Money,

    /// Interest earned on deposits: `Σ deposit * rate / 100`.
    pub interest: Money,
}

/// Recomputes the account balance, caches it on the account and returns it.
pub fn calculate_balance(account: &mut Account) -> Money {
    account.balance = account.amounts().sum();
    account.balance
}

/// Computes the summary for a movement history and a percentage rate.
///
/// Every accumulator starts at zero, so an empty history (or one without
/// deposits) yields zeros.
pub fn calculate_summaries<I>(amounts: I, interest_rate: Decimal) -> Summary
where
    I: IntoIterator<Item = Money>,
{
    let mut income = Money::ZERO;
    let mut outgo = Money::ZERO;
    let mut interest = Decimal::ZERO;

    for amount in amounts {
        if amount.is_positive() {
            income += amount;
            interest += amount.as_decimal() * interest_rate / Decimal::ONE_HUNDRED;
        } else {
            outgo += amount;
        }
    }

    Summary {
        income,
        outgo,
        interest: Money::new(interest),
    }
}

/// Summary of an account's own history at its own rate.
pub fn account_summary(account: &Account) -> Summary {
    calculate_summaries(account.amounts(), account.interest_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountId, Movement};
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn money(values: &[i64]) -> Vec<Money> {
        values.iter().map(|v| Money::from_units(*v)).collect()
    }

    fn rate(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_balance_is_sum_and_cached() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let movements = money(&[200, 450, -400, 3000, -650, -130, 70, 1300])
            .into_iter()
            .map(|m| Movement::new(m, ts))
            .collect();
        let mut account = Account::new(AccountId(1), "Hazar Namdar", movements, rate("1.2"), 1111);

        let balance = calculate_balance(&mut account);
        assert_eq!(balance.to_string(), "3840.00");
        assert_eq!(account.balance, balance);
    }

    #[test]
    fn test_summaries_for_seed_history() {
        let summary = calculate_summaries(money(&[200, 450, -400, 3000, -650, -130, 70, 1300]), rate("1.2"));

        assert_eq!(summary.income.to_string(), "5020.00");
        assert_eq!(summary.outgo.to_string(), "-1180.00");
        assert_eq!(summary.interest.to_string(), "60.24");
    }

    #[test]
    fn test_income_plus_outgo_equals_total() {
        let amounts = money(&[5000, 3400, -150, -790, -3210, -1000, 8500, -30]);
        let total: Money = amounts.iter().sum();
        let summary = calculate_summaries(amounts, rate("1.5"));

        assert_eq!(summary.income + summary.outgo, total);
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        let summary = calculate_summaries(Vec::new(), rate("1.2"));
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.interest.to_string(), "0.00");
    }

    #[test]
    fn test_withdrawals_only_earn_no_interest() {
        let summary = calculate_summaries(money(&[-100, -20]), rate("2"));
        assert!(summary.income.is_zero());
        assert_eq!(summary.outgo.to_string(), "-120.00");
        assert!(summary.interest.is_zero());
    }

    #[test]
    fn test_zero_movement_counts_as_outgo() {
        let summary = calculate_summaries(money(&[0, 10]), rate("1"));
        assert_eq!(summary.income.to_string(), "10.00");
        assert_eq!(summary.outgo.to_string(), "0.00");
    }

    #[test]
    fn test_interest_rounds_once_at_the_end() {
        // 0.7% of 340 + 0.7% of 50 = 2.38 + 0.35
        let summary = calculate_summaries(money(&[340, 50]), rate("0.7"));
        assert_eq!(summary.interest.to_string(), "2.73");
    }
}
