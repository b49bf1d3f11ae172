//! Built-in demo accounts.

use crate::account::{Account, AccountId, Movement};
use crate::money::Money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

struct SeedAccount {
    owner: &'static str,
    movements: &'static [(i64, &'static str)],
    interest_rate: (i64, u32),
    pin: u32,
    currency: &'static str,
    locale: &'static str,
}

const SEED: [SeedAccount; 4] = [
    SeedAccount {
        owner: "Hazar Namdar",
        movements: &[
            (200, "2024-11-18T21:31:17Z"),
            (450, "2024-12-23T07:42:02Z"),
            (-400, "2025-01-28T09:15:04Z"),
            (3000, "2025-04-01T10:17:24Z"),
            (-650, "2025-05-08T14:11:59Z"),
            (-130, "2025-05-27T17:01:17Z"),
            (70, "2025-07-11T23:36:17Z"),
            (1300, "2025-07-12T10:51:36Z"),
        ],
        interest_rate: (12, 1),
        pin: 1111,
        currency: "EUR",
        locale: "pt-PT",
    },
    SeedAccount {
        owner: "Taylan Yusuf Akgün",
        movements: &[
            (5000, "2024-11-01T13:15:33Z"),
            (3400, "2024-11-30T09:48:16Z"),
            (-150, "2024-12-25T06:04:23Z"),
            (-790, "2025-01-25T14:18:46Z"),
            (-3210, "2025-02-05T16:33:06Z"),
            (-1000, "2025-04-10T14:43:26Z"),
            (8500, "2025-06-25T18:49:59Z"),
            (-30, "2025-07-26T12:01:20Z"),
        ],
        interest_rate: (15, 1),
        pin: 3131,
        currency: "USD",
        locale: "en-US",
    },
    SeedAccount {
        owner: "Uğur Namdar",
        movements: &[
            (200, "2024-10-02T08:12:00Z"),
            (-200, "2024-10-19T11:40:51Z"),
            (340, "2024-12-03T15:22:10Z"),
            (-300, "2025-01-14T19:05:44Z"),
            (-20, "2025-02-21T07:30:09Z"),
            (50, "2025-03-30T12:00:00Z"),
            (400, "2025-05-17T16:45:31Z"),
            (-460, "2025-06-09T10:10:10Z"),
        ],
        interest_rate: (7, 1),
        pin: 3333,
        currency: "TRY",
        locale: "tr-TR",
    },
    SeedAccount {
        owner: "Barış Özgür Yaşar",
        movements: &[
            (430, "2025-01-08T10:00:00Z"),
            (1000, "2025-02-12T09:30:00Z"),
            (700, "2025-03-19T17:20:00Z"),
            (50, "2025-04-23T08:45:00Z"),
            (90, "2025-05-30T13:10:00Z"),
        ],
        interest_rate: (1, 0),
        pin: 4444,
        currency: "EUR",
        locale: "de-DE",
    },
];

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    // fixed strings; the epoch fallback is unreachable
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// The four demo accounts, ids 1 to 4, usernames not yet derived.
pub fn seed_accounts() -> Vec<Account> {
    SEED.iter()
        .zip(1u32..)
        .map(|(seed, id)| {
            let movements = seed
                .movements
                .iter()
                .map(|(amount, ts)| Movement::new(Money::from_units(*amount), parse_timestamp(ts)))
                .collect();
            let (mantissa, scale) = seed.interest_rate;

            Account::new(
                AccountId(id),
                seed.owner,
                movements,
                Decimal::new(mantissa, scale),
                seed.pin,
            )
            .with_display(seed.currency, seed.locale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_accounts_with_sequential_ids() {
        let accounts = seed_accounts();
        let ids: Vec<_> = accounts.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seed_pins_and_rates() {
        let accounts = seed_accounts();
        let pins: Vec<_> = accounts.iter().map(|a| a.pin).collect();
        assert_eq!(pins, vec![1111, 3131, 3333, 4444]);
        assert_eq!(accounts[0].interest_rate.to_string(), "1.2");
        assert_eq!(accounts[3].interest_rate.to_string(), "1");
    }

    #[test]
    fn test_seed_timestamps_parse() {
        let accounts = seed_accounts();
        let first = accounts[0].movements()[0].timestamp;
        assert_eq!(first.to_rfc3339(), "2024-11-18T21:31:17+00:00");
        assert!(accounts
            .iter()
            .flat_map(|a| a.timestamps())
            .all(|ts| ts.timestamp() > 0));
    }
}
