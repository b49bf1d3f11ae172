//! # Bankist
//!
//! A single-session bank account simulator: log into one of a few demo
//! accounts, transfer money, request loans and close the account, with an
//! inactivity timer that ends the session.
//!
//! ## Design Principles
//!
//! - **Fixed-point money**: 2 decimal places via `rust_decimal`
//! - **Explicit state**: accounts, session, timer and pending loans live in one [`Bank`]
//! - **Typed rejections**: every refused operation returns a [`Rejection`] and changes nothing
//! - **Logical time**: timers and delayed loans advance only through [`Bank::advance`]
//!
//! ## Example
//!
//! ```
//! use bankist::{Bank, BankConfig, Money};
//!
//! let mut bank = Bank::new(BankConfig::default());
//! bank.login("hn", 1111).unwrap();
//! bank.transfer("un", Money::from_units(100)).unwrap();
//! assert_eq!(bank.current_account().unwrap().balance.to_string(), "3740.00");
//! ```

pub mod account;
pub mod bank;
pub mod clock;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod money;
pub mod scheduler;
pub mod seed;
pub mod session;
pub mod summary;
pub mod timer;
pub mod username;

pub use account::{Account, AccountId, Movement};
pub use bank::{Bank, LoanOutcome};
pub use command::{Command, CommandRecord};
pub use config::BankConfig;
pub use display::{Dashboard, MovementKind, MovementRow};
pub use error::{BankError, Rejection, Result};
pub use money::Money;
pub use scheduler::LoanTicket;
pub use session::Session;
pub use summary::{calculate_balance, calculate_summaries, Summary};
