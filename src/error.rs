//! Error types for the bank simulator.

use thiserror::Error;

/// Result type alias for fallible I/O-level operations.
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum BankError {
    /// Failed to open or read the command script
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An environment override could not be used
    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    /// Missing command script argument
    #[error("Missing command script argument. Usage: bankist <commands.csv>")]
    MissingArgument,
}

/// Reason a bank operation was refused.
///
/// A rejected operation never changes any account or the session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Wrong PIN or user not found")]
    WrongCredentials,

    #[error("No account is logged in")]
    NotLoggedIn,

    /// Amount was zero or negative
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Recipient account not found")]
    UnknownRecipient,

    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    /// No previous movement exceeds the required share of the loan
    #[error("No previous deposit is large enough to qualify for this loan")]
    InsufficientHistory,

    /// Username or PIN given for closure does not match the session
    #[error("Username or PIN does not match the logged in account")]
    CloseMismatch,
}
