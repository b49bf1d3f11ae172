//! Bankist CLI
//!
//! Runs a CSV command script against the demo accounts and prints the final
//! account states as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > accounts.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `BANKIST_LOGOUT_SECONDS`: Inactivity countdown (default 120)
//! - `BANKIST_LOAN_DELAY_MS`: Loan approval delay (default 2500, `0` for immediate)

use bankist::{Bank, BankConfig, BankError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(BankError::MissingArgument);
    }

    let config = BankConfig::from_env()?;

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut bank = Bank::new(config);
    bank.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    bank.write_output(handle)?;

    Ok(())
}
