//! Core bank state and operations.
//!
//! One `Bank` owns the account store, the login session, the logout timer,
//! pending loans and the display sort flag. Every user action is a method
//! returning `Result<_, Rejection>`; a rejection leaves all state untouched.
//! Time moves only through [`Bank::advance`].

use crate::account::{Account, AccountId};
use crate::clock::Clock;
use crate::command::{Command, CommandRecord};
use crate::config::BankConfig;
use crate::display::{self, Dashboard, MovementRow, DATE_FORMAT};
use crate::error::{Rejection, Result};
use crate::money::Money;
use crate::scheduler::{LoanQueue, LoanTicket, PendingLoan};
use crate::seed::seed_accounts;
use crate::session::Session;
use crate::summary::{account_summary, calculate_balance};
use crate::timer::{LogoutTimer, TimerState};
use crate::username::create_usernames;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};

/// What happened to an accepted loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanOutcome {
    /// Credited on the spot (zero approval delay).
    Credited,

    /// Queued; credited when the ticket comes due if the session survives.
    Scheduled(LoanTicket),
}

/// Final state of one account as written to CSV.
#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    username: &'a str,
    owner: &'a str,
    balance: Money,
    income: Money,
    outgo: Money,
    interest: Money,
    movements: usize,
}

/// The simulated bank.
pub struct Bank {
    /// Account store in display order.
    accounts: Vec<Account>,

    session: Session,

    /// Running inactivity countdown, present only while logged in.
    timer: Option<LogoutTimer>,

    loans: LoanQueue,

    /// Whether movements are displayed sorted by amount.
    sorted: bool,

    clock: Clock,

    config: BankConfig,

    /// Last epoch handed out to a session.
    epoch: u64,

    /// When the current session logged in.
    login_at: Option<DateTime<Utc>>,
}

impl Bank {
    /// Creates a bank holding the demo accounts, starting at the current time.
    pub fn new(config: BankConfig) -> Self {
        Self::with_accounts(seed_accounts(), config, Utc::now())
    }

    /// Creates a bank over an arbitrary account list.
    ///
    /// Usernames are derived and balances computed here, once.
    pub fn with_accounts(mut accounts: Vec<Account>, config: BankConfig, origin: DateTime<Utc>) -> Self {
        create_usernames(&mut accounts);
        for account in accounts.iter_mut() {
            calculate_balance(account);
        }

        Bank {
            accounts,
            session: Session::LoggedOut,
            timer: None,
            loans: LoanQueue::new(),
            sorted: false,
            clock: Clock::starting_at(origin),
            config,
            epoch: 0,
            login_at: None,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// First account in store order with this username.
    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.session.account().and_then(|id| self.account(id))
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Current logical wall-clock time.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Countdown text (`MM:SS`) while a session is active.
    pub fn timer_display(&self) -> Option<String> {
        self.timer.as_ref().map(LogoutTimer::display)
    }

    pub fn pending_loans(&self) -> usize {
        self.loans.len()
    }

    /// Logs into the first account named `username` if `pin` matches.
    ///
    /// A successful login replaces any previous session. A failed login
    /// leaves the current session as it was.
    pub fn login(&mut self, username: &str, pin: u32) -> std::result::Result<AccountId, Rejection> {
        let id = match self.find_by_username(username) {
            Some(account) if account.pin == pin => account.id,
            _ => return Err(Rejection::WrongCredentials),
        };

        if self.session.is_logged_in() {
            self.end_session();
        }

        self.epoch += 1;
        self.session = Session::LoggedIn {
            account: id,
            epoch: self.epoch,
        };
        self.login_at = Some(self.clock.now());
        self.sorted = false;
        self.restart_timer();
        self.refresh_balance(id);

        debug!("User {} logged in as account {}", username, id);
        Ok(id)
    }

    /// Ends the current session.
    pub fn logout(&mut self) -> std::result::Result<(), Rejection> {
        self.current_index()?;
        self.end_session();
        Ok(())
    }

    /// Moves `amount` from the logged-in account to the first account named `to`.
    pub fn transfer(&mut self, to: &str, amount: Money) -> std::result::Result<(), Rejection> {
        let source = self.current_index()?;

        if !amount.is_positive() {
            return Err(Rejection::InvalidAmount);
        }
        if amount > self.accounts[source].balance {
            return Err(Rejection::InsufficientFunds);
        }

        let target = self
            .accounts
            .iter()
            .position(|a| a.username == to)
            .ok_or(Rejection::UnknownRecipient)?;
        if target == source {
            return Err(Rejection::SelfTransfer);
        }

        let now = self.clock.now();
        self.accounts[source].push_movement(-amount, now);
        self.accounts[target].push_movement(amount, now);
        calculate_balance(&mut self.accounts[source]);
        calculate_balance(&mut self.accounts[target]);
        self.restart_timer();

        debug!(
            "Transferred {} from {} to {}",
            amount, self.accounts[source].id, self.accounts[target].id
        );
        Ok(())
    }

    /// Requests a loan for the logged-in account.
    ///
    /// Granted if some earlier movement exceeds `amount * loan_history_ratio`.
    /// The credit lands after the configured approval delay.
    pub fn request_loan(&mut self, amount: Money) -> std::result::Result<LoanOutcome, Rejection> {
        let (account, epoch) = match (self.session.account(), self.session.epoch()) {
            (Some(account), Some(epoch)) => (account, epoch),
            _ => return Err(Rejection::NotLoggedIn),
        };
        let index = self.index_of(account).ok_or(Rejection::NotLoggedIn)?;

        if !amount.is_positive() {
            return Err(Rejection::InvalidAmount);
        }
        let threshold = amount.as_decimal() * self.config.loan_history_ratio;
        if !self.accounts[index].has_movement_above(threshold) {
            return Err(Rejection::InsufficientHistory);
        }

        if self.config.loan_delay_ms == 0 {
            self.credit_loan(account, amount);
            return Ok(LoanOutcome::Credited);
        }

        let due_at = self.clock.elapsed_ms().saturating_add(self.config.loan_delay_ms);
        let ticket = self.loans.schedule(account, epoch, amount, due_at);
        debug!("Loan {} of {} scheduled for {} at {}ms", ticket.id, amount, account, due_at);
        Ok(LoanOutcome::Scheduled(ticket))
    }

    /// Closes the logged-in account after its credentials are re-entered.
    ///
    /// Returns the removed account. The session ends.
    pub fn close_account(&mut self, username: &str, pin: u32) -> std::result::Result<Account, Rejection> {
        let index = self.current_index()?;

        if !self.accounts[index].matches_credentials(username, pin) {
            return Err(Rejection::CloseMismatch);
        }

        self.end_session();
        let removed = self.accounts.remove(index);
        debug!("Closed account {} ({})", removed.id, removed.username);
        Ok(removed)
    }

    /// Flips the display order and returns the freshly ordered rows.
    pub fn toggle_sort(&mut self) -> std::result::Result<Vec<MovementRow>, Rejection> {
        self.current_index()?;
        self.sorted = !self.sorted;
        self.movement_rows()
    }

    /// Movement rows of the logged-in account in the current display order.
    pub fn movement_rows(&self) -> std::result::Result<Vec<MovementRow>, Rejection> {
        let account = self.current_account().ok_or(Rejection::NotLoggedIn)?;
        Ok(display::display_movements(account, self.sorted, self.clock.now()))
    }

    /// Snapshot of the logged-in view, or `None` when logged out.
    pub fn dashboard(&self) -> Option<Dashboard> {
        let account = self.current_account()?;
        let now = self.clock.now();

        Some(Dashboard {
            welcome: display::welcome_message(Some(account)),
            date_label: self
                .login_at
                .unwrap_or(now)
                .format(DATE_FORMAT)
                .to_string(),
            balance: account.balance,
            balance_label: display::format_currency(account.balance, &account.currency),
            summary: account_summary(account),
            sorted: self.sorted,
            movements: display::display_movements(account, self.sorted, now),
            timer: self.timer_display().unwrap_or_default(),
        })
    }

    /// Greeting line, including the logged-out prompt.
    pub fn welcome(&self) -> String {
        display::welcome_message(self.current_account())
    }

    /// Lets `millis` of logical time pass, firing timer ticks and due loans
    /// in chronological order. A tick fires before a loan due at the same
    /// instant. Time stops at the clock's horizon.
    pub fn advance(&mut self, millis: u64) {
        let target = self
            .clock
            .elapsed_ms()
            .saturating_add(millis)
            .min(self.clock.horizon_ms());

        loop {
            let next_tick = self.timer.as_ref().map(LogoutTimer::next_tick_at);
            let next = match next_tick.into_iter().chain(self.loans.next_due()).min() {
                Some(at) if at <= target => at,
                _ => break,
            };
            self.clock.set_elapsed(next);

            if next_tick == Some(next) {
                self.tick_timer();
            } else if let Some(loan) = self.loans.pop_due(next) {
                self.fire_loan(loan);
            }
        }

        self.clock.set_elapsed(target);
    }

    /// Runs one parsed command.
    pub fn apply(&mut self, command: Command) -> std::result::Result<(), Rejection> {
        match command {
            Command::Login { username, pin } => self.login(&username, pin).map(|_| ()),
            Command::Logout => self.logout(),
            Command::Transfer { to, amount } => self.transfer(&to, amount),
            Command::Loan { amount } => self.request_loan(amount).map(|_| ()),
            Command::Close { username, pin } => self.close_account(&username, pin).map(|_| ()),
            Command::Sort => self.toggle_sort().map(|_| ()),
            Command::Wait { millis } => {
                self.advance(millis);
                Ok(())
            }
        }
    }

    /// Runs a CSV command script row by row.
    ///
    /// Malformed rows and rejected commands are logged at warn level and
    /// skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Some(command) => {
                        debug!("Row {}: {:?}", row_num, command);
                        if let Err(rejection) = self.apply(command) {
                            warn!("Row {}: {} rejected: {}", row_num, record.command, rejection);
                        }
                    }
                    None => warn!("Row {}: Failed to parse command record", row_num),
                },
                Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
            }
        }

        Ok(())
    }

    /// Writes every remaining account in store order.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for account in &self.accounts {
            let summary = account_summary(account);
            csv_writer.serialize(AccountRow {
                username: &account.username,
                owner: &account.owner,
                balance: account.balance,
                income: summary.income,
                outgo: summary.outgo,
                interest: summary.interest,
                movements: account.movements().len(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Store index of the logged-in account.
    fn current_index(&self) -> std::result::Result<usize, Rejection> {
        let id = self.session.account().ok_or(Rejection::NotLoggedIn)?;
        self.index_of(id).ok_or(Rejection::NotLoggedIn)
    }

    fn index_of(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }

    fn refresh_balance(&mut self, id: AccountId) {
        if let Some(index) = self.index_of(id) {
            calculate_balance(&mut self.accounts[index]);
        }
    }

    fn restart_timer(&mut self) {
        self.timer = Some(LogoutTimer::start(
            self.clock.elapsed_ms(),
            self.config.logout_seconds,
        ));
    }

    fn tick_timer(&mut self) {
        let state = match self.timer.as_mut() {
            Some(timer) => timer.tick(),
            None => return,
        };

        if state == TimerState::Expired {
            debug!("Logout timer expired at {}ms", self.clock.elapsed_ms());
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        let cancelled = self.loans.cancel_all();
        if cancelled > 0 {
            debug!("Cancelled {} pending loan(s)", cancelled);
        }
        self.session = Session::LoggedOut;
        self.timer = None;
        self.login_at = None;
        self.sorted = false;
    }

    fn fire_loan(&mut self, loan: PendingLoan) {
        if !self.session.is_current(loan.account, loan.epoch) {
            debug!("Dropping stale loan {} for {}", loan.ticket.id, loan.account);
            return;
        }
        self.credit_loan(loan.account, loan.ticket.amount);
    }

    fn credit_loan(&mut self, id: AccountId, amount: Money) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let now = self.clock.now();
        self.accounts[index].push_movement(amount, now);
        calculate_balance(&mut self.accounts[index]);
        self.restart_timer();
        debug!("Credited loan of {} to {}", amount, id);
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}
