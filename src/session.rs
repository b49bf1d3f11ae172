//! Login session state.

use crate::account::AccountId;

/// Binding between the user and at most one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,

    /// `epoch` identifies this particular login; work scheduled under an
    /// older epoch is stale.
    LoggedIn { account: AccountId, epoch: u64 },
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    /// The bound account, if any.
    pub fn account(&self) -> Option<AccountId> {
        match self {
            Session::LoggedIn { account, .. } => Some(*account),
            Session::LoggedOut => None,
        }
    }

    /// The active epoch, if any.
    pub fn epoch(&self) -> Option<u64> {
        match self {
            Session::LoggedIn { epoch, .. } => Some(*epoch),
            Session::LoggedOut => None,
        }
    }

    /// Returns `true` if work scheduled by `account` under `epoch` may still run.
    pub fn is_current(&self, account: AccountId, epoch: u64) -> bool {
        *self == Session::LoggedIn { account, epoch }
    }
}
