//! Delayed loan credits.
//!
//! A loan is approved after a fixed delay. Each pending loan remembers the
//! session epoch that requested it; ending the session cancels everything
//! still queued.

use crate::account::AccountId;
use crate::money::Money;
use serde::Serialize;

/// Handle returned when a loan is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanTicket {
    pub id: u64,
    pub amount: Money,

    /// Logical time (ms) at which the loan is credited.
    pub due_at: u64,
}

/// A loan waiting for its approval delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoan {
    pub ticket: LoanTicket,
    pub account: AccountId,
    pub epoch: u64,
}

/// Pending loans ordered by due time, then by request order.
#[derive(Debug, Default)]
pub struct LoanQueue {
    pending: Vec<PendingLoan>,
    next_id: u64,
}

impl LoanQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, account: AccountId, epoch: u64, amount: Money, due_at: u64) -> LoanTicket {
        self.next_id += 1;
        let ticket = LoanTicket {
            id: self.next_id,
            amount,
            due_at,
        };

        // stable: equal due times keep request order
        let pos = self.pending.partition_point(|p| p.ticket.due_at <= due_at);
        self.pending.insert(
            pos,
            PendingLoan {
                ticket,
                account,
                epoch,
            },
        );
        ticket
    }

    /// Due time of the earliest pending loan.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|p| p.ticket.due_at)
    }

    /// Removes and returns the earliest loan if it is due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<PendingLoan> {
        match self.pending.first() {
            Some(p) if p.ticket.due_at <= now_ms => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    /// Drops every pending loan, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_respects_time() {
        let mut queue = LoanQueue::new();
        queue.schedule(AccountId(1), 1, Money::from_units(100), 2_500);

        assert!(queue.pop_due(2_499).is_none());
        let loan = queue.pop_due(2_500).unwrap();
        assert_eq!(loan.ticket.amount, Money::from_units(100));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_loans_come_out_in_due_order() {
        let mut queue = LoanQueue::new();
        let late = queue.schedule(AccountId(1), 1, Money::from_units(1), 5_000);
        let early = queue.schedule(AccountId(1), 1, Money::from_units(2), 3_000);
        let tie = queue.schedule(AccountId(1), 1, Money::from_units(3), 5_000);

        assert_eq!(queue.next_due(), Some(3_000));
        assert_eq!(queue.pop_due(10_000).unwrap().ticket, early);
        assert_eq!(queue.pop_due(10_000).unwrap().ticket, late);
        assert_eq!(queue.pop_due(10_000).unwrap().ticket, tie);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = LoanQueue::new();
        queue.schedule(AccountId(1), 1, Money::from_units(1), 1_000);
        queue.schedule(AccountId(2), 1, Money::from_units(1), 2_000);

        assert_eq!(queue.cancel_all(), 2);
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn test_ticket_ids_increase() {
        let mut queue = LoanQueue::new();
        let a = queue.schedule(AccountId(1), 1, Money::from_units(1), 1_000);
        let b = queue.schedule(AccountId(1), 1, Money::from_units(1), 1_000);
        assert!(b.id > a.id);
        assert_eq!(queue.len(), 2);
    }
}
