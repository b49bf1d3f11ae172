//! Logical clock driving timers and delayed loans.
//!
//! Time only moves when the bank is told to advance, which keeps every
//! timer tick and loan credit reproducible.

use chrono::{DateTime, Duration, Utc};

/// Wall-clock origin plus elapsed milliseconds.
///
/// Elapsed time is capped at the last instant chrono can represent, so
/// `now()` never leaves the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    origin: DateTime<Utc>,
    elapsed_ms: u64,
    horizon_ms: u64,
}

impl Clock {
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        let horizon = (DateTime::<Utc>::MAX_UTC - origin).num_milliseconds();
        Clock {
            origin,
            elapsed_ms: 0,
            horizon_ms: u64::try_from(horizon).unwrap_or(0),
        }
    }

    /// Milliseconds since the origin.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Largest elapsed value the clock will accept.
    pub fn horizon_ms(&self) -> u64 {
        self.horizon_ms
    }

    /// Wall-clock instant for the current logical time.
    pub fn now(&self) -> DateTime<Utc> {
        self.instant_at(self.elapsed_ms)
    }

    /// Wall-clock instant for an arbitrary logical time, saturating at the
    /// end of the representable range.
    pub fn instant_at(&self, elapsed_ms: u64) -> DateTime<Utc> {
        let offset = i64::try_from(elapsed_ms.min(self.horizon_ms)).unwrap_or(i64::MAX);
        self.origin
            .checked_add_signed(Duration::milliseconds(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Moves to `elapsed_ms`, clamped to the horizon. Time never runs backwards.
    pub fn set_elapsed(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms.min(self.horizon_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn origin() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_now_tracks_elapsed() {
        let mut clock = Clock::starting_at(origin());
        assert_eq!(clock.now(), origin());

        clock.set_elapsed(2_500);
        assert_eq!(clock.now(), origin() + Duration::milliseconds(2_500));
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut clock = Clock::starting_at(origin());
        clock.set_elapsed(5_000);
        clock.set_elapsed(1_000);
        assert_eq!(clock.elapsed_ms(), 5_000);
    }

    #[test]
    fn test_elapsed_is_capped_at_horizon() {
        let mut clock = Clock::starting_at(origin());
        clock.set_elapsed(u64::MAX);

        assert_eq!(clock.elapsed_ms(), clock.horizon_ms());
        assert!(clock.now() <= DateTime::<Utc>::MAX_UTC);
        assert_eq!(clock.instant_at(u64::MAX), clock.now());
    }
}
