//! Inactivity logout timer.
//!
//! Counts down in one-second ticks. The session ends on the tick that brings
//! the counter to zero.

/// Tick period in milliseconds.
pub const TICK_MS: u64 = 1_000;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Expired,
}

/// A running countdown. Cancelling is dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutTimer {
    remaining: u32,
    next_tick_at: u64,
}

impl LogoutTimer {
    /// Starts a countdown of `seconds` at logical time `now_ms`.
    pub fn start(now_ms: u64, seconds: u32) -> Self {
        LogoutTimer {
            remaining: seconds,
            next_tick_at: now_ms + TICK_MS,
        }
    }

    /// Seconds left on the counter.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Logical time of the next tick.
    pub fn next_tick_at(&self) -> u64 {
        self.next_tick_at
    }

    /// Decrements the counter and schedules the next tick.
    pub fn tick(&mut self) -> TimerState {
        self.remaining = self.remaining.saturating_sub(1);
        self.next_tick_at += TICK_MS;

        if self.remaining == 0 {
            TimerState::Expired
        } else {
            TimerState::Running
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_countdown(self.remaining)
    }
}

/// Formats a second count as zero-padded `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(120), "02:00");
        assert_eq!(format_countdown(119), "01:59");
        assert_eq!(format_countdown(5), "00:05");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn test_start_shows_full_countdown() {
        let timer = LogoutTimer::start(0, 120);
        assert_eq!(timer.display(), "02:00");
        assert_eq!(timer.next_tick_at(), 1_000);
    }

    #[test]
    fn test_expires_on_last_tick() {
        let mut timer = LogoutTimer::start(500, 3);
        assert_eq!(timer.tick(), TimerState::Running);
        assert_eq!(timer.tick(), TimerState::Running);
        assert_eq!(timer.display(), "00:01");
        assert_eq!(timer.tick(), TimerState::Expired);
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.next_tick_at(), 3_500);
    }
}
