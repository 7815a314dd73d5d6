//! Resend cooldown countdown.

use hm_shared::config::otp::DEFAULT_RESEND_COOLDOWN_SECONDS;

/// Seconds remaining before another code may be requested
///
/// Counts down by one per tick and holds at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    start: u32,
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_COOLDOWN_SECONDS)
    }
}

impl Countdown {
    /// Create a countdown already running from `start`
    pub fn new(start: u32) -> Self {
        Self {
            start,
            remaining: start,
        }
    }

    /// A countdown that has already finished
    pub fn finished(start: u32) -> Self {
        Self {
            start,
            remaining: 0,
        }
    }

    /// The value `restart` resets to
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Seconds remaining
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one second, returning what remains
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Reset to the start value
    pub fn restart(&mut self) {
        self.remaining = self.start;
    }

    /// Whether the countdown reached zero
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Text shown next to the resend action, `None` once finished
    pub fn display(&self) -> Option<String> {
        if self.is_finished() {
            return None;
        }
        Some(format_remaining(self.remaining))
    }
}

/// Format seconds as `m:ss`
pub fn format_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
