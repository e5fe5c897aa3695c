//! Link liveness countdown of the Parent

/// Decrements once per tick and fires when a whole window of ticks has passed
/// without a reception. A reception restarts the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkCountdown {
    remaining: u8,
    max: u8,
}

impl LinkCountdown {
    pub const fn new(max: u8) -> Self {
        Self { remaining: max, max }
    }

    pub const fn remaining(&self) -> u8 {
        self.remaining
    }

    pub const fn max(&self) -> u8 {
        self.max
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }

    /// Advance by one tick. Returns true when the link is considered down, in
    /// which case the countdown has already been restarted.
    pub fn tick(&mut self, received: bool) -> bool {
        self.remaining = self.remaining.saturating_sub(1);

        if received {
            self.reset();
            false
        } else if self.remaining == 0 {
            self.reset();
            true
        } else {
            false
        }
    }
}
