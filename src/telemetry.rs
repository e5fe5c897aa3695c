//!
//! The tick driven telemetry protocol of the two sentinel nodes.
//!
//! Both nodes are driven by a periodic tick of [`TICK_PERIOD_MS`]. The
//! application binds `on_tick` to its timer (a timer interrupt or a periodic
//! RTIC task) after `start` has returned. All radio work, including the
//! blocking waits, runs inside the tick, so a tick must finish within one
//! period; use the bounded send timeout to keep that guaranteed.
//!
//! ```ignore
//! let mut child = ChildNode::new();
//! child.start(&mut radio, &mut spi, &mut delay, &mut buzzer)?;
//! // every TICK_PERIOD_MS:
//! child.on_tick(&mut radio, &mut spi, &mut delay, &mut adc, &mut buzzer)?;
//! ```

pub mod child;
pub use child::{ChildEvent, ChildNode};

pub mod countdown;
pub use countdown::LinkCountdown;

pub mod parent;
pub use parent::{ParentEvent, ParentNode};

/// Period of the tick driving both nodes
pub const TICK_PERIOD_MS: u32 = 500;

/// The Child samples every second tick (once per second)
pub const CHILD_TICKS_PER_SAMPLE: u8 = 2;

/// Ticks without a reception before the Parent reports the link down (5 seconds)
pub const LINK_COUNTDOWN_MAX: u8 = 10;

/// Raw reading corresponding to ~37C on the internal temperature sensor
pub const OVER_THRESHOLD_READING: u16 = 763;

/// Default bound on the Child's wait for a transmission to complete, well
/// below one tick period
pub const SEND_TIMEOUT_US: u32 = 10_000;

/// Source of raw temperature readings. Calibration and bounds are the
/// implementor's concern.
pub trait Sensor {
    fn sample(&mut self) -> u16;
}

/// The audible alert generator
pub trait Alert {
    fn sound(&mut self, pattern: AlertPattern);
}

/// The patterns the nodes can ask the alert generator for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertPattern {
    // Child finished booting
    ChildPowerOn,
    // Parent finished booting and is about to listen
    ParentPowerOn,
    // A reading at or above the threshold
    OverThreshold,
    // No reception for a whole countdown window
    LinkDown,
}

impl AlertPattern {
    /// Number of beeps in the pattern
    pub const fn beeps(&self) -> u8 {
        match self {
            Self::ChildPowerOn | Self::OverThreshold => 1,
            Self::ParentPowerOn | Self::LinkDown => 2,
        }
    }
}

/// Whether a raw reading should sound the over-threshold alert
pub const fn is_over_threshold(reading: u16) -> bool {
    reading >= OVER_THRESHOLD_READING
}

/// A reading travels as two bytes in the node's native byte order
pub const fn encode_reading(reading: u16) -> [u8; 2] {
    reading.to_ne_bytes()
}

pub const fn decode_reading(payload: [u8; 2]) -> u16 {
    u16::from_ne_bytes(payload)
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::{Alert, AlertPattern, Sensor};

    #[derive(Default)]
    pub struct Readings {
        pub values: Vec<u16>,
        pub samples: usize,
    }

    impl Sensor for Readings {
        fn sample(&mut self) -> u16 {
            let value = self.values[self.samples.min(self.values.len() - 1)];
            self.samples += 1;
            value
        }
    }

    #[derive(Default)]
    pub struct Buzzer {
        pub sounded: Vec<AlertPattern>,
    }

    impl Buzzer {
        pub fn count(&self, pattern: AlertPattern) -> usize {
            self.sounded.iter().filter(|sounded| **sounded == pattern).count()
        }
    }

    impl Alert for Buzzer {
        fn sound(&mut self, pattern: AlertPattern) {
            self.sounded.push(pattern);
        }
    }
}
