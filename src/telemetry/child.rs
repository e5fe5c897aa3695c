//! The Child node: sample the sensor and transmit the reading

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::{encode_reading, is_over_threshold, Alert, AlertPattern, Sensor, CHILD_TICKS_PER_SAMPLE, SEND_TIMEOUT_US};
use crate::error::Error;
use crate::{InitFailures, Radio};

/// What a Child tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChildEvent {
    // Not a sampling tick
    Idle,
    // A reading was sampled and has left the antenna (delivery is never confirmed)
    Sent { reading: u16, over_threshold: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNode {
    ticks_until_sample: u8,
    ticks_per_sample: u8,
    send_timeout_us: Option<u32>,
}

impl ChildNode {
    pub const fn new() -> Self {
        Self::with_cadence(CHILD_TICKS_PER_SAMPLE)
    }

    pub const fn with_cadence(ticks_per_sample: u8) -> Self {
        Self {
            ticks_until_sample: ticks_per_sample,
            ticks_per_sample,
            send_timeout_us: Some(SEND_TIMEOUT_US),
        }
    }

    /// Bound on the wait for each transmission. `None` waits forever.
    pub const fn with_send_timeout(mut self, timeout_us: Option<u32>) -> Self {
        self.send_timeout_us = timeout_us;
        self
    }

    /// Configure the radio and announce power-on. The returned failures are
    /// informational; the node runs regardless.
    pub fn start<CE, CSN, SPI, DELAY, GPIOE, SPIE, A>(
        &mut self,
        radio: &mut Radio<CE, CSN, SPI, DELAY>,
        spi: &mut SPI,
        delay: &mut DELAY,
        alert: &mut A,
    ) -> Result<InitFailures, Error<GPIOE, SPIE>>
    where
        CE: OutputPin<Error = GPIOE>,
        CSN: OutputPin<Error = GPIOE>,
        SPI: SpiBus<u8, Error = SPIE>,
        DELAY: DelayNs,
        A: Alert,
    {
        let failures = radio.init(spi, delay)?;
        alert.sound(AlertPattern::ChildPowerOn);
        Ok(failures)
    }

    /// Run one tick: every `ticks_per_sample` ticks sample the sensor, alert
    /// when over the threshold, and send the reading unconditionally.
    pub fn on_tick<CE, CSN, SPI, DELAY, GPIOE, SPIE, S, A>(
        &mut self,
        radio: &mut Radio<CE, CSN, SPI, DELAY>,
        spi: &mut SPI,
        delay: &mut DELAY,
        sensor: &mut S,
        alert: &mut A,
    ) -> Result<ChildEvent, Error<GPIOE, SPIE>>
    where
        CE: OutputPin<Error = GPIOE>,
        CSN: OutputPin<Error = GPIOE>,
        SPI: SpiBus<u8, Error = SPIE>,
        DELAY: DelayNs,
        S: Sensor,
        A: Alert,
    {
        self.ticks_until_sample = self.ticks_until_sample.saturating_sub(1);
        if self.ticks_until_sample > 0 {
            return Ok(ChildEvent::Idle);
        }
        self.ticks_until_sample = self.ticks_per_sample;

        let reading = sensor.sample();
        let over_threshold = is_over_threshold(reading);
        if over_threshold {
            log_info!("reading {} over threshold", reading);
            alert.sound(AlertPattern::OverThreshold);
        }

        let payload = encode_reading(reading);
        match self.send_timeout_us {
            Some(timeout_us) => radio.send_packet_timeout(&payload, timeout_us, spi, delay)?,
            None => radio.send_packet(&payload, spi, delay)?,
        }

        Ok(ChildEvent::Sent { reading, over_threshold })
    }
}

impl Default for ChildNode {
    fn default() -> Self {
        Self::new()
    }
}
