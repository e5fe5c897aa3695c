//! The Parent node: listen for readings and watch the link

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::{decode_reading, is_over_threshold, Alert, AlertPattern, LinkCountdown, LINK_COUNTDOWN_MAX};
use crate::error::Error;
use crate::{InitFailures, Radio};

/// What a Parent tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParentEvent {
    /// The reading received this tick, if any
    pub reading: Option<u16>,
    pub over_threshold: bool,
    /// A whole countdown window passed without a reception
    pub link_down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentNode {
    countdown: LinkCountdown,
}

impl ParentNode {
    pub const fn new() -> Self {
        Self::with_countdown(LINK_COUNTDOWN_MAX)
    }

    pub const fn with_countdown(max: u8) -> Self {
        Self { countdown: LinkCountdown::new(max) }
    }

    pub fn countdown(&self) -> &LinkCountdown {
        &self.countdown
    }

    /// Configure the radio, announce power-on and start listening
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
        alert.sound(AlertPattern::ParentPowerOn);
        radio.start_receive_mode(spi)?;
        self.countdown.reset();
        Ok(failures)
    }

    /// Run one tick: consume at most one payload (anything else that arrived
    /// is flushed with the FIFO), evaluate the threshold, and advance the
    /// liveness countdown.
    pub fn on_tick<CE, CSN, SPI, DELAY, GPIOE, SPIE, A>(
        &mut self,
        radio: &mut Radio<CE, CSN, SPI, DELAY>,
        spi: &mut SPI,
        alert: &mut A,
    ) -> Result<ParentEvent, Error<GPIOE, SPIE>>
    where
        CE: OutputPin<Error = GPIOE>,
        CSN: OutputPin<Error = GPIOE>,
        SPI: SpiBus<u8, Error = SPIE>,
        DELAY: DelayNs,
        A: Alert,
    {
        let mut event = ParentEvent::default();

        if radio.is_packet_received(spi)? {
            let mut payload = [0u8; 2];
            radio.read_fifo(&mut payload, spi)?;
            radio.end_receive_mode(spi)?;
            radio.start_receive_mode(spi)?;

            let reading = decode_reading(payload);
            event.reading = Some(reading);
            event.over_threshold = is_over_threshold(reading);
            if event.over_threshold {
                log_info!("reading {} over threshold", reading);
                alert.sound(AlertPattern::OverThreshold);
            }
        }

        event.link_down = self.countdown.tick(event.reading.is_some());
        if event.link_down {
            log_warn!("no reading for {} ticks, link down", self.countdown.max());
            alert.sound(AlertPattern::LinkDown);
        }

        Ok(event)
    }
}

impl Default for ParentNode {
    fn default() -> Self {
        Self::new()
    }
}
