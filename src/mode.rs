//! Transmit / receive mode control.
//!
//! The mode is the pair (PRIM_RX, CE). Both halves always move together: the
//! mode bit is written and read back first, and the enable line is only
//! touched once the device has accepted it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::error::Error;
use crate::register::{Interrupts, Register};
use crate::state::TransceiverMode;
use crate::{Radio, TX_SEND_TIME_US};

impl<CE, CSN, SPI, DELAY, GPIOE, SPIE> Radio<CE, CSN, SPI, DELAY>
    where CE: OutputPin<Error = GPIOE>,
          CSN: OutputPin<Error = GPIOE>,
          SPI: SpiBus<u8, Error = SPIE>,
          DELAY: DelayNs {
    /// The current mode, as implied by the cached CONFIG byte and the enable line
    pub fn mode(&self) -> TransceiverMode {
        TransceiverMode::from_lines(self.registers.config(), self.enable_high)
    }

    /// Whether the enable (CE) line is currently driven high
    pub fn is_enabled(&self) -> bool {
        self.enable_high
    }

    /// Clear every interrupt flag and switch the mode bit to transmit.
    ///
    /// When leaving Listening the enable line drops before the mode bit
    /// changes. If the device rejects the mode bit the line is raised again,
    /// so the radio stays Listening.
    pub fn start_transmit_mode(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.clear_interrupts(Interrupts::all(), spi)?;

        let was_enabled = self.enable_high;
        if was_enabled {
            self.set_enable(false)?;
        }

        match self.set_primary_rx(false, spi) {
            Err(error @ Error::ModeChangeRejected { .. }) if was_enabled => {
                self.set_enable(true)?;
                Err(error)
            },
            result => result,
        }
    }

    /// Pulse the enable line to send the payload at the head of the TX FIFO
    pub fn initiate_transmit(&mut self, delay: &mut DELAY) -> Result<(), Error<GPIOE, SPIE>> {
        self.set_enable(true)?;
        delay.delay_us(TX_SEND_TIME_US);
        self.set_enable(false)
    }

    /// Acknowledge a completed transmission. Only TX_DS is cleared, other
    /// flags are left for their owners.
    pub fn end_transmit_mode(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.clear_interrupts(Interrupts::TX_DS, spi)
    }

    /// Switch the mode bit to receive and hold the enable line high. The device
    /// keeps filling the RX FIFO until [`Radio::end_receive_mode`].
    pub fn start_receive_mode(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.set_primary_rx(true, spi)?;
        self.set_enable(true)
    }

    /// Leave listening: drop the enable line, discard the RX FIFO and clear RX_DR
    pub fn end_receive_mode(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.set_enable(false)?;
        self.flush_rx(spi)?;
        self.clear_interrupts(Interrupts::RX_DR, spi)
    }

    /// Write PRIM_RX and confirm it by read-back. On a mismatch the cache keeps
    /// the previous value and the caller must not touch the enable line.
    fn set_primary_rx(&mut self, rx: bool, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        let config = self.registers.config().with_prim_rx(rx);
        if config == self.registers.config() {
            return Ok(());
        }

        self.write_register(Register::Config, config.0, spi)?;
        let found = self.read_register(Register::Config, spi)?;
        if found != config.0 {
            log_warn!("mode change rejected: wrote {} read {}", config.0, found);
            return Err(Error::ModeChangeRejected { expected: config.0, found });
        }

        self.registers.set(Register::Config, config.0);
        Ok(())
    }

    fn set_enable(&mut self, high: bool) -> Result<(), Error<GPIOE, SPIE>> {
        if high {
            self.ce.set_high().map_err(Error::GpioError)?;
        } else {
            self.ce.set_low().map_err(Error::GpioError)?;
        }
        self.enable_high = high;
        Ok(())
    }
}
