//! Payload transfer through the TX and RX FIFOs

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::command::Command;
use crate::config::MAX_PAYLOAD_SIZE;
use crate::error::Error;
use crate::register::{FifoStatus, Interrupts, Register, Status};
use crate::{Radio, DUMMY_BYTE, POLL_INTERVAL_US};

impl<CE, CSN, SPI, DELAY, GPIOE, SPIE> Radio<CE, CSN, SPI, DELAY>
    where CE: OutputPin<Error = GPIOE>,
          CSN: OutputPin<Error = GPIOE>,
          SPI: SpiBus<u8, Error = SPIE>,
          DELAY: DelayNs {
    /// Send a packet and busy-wait until it has left the antenna.
    ///
    /// With auto-acknowledge off, completion says nothing about whether the
    /// other end heard it. There is no timeout: an unresponsive device blocks
    /// forever, see [`Radio::send_packet_timeout`].
    pub fn send_packet(&mut self, packet: &[u8], spi: &mut SPI, delay: &mut DELAY) -> Result<(), Error<GPIOE, SPIE>> {
        self.transmit(packet, None, spi, delay)
    }

    /// Send a packet, giving up with [`Error::Unresponsive`] once `timeout_us`
    /// has passed without the data sent flag.
    pub fn send_packet_timeout(&mut self, packet: &[u8], timeout_us: u32, spi: &mut SPI, delay: &mut DELAY) -> Result<(), Error<GPIOE, SPIE>> {
        self.transmit(packet, Some(timeout_us), spi, delay)
    }

    fn transmit(&mut self, packet: &[u8], timeout_us: Option<u32>, spi: &mut SPI, delay: &mut DELAY) -> Result<(), Error<GPIOE, SPIE>> {
        if packet.is_empty() || packet.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength);
        }

        self.start_transmit_mode(spi)?;
        self.write_fifo(packet, spi)?;
        self.initiate_transmit(delay)?;
        self.wait_for(Interrupts::TX_DS, timeout_us, spi, delay)?;
        self.end_transmit_mode(spi)
    }

    /// Whether the last transmission has completed
    pub fn is_packet_transmitted(&mut self, spi: &mut SPI) -> Result<bool, Error<GPIOE, SPIE>> {
        Ok(self.read_status(spi)?.tx_ds())
    }

    /// Whether a payload is waiting in the RX FIFO
    pub fn is_packet_received(&mut self, spi: &mut SPI) -> Result<bool, Error<GPIOE, SPIE>> {
        Ok(self.read_status(spi)?.rx_dr())
    }

    /// Enter listening, wait for one payload, read it into `buffer` and leave
    /// listening again. Blocks forever if nothing arrives.
    pub fn receive_packet(&mut self, buffer: &mut [u8], spi: &mut SPI, delay: &mut DELAY) -> Result<usize, Error<GPIOE, SPIE>> {
        self.receive(buffer, None, spi, delay)
    }

    /// As [`Radio::receive_packet`], but returns [`Error::Unresponsive`] once
    /// `timeout_us` has passed without a payload. Listening is left either way.
    pub fn receive_packet_timeout(&mut self, buffer: &mut [u8], timeout_us: u32, spi: &mut SPI, delay: &mut DELAY) -> Result<usize, Error<GPIOE, SPIE>> {
        self.receive(buffer, Some(timeout_us), spi, delay)
    }

    fn receive(&mut self, buffer: &mut [u8], timeout_us: Option<u32>, spi: &mut SPI, delay: &mut DELAY) -> Result<usize, Error<GPIOE, SPIE>> {
        if buffer.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength);
        }

        self.start_receive_mode(spi)?;
        let read = match self.wait_for(Interrupts::RX_DR, timeout_us, spi, delay) {
            Ok(_) => self.read_fifo(buffer, spi),
            Err(error) => Err(error),
        };
        self.end_receive_mode(spi)?;

        read
    }

    /// Flush the TX FIFO and burst `payload` into it. An empty payload is a no-op.
    pub fn write_fifo(&mut self, payload: &[u8], spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength);
        }
        if payload.is_empty() {
            return Ok(());
        }

        self.flush_tx(spi)?;
        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::WriteTxPayload.opcode())?;
            for byte in payload {
                Self::exchange(spi, *byte)?;
            }
            Ok(())
        })?;

        log_debug!("queued {} byte payload", payload.len());
        Ok(())
    }

    /// Burst `buffer.len()` bytes out of the RX FIFO. The requested length is
    /// trusted; an empty buffer is a no-op.
    pub fn read_fifo(&mut self, buffer: &mut [u8], spi: &mut SPI) -> Result<usize, Error<GPIOE, SPIE>> {
        if buffer.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength);
        }
        if buffer.is_empty() {
            return Ok(0);
        }

        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::ReadRxPayload.opcode())?;
            for byte in buffer.iter_mut() {
                *byte = Self::exchange(spi, DUMMY_BYTE)?;
            }
            Ok(buffer.len())
        })
    }

    pub fn read_fifo_status(&mut self, spi: &mut SPI) -> Result<FifoStatus, Error<GPIOE, SPIE>> {
        Ok(FifoStatus(self.read_register(Register::FifoStatus, spi)?))
    }

    pub fn flush_tx(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.write_command(Command::FlushTx, spi).map(|_| ())
    }

    pub fn flush_rx(&mut self, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.write_command(Command::FlushRx, spi).map(|_| ())
    }

    /// Clear the given interrupt flags (write one to clear)
    pub fn clear_interrupts(&mut self, interrupts: Interrupts, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.write_register(Register::Status, interrupts.bits(), spi)
    }

    /// Poll the status byte until `flag` shows up. With a timeout the poll
    /// sleeps between reads and gives up with [`Error::Unresponsive`].
    fn wait_for(&mut self, flag: Interrupts, timeout_us: Option<u32>, spi: &mut SPI, delay: &mut DELAY) -> Result<Status, Error<GPIOE, SPIE>> {
        let mut remaining = timeout_us;

        loop {
            let status = self.read_status(spi)?;
            if status.0 & flag.bits() != 0 {
                return Ok(status);
            }

            if let Some(remaining) = remaining.as_mut() {
                if *remaining == 0 {
                    log_warn!("no response from radio while waiting for {:?}", flag);
                    return Err(Error::Unresponsive);
                }
                let step = POLL_INTERVAL_US.min(*remaining);
                delay.delay_us(step);
                *remaining -= step;
            }
        }
    }
}
