#![cfg_attr(not(test), no_std)]
//! Driver and telemetry protocol for a two-node nRF24L01 temperature sentinel.
//!
//! The [`Radio`] owns the enable (CE) and bus-select (CSN) lines of the module
//! together with a shadow copy of its registers. The SPI bus and the delay
//! provider are borrowed per call so they can be shared with other tasks.
//!
//! On top of the driver, [`telemetry`] implements the tick driven protocol of
//! the two nodes: the Child samples and transmits, the Parent listens,
//! evaluates the threshold and watches the link.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

#[macro_use]
mod log;

pub mod bit_mnemonics;

pub mod command;
use command::Command;

pub mod config;
use config::{Configuration, RegisterValue};

pub mod error;
use error::Error;

mod mode;
mod packet;

pub mod register;
use register::{Register, RegisterFile, Status, REGISTER_COUNT};

pub mod state;

pub mod telemetry;

#[cfg(test)]
mod mock;

// Datasheet defined time periods
const START_UP_US: u32 = 1500;
const TX_SEND_TIME_US: u32 = 10;
const POLL_INTERVAL_US: u32 = 10;

// Longest pipe address the device accepts
const MAX_ADDRESS_BYTES: usize = 5;

// Byte clocked out while reading, it is the NOP opcode so a stray read is harmless
const DUMMY_BYTE: u8 = 0xFF;

bitflags::bitflags! {
    /// Registers whose read-back did not match during [`Radio::init`]. An empty
    /// set means every validated write took.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InitFailures: u8 {
        const CONFIG = 1 << 0;
        const SETUP_RETRANSMIT = 1 << 1;
        const SETUP_ADDRESS_WIDTH = 1 << 2;
        const RF_SETUP = 1 << 3;
        const RX_PAYLOAD_WIDTH = 1 << 4;
        const RF_CHANNEL = 1 << 5;
        const AUTO_ACKNOWLEDGE = 1 << 6;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InitFailures {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "InitFailures({=u8:#x})", self.bits())
    }
}

pub struct Radio<CE, CSN, SPI, DELAY> {
    ce: CE,
    csn: CSN,
    configuration: Configuration,
    registers: RegisterFile,
    enable_high: bool,
    phantom: PhantomData<(SPI, DELAY)>,
}

impl<CE, CSN, SPI, DELAY, GPIOE, SPIE> Radio<CE, CSN, SPI, DELAY>
    where CE: OutputPin<Error = GPIOE>,
          CSN: OutputPin<Error = GPIOE>,
          SPI: SpiBus<u8, Error = SPIE>,
          DELAY: DelayNs {
    /// Create a new Radio Driver Instance, leaving the bus deselected and the radio disabled
    pub fn new(mut ce: CE, mut csn: CSN, configuration: Configuration) -> Result<Self, Error<GPIOE, SPIE>> {
        ce.set_low().map_err(Error::GpioError)?;
        csn.set_high().map_err(Error::GpioError)?;

        Ok(Self {
            ce,
            csn,
            configuration,
            registers: RegisterFile::new(),
            enable_high: false,
            phantom: PhantomData,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The shadow registers as last written and confirmed
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Read every register into the cache, then apply the configuration.
    ///
    /// Each validated write is read back; a mismatch sets the matching flag in
    /// the returned set and leaves the cached value untouched. The sequence is
    /// always run to the end. Only bus and pin errors abort it.
    pub fn init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<InitFailures, Error<GPIOE, SPIE>> {
        self.ce.set_low().map_err(Error::GpioError)?;
        self.enable_high = false;
        self.csn.set_high().map_err(Error::GpioError)?;

        for address in 0..REGISTER_COUNT as u8 {
            if let Some(register) = Register::from_address(address) {
                let value = self.read_register(register, spi)?;
                self.registers.set(register, value);
            }
        }

        let mut failures = InitFailures::empty();
        let configuration = self.configuration;

        // Power up in the configured mode, then give the oscillator time to reach Standby
        let config = configuration.register_value(Register::Config);
        self.validated_write(Register::Config, config, InitFailures::CONFIG, &mut failures, spi)?;
        delay.delay_us(START_UP_US);

        let steps = [
            (Register::SetupRetransmit, InitFailures::SETUP_RETRANSMIT),
            (Register::SetupAddressWidth, InitFailures::SETUP_ADDRESS_WIDTH),
            (Register::RfSetup, InitFailures::RF_SETUP),
            (Register::RxPayloadWidthP0, InitFailures::RX_PAYLOAD_WIDTH),
            (Register::RfChannel, InitFailures::RF_CHANNEL),
        ];
        for (register, failure) in steps {
            let value = configuration.register_value(register);
            self.validated_write(register, value, failure, &mut failures, spi)?;
        }

        // RX_ADDR_P0 keeps its reset value, which is expected to equal the pipe address.
        // TX_ADDR is read back but not part of the aggregate result.
        self.write_address(Register::TxAddress, &configuration.address, spi)?;

        let auto_acknowledge = configuration.register_value(Register::EnableAutoAcknowledge);
        self.validated_write(Register::EnableAutoAcknowledge, auto_acknowledge, InitFailures::AUTO_ACKNOWLEDGE, &mut failures, spi)?;

        if failures.is_empty() {
            log_info!("radio configured");
        } else {
            log_warn!("radio init failed read-back: {:?}", failures);
        }

        Ok(failures)
    }

    /// Re-read a register and compare it against the cache
    pub fn verify_register(&mut self, register: Register, spi: &mut SPI) -> Result<bool, Error<GPIOE, SPIE>> {
        Ok(self.read_register(register, spi)? == self.registers.get(register))
    }

    fn validated_write(
        &mut self,
        register: Register,
        value: u8,
        failure: InitFailures,
        failures: &mut InitFailures,
        spi: &mut SPI,
    ) -> Result<(), Error<GPIOE, SPIE>> {
        self.write_register(register, value, spi)?;
        let found = self.read_register(register, spi)?;

        if found == value {
            self.registers.set(register, value);
        } else {
            log_warn!("register {:?} read back {} instead of {}", register, found, value);
            failures.insert(failure);
        }

        Ok(())
    }

    /// Read a single byte register
    pub fn read_register(&mut self, register: Register, spi: &mut SPI) -> Result<u8, Error<GPIOE, SPIE>> {
        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::ReadRegister(register).opcode())?;
            Self::exchange(spi, DUMMY_BYTE)
        })
    }

    /// Write a single byte register. Whether it took is only known by reading it back.
    pub fn write_register(&mut self, register: Register, value: u8, spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::WriteRegister(register).opcode())?;
            Self::exchange(spi, value)?;
            Ok(())
        })
    }

    /// Write a multi-byte address register, least significant byte first, and
    /// read it back. Returns whether every byte took; the cached first byte
    /// only changes when it did.
    pub fn write_address(&mut self, register: Register, address: &[u8], spi: &mut SPI) -> Result<bool, Error<GPIOE, SPIE>> {
        if address.len() > MAX_ADDRESS_BYTES {
            return Err(Error::InvalidPayloadLength);
        }

        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::WriteRegister(register).opcode())?;
            for byte in address {
                Self::exchange(spi, *byte)?;
            }
            Ok(())
        })?;

        let mut found = [0u8; MAX_ADDRESS_BYTES];
        let found = &mut found[..address.len()];
        self.read_address(register, found, spi)?;

        if found != address {
            log_warn!("address register {:?} did not take", register);
            return Ok(false);
        }

        if let Some(first) = address.first() {
            self.registers.set(register, *first);
        }
        Ok(true)
    }

    /// Read `buffer.len()` bytes of a multi-byte address register, least significant byte first
    pub fn read_address(&mut self, register: Register, buffer: &mut [u8], spi: &mut SPI) -> Result<(), Error<GPIOE, SPIE>> {
        if buffer.len() > MAX_ADDRESS_BYTES {
            return Err(Error::InvalidPayloadLength);
        }

        self.transaction(spi, |spi| {
            Self::exchange(spi, Command::ReadRegister(register).opcode())?;
            for byte in buffer.iter_mut() {
                *byte = Self::exchange(spi, DUMMY_BYTE)?;
            }
            Ok(())
        })
    }

    /// Issue a single byte command, returning the status clocked out alongside it
    pub fn write_command(&mut self, command: Command, spi: &mut SPI) -> Result<Status, Error<GPIOE, SPIE>> {
        self.transaction(spi, |spi| Self::exchange(spi, command.opcode()).map(Status))
    }

    pub fn read_status(&mut self, spi: &mut SPI) -> Result<Status, Error<GPIOE, SPIE>> {
        self.write_command(Command::Nop, spi)
    }

    /// Hold the bus-select line low for the duration of `body`. The line is
    /// released even when the exchange fails.
    fn transaction<T>(
        &mut self,
        spi: &mut SPI,
        body: impl FnOnce(&mut SPI) -> Result<T, SPIE>,
    ) -> Result<T, Error<GPIOE, SPIE>> {
        self.csn.set_low().map_err(Error::GpioError)?;
        let result = body(spi);
        self.csn.set_high().map_err(Error::GpioError)?;
        result.map_err(Error::SpiError)
    }

    /// Shift one byte out while shifting one in, blocking until the shift completes
    fn exchange(spi: &mut SPI, byte: u8) -> Result<u8, SPIE> {
        let mut buffer = [byte];
        spi.transfer_in_place(&mut buffer)?;
        spi.flush()?;
        Ok(buffer[0])
    }
}
