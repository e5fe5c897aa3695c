//!
//! Configuration for the nRF24L01+ Module
//!

use crate::register::{
    ConfigRegister, Register, RfChannel, RfSetup, RxPayloadWidth, SetupRetransmit,
};

pub mod address_width;
use address_width::AddressWidth;

pub mod crc;
use crc::CRC;

pub mod data_rate;
use data_rate::DataRate;

pub mod error;
use error::ConfigurationError;

pub mod interrupt_mask;
use interrupt_mask::InterruptMask;

pub mod power_amplifier;
use power_amplifier::PowerAmplifier;

/// Size of the hardware TX and RX FIFO entries
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Highest legal RF channel (2400 + 125 MHz)
pub const MAX_RF_CHANNEL: u8 = 125;

/// The pipe address shared by the Child (as TX address) and the Parent (as the
/// pipe 0 RX address, left at its reset value).
pub const PIPE_ADDRESS: [u8; 5] = [0xE7, 0xE7, 0xE7, 0xE7, 0xE7];

/// The address width programmed into SETUP_AW. Narrower than `PIPE_ADDRESS`:
/// all five bytes are clocked into TX_ADDR but the radio only matches on the
/// first three.
pub const ADDRESS_WIDTH: AddressWidth = AddressWidth::A3Bytes;

/// RF channel shared by both nodes (2440 MHz)
pub const RF_CHANNEL: u8 = 40;

/// Every telemetry frame carries exactly one raw sensor reading
pub const PAYLOAD_WIDTH: u8 = 2;

pub trait RegisterValue {
    /// The bit value (pre-shifted) of the configuration option
    fn register_value(&self, register: Register) -> u8;
}

/// Configuration of the nRF24L01+ Module. Pipe 0 is the only pipe in use; its
/// RX address is expected to equal `address` from reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub interrupt_mask: InterruptMask,
    pub crc: CRC,
    /// Mode bit written with the power-up configuration
    pub start_in_rx: bool,
    pub address_width: AddressWidth,
    pub retransmit_delay: u8,
    pub retransmit_count: u8,
    pub rf_channel: u8,
    pub data_rate: DataRate,
    pub power_amplifier: PowerAmplifier,
    pub lna_high_current: bool,
    pub address: [u8; 5],
    pub payload_width: u8,
    pub auto_acknowledge: bool,
}

impl Configuration {
    /// The fixed pairing used by both sentinel nodes: 16-bit CRC, no
    /// retransmits, 2Mbps at 0dBm, channel 40, 2 byte payloads, no auto-ack.
    pub const fn sentinel() -> Self {
        Self {
            interrupt_mask: InterruptMask::retransmits(),
            crc: CRC::CRC2,
            start_in_rx: true,
            address_width: ADDRESS_WIDTH,
            retransmit_delay: 0,
            retransmit_count: 0,
            rf_channel: RF_CHANNEL,
            data_rate: DataRate::R2Mb,
            power_amplifier: PowerAmplifier::PAMax,
            lna_high_current: true,
            address: PIPE_ADDRESS,
            payload_width: PAYLOAD_WIDTH,
            auto_acknowledge: false,
        }
    }

    pub fn with_rf_channel(mut self, rf_channel: u8) -> Result<Self, ConfigurationError> {
        if rf_channel > MAX_RF_CHANNEL {
            return Err(ConfigurationError::InvalidRfChannel);
        }
        self.rf_channel = rf_channel;
        Ok(self)
    }

    pub fn with_retransmits(mut self, delay: u8, count: u8) -> Result<Self, ConfigurationError> {
        if delay > 0xF {
            return Err(ConfigurationError::InvalidRetransmitDelay);
        }
        if count > 0xF {
            return Err(ConfigurationError::InvalidRetransmitCount);
        }
        self.retransmit_delay = delay;
        self.retransmit_count = count;
        Ok(self)
    }

    pub fn with_payload_width(mut self, width: u8) -> Result<Self, ConfigurationError> {
        if width as usize > MAX_PAYLOAD_SIZE {
            return Err(ConfigurationError::InvalidPayloadWidth);
        }
        self.payload_width = width;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl RegisterValue for Configuration {
    fn register_value(&self, register: Register) -> u8 {
        match register {
            Register::Config => {
                let config = ConfigRegister(
                    self.interrupt_mask.register_value(register) | self.crc.register_value(register),
                );
                config.with_pwr_up(true).with_prim_rx(self.start_in_rx).0
            },
            Register::EnableAutoAcknowledge => if self.auto_acknowledge { 0b0011_1111 } else { 0x00 },
            Register::SetupAddressWidth => self.address_width.register_value(register),
            Register::SetupRetransmit => {
                SetupRetransmit::default()
                    .with_ard(self.retransmit_delay)
                    .with_arc(self.retransmit_count)
                    .0
            },
            Register::RfChannel => RfChannel::default().with_channel(self.rf_channel).0,
            Register::RfSetup => {
                let rf_setup = RfSetup(
                    self.data_rate.register_value(register) | self.power_amplifier.register_value(register),
                );
                rf_setup.with_lna_hcurr(self.lna_high_current).0
            },
            Register::RxPayloadWidthP0 => RxPayloadWidth::default().with_width(self.payload_width).0,
            _ => 0x00,
        }
    }
}
