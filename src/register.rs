//!
//! The Registers of the nRF24L01, the shadow register file and typed views
//! over the packed bit-fields of each configuration byte.
//!

use crate::bit_mnemonics::*;

/// Number of addressable registers (0x00 - 0x1D)
pub const REGISTER_COUNT: usize = 0x1E;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Config = 0x00,
    EnableAutoAcknowledge = 0x01,
    EnableRx = 0x02,
    SetupAddressWidth = 0x03,
    SetupRetransmit = 0x04,
    RfChannel = 0x05,
    RfSetup = 0x06,
    Status = 0x07,
    ObserveTx = 0x08,
    CarrierDetect = 0x09,
    RxAddressP0 = 0x0A,
    RxAddressP1 = 0x0B,
    RxAddressP2 = 0x0C,
    RxAddressP3 = 0x0D,
    RxAddressP4 = 0x0E,
    RxAddressP5 = 0x0F,
    TxAddress = 0x10,
    RxPayloadWidthP0 = 0x11,
    RxPayloadWidthP1 = 0x12,
    RxPayloadWidthP2 = 0x13,
    RxPayloadWidthP3 = 0x14,
    RxPayloadWidthP4 = 0x15,
    RxPayloadWidthP5 = 0x16,
    FifoStatus = 0x17,
    AckPayload = 0x18,
    TxPayload = 0x19,
    RxPayload = 0x1A,
    Reserved = 0x1B,
    DynamicPayload = 0x1C,
    Feature = 0x1D,
}

impl Register {
    /// The 5-bit register address
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Look up a register by its address
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Self::Config),
            0x01 => Some(Self::EnableAutoAcknowledge),
            0x02 => Some(Self::EnableRx),
            0x03 => Some(Self::SetupAddressWidth),
            0x04 => Some(Self::SetupRetransmit),
            0x05 => Some(Self::RfChannel),
            0x06 => Some(Self::RfSetup),
            0x07 => Some(Self::Status),
            0x08 => Some(Self::ObserveTx),
            0x09 => Some(Self::CarrierDetect),
            0x0A => Some(Self::RxAddressP0),
            0x0B => Some(Self::RxAddressP1),
            0x0C => Some(Self::RxAddressP2),
            0x0D => Some(Self::RxAddressP3),
            0x0E => Some(Self::RxAddressP4),
            0x0F => Some(Self::RxAddressP5),
            0x10 => Some(Self::TxAddress),
            0x11 => Some(Self::RxPayloadWidthP0),
            0x12 => Some(Self::RxPayloadWidthP1),
            0x13 => Some(Self::RxPayloadWidthP2),
            0x14 => Some(Self::RxPayloadWidthP3),
            0x15 => Some(Self::RxPayloadWidthP4),
            0x16 => Some(Self::RxPayloadWidthP5),
            0x17 => Some(Self::FifoStatus),
            0x18 => Some(Self::AckPayload),
            0x19 => Some(Self::TxPayload),
            0x1A => Some(Self::RxPayload),
            0x1B => Some(Self::Reserved),
            0x1C => Some(Self::DynamicPayload),
            0x1D => Some(Self::Feature),
            _ => None,
        }
    }

    /// The value of the register after power on reset
    pub const fn default_value(self) -> u8 {
        match self {
            Self::Config => 0b0000_1000,
            Self::EnableAutoAcknowledge => 0b0011_1111,
            Self::EnableRx => 0b0000_0011,
            Self::SetupAddressWidth => 0b0000_0011,
            Self::SetupRetransmit => 0b0000_0011,
            Self::RfChannel => 0b0000_0010,
            Self::RfSetup => 0b0000_1111,
            Self::Status => 0b0000_1110,
            Self::RxAddressP0 => 0xE7,
            Self::RxAddressP1 => 0xC2,
            Self::RxAddressP2 => 0xC3,
            Self::RxAddressP3 => 0xC4,
            Self::RxAddressP4 => 0xC5,
            Self::RxAddressP5 => 0xC6,
            Self::TxAddress => 0xE7,
            Self::FifoStatus => 0b0001_0001,
            _ => 0x00,
        }
    }
}

/// Shadow copy of every device register, indexed by address.
///
/// Address registers only cache their first byte, which is all a single-byte
/// register read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    pub const fn new() -> Self {
        Self { registers: [0; REGISTER_COUNT] }
    }

    pub fn get(&self, register: Register) -> u8 {
        self.registers[register.address() as usize]
    }

    pub fn set(&mut self, register: Register, value: u8) {
        self.registers[register.address() as usize] = value;
    }

    pub fn config(&self) -> ConfigRegister {
        ConfigRegister(self.get(Register::Config))
    }

    pub fn setup_retransmit(&self) -> SetupRetransmit {
        SetupRetransmit(self.get(Register::SetupRetransmit))
    }

    pub fn rf_setup(&self) -> RfSetup {
        RfSetup(self.get(Register::RfSetup))
    }

    pub fn as_bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

const fn field(byte: u8, shift: u8, width: u8) -> u8 {
    (byte >> shift) & ((1u16 << width) as u8).wrapping_sub(1)
}

const fn with_field(byte: u8, shift: u8, width: u8, value: u8) -> u8 {
    let mask = ((1u16 << width) as u8).wrapping_sub(1) << shift;
    (byte & !mask) | ((value << shift) & mask)
}

const fn flag(byte: u8, bit: u8) -> bool {
    byte & (1 << bit) != 0
}

const fn with_flag(byte: u8, bit: u8, set: bool) -> u8 {
    if set {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    }
}

/// CONFIG (0x00)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister(pub u8);

impl ConfigRegister {
    pub const fn prim_rx(self) -> bool { flag(self.0, PRIM_RX) }
    pub const fn with_prim_rx(self, rx: bool) -> Self { Self(with_flag(self.0, PRIM_RX, rx)) }

    pub const fn pwr_up(self) -> bool { flag(self.0, PWR_UP) }
    pub const fn with_pwr_up(self, up: bool) -> Self { Self(with_flag(self.0, PWR_UP, up)) }

    /// CRC encoding scheme: false = 1 byte, true = 2 bytes
    pub const fn crco(self) -> bool { flag(self.0, CRCO) }
    pub const fn with_crco(self, two_bytes: bool) -> Self { Self(with_flag(self.0, CRCO, two_bytes)) }

    pub const fn en_crc(self) -> bool { flag(self.0, EN_CRC) }
    pub const fn with_en_crc(self, enabled: bool) -> Self { Self(with_flag(self.0, EN_CRC, enabled)) }

    pub const fn mask_max_rt(self) -> bool { flag(self.0, MASK_MAX_RT) }
    pub const fn with_mask_max_rt(self, masked: bool) -> Self { Self(with_flag(self.0, MASK_MAX_RT, masked)) }

    pub const fn mask_tx_ds(self) -> bool { flag(self.0, MASK_TX_DS) }
    pub const fn with_mask_tx_ds(self, masked: bool) -> Self { Self(with_flag(self.0, MASK_TX_DS, masked)) }

    pub const fn mask_rx_dr(self) -> bool { flag(self.0, MASK_RX_DR) }
    pub const fn with_mask_rx_dr(self, masked: bool) -> Self { Self(with_flag(self.0, MASK_RX_DR, masked)) }
}

/// SETUP_AW (0x03). Encoding 1 = 3 bytes, 2 = 4 bytes, 3 = 5 bytes, 0 is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupAddressWidth(pub u8);

impl SetupAddressWidth {
    pub const fn aw(self) -> u8 { field(self.0, AW, 2) }
    pub const fn with_aw(self, aw: u8) -> Self { Self(with_field(self.0, AW, 2, aw)) }
}

/// SETUP_RETR (0x04)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupRetransmit(pub u8);

impl SetupRetransmit {
    /// Auto retransmit count, 0 disables retransmission
    pub const fn arc(self) -> u8 { field(self.0, ARC, 4) }
    pub const fn with_arc(self, count: u8) -> Self { Self(with_field(self.0, ARC, 4, count)) }

    /// Auto retransmit delay in steps of 250us, starting at 250us
    pub const fn ard(self) -> u8 { field(self.0, ARD, 4) }
    pub const fn with_ard(self, delay: u8) -> Self { Self(with_field(self.0, ARD, 4, delay)) }
}

/// RF_CH (0x05)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RfChannel(pub u8);

impl RfChannel {
    pub const fn channel(self) -> u8 { field(self.0, RF_CH, 7) }
    pub const fn with_channel(self, channel: u8) -> Self { Self(with_field(self.0, RF_CH, 7, channel)) }
}

/// RF_SETUP (0x06)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RfSetup(pub u8);

impl RfSetup {
    pub const fn lna_hcurr(self) -> bool { flag(self.0, LNA_HCURR) }
    pub const fn with_lna_hcurr(self, high: bool) -> Self { Self(with_flag(self.0, LNA_HCURR, high)) }

    /// Output power: 0 = -18dBm, 1 = -12dBm, 2 = -6dBm, 3 = 0dBm
    pub const fn rf_pwr(self) -> u8 { field(self.0, RF_PWR, 2) }
    pub const fn with_rf_pwr(self, power: u8) -> Self { Self(with_field(self.0, RF_PWR, 2, power)) }

    /// Air data rate: false = 1Mbps, true = 2Mbps
    pub const fn rf_dr(self) -> bool { flag(self.0, RF_DR) }
    pub const fn with_rf_dr(self, two_mbps: bool) -> Self { Self(with_flag(self.0, RF_DR, two_mbps)) }

    pub const fn pll_lock(self) -> bool { flag(self.0, PLL_LOCK) }
    pub const fn with_pll_lock(self, forced: bool) -> Self { Self(with_flag(self.0, PLL_LOCK, forced)) }
}

/// RX_PW_Px (0x11 - 0x16), number of payload bytes accepted on a pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxPayloadWidth(pub u8);

impl RxPayloadWidth {
    pub const fn width(self) -> u8 { field(self.0, RX_PW, 6) }
    pub const fn with_width(self, width: u8) -> Self { Self(with_field(self.0, RX_PW, 6, width)) }
}

/// STATUS (0x07), also clocked out as the first byte of every exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    pub const fn rx_dr(self) -> bool { flag(self.0, RX_DR) }
    pub const fn tx_ds(self) -> bool { flag(self.0, TX_DS) }
    pub const fn max_rt(self) -> bool { flag(self.0, MAX_RT) }
    pub const fn tx_full(self) -> bool { flag(self.0, TX_FULL) }

    /// Pipe number of the payload at the head of the RX FIFO, 7 when empty
    pub const fn rx_pipe(self) -> u8 { field(self.0, RX_P_NO, 3) }
}

/// FIFO_STATUS (0x17)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus(pub u8);

impl FifoStatus {
    pub const fn rx_empty(self) -> bool { flag(self.0, RX_EMPTY) }
    pub const fn rx_full(self) -> bool { flag(self.0, RX_FULL) }
    pub const fn tx_empty(self) -> bool { flag(self.0, TX_EMPTY) }
    pub const fn tx_full(self) -> bool { flag(self.0, FIFO_TX_FULL) }
    pub const fn tx_reuse(self) -> bool { flag(self.0, TX_REUSE) }
}

bitflags::bitflags! {
    /// The three interrupt flags of the STATUS register. Writing a 1 clears the flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interrupts: u8 {
        /// Data ready in the RX FIFO
        const RX_DR = 0b0100_0000;
        /// Data sent from the TX FIFO
        const TX_DS = 0b0010_0000;
        /// Maximum number of retransmits reached
        const MAX_RT = 0b0001_0000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Interrupts {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Interrupts({=u8:#x})", self.bits())
    }
}
