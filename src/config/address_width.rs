//! The address width for all pipes in the nRF24L01 setup

use crate::register::{Register, SetupAddressWidth};

use super::RegisterValue;

/// The address width of the rx/tx address field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressWidth {
    // 3 byte address width
    A3Bytes = 0b01,
    // 4 byte address width
    A4Bytes = 0b10,
    // 5 byte address width
    A5Bytes = 0b11,
}

impl AddressWidth {
    /// Get the number of address bytes the radio matches on
    pub const fn as_usize(&self) -> usize {
        match self {
            Self::A3Bytes => 3,
            Self::A4Bytes => 4,
            Self::A5Bytes => 5,
        }
    }
}

impl RegisterValue for AddressWidth {
    fn register_value(&self, register: Register) -> u8 {
        if register == Register::SetupAddressWidth {
            SetupAddressWidth::default().with_aw(*self as u8).0
        } else {
            0
        }
    }
}
