//! Frame checksum width

use crate::register::{ConfigRegister, Register};

use super::RegisterValue;

/// CRC appended to every frame. Frames failing the check never reach the RX FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CRC {
    CRC0,
    CRC1,
    CRC2,
}

impl CRC {
    /// Checksum length in bytes
    pub const fn bytes(&self) -> usize {
        match self {
            Self::CRC0 => 0,
            Self::CRC1 => 1,
            Self::CRC2 => 2,
        }
    }
}

impl RegisterValue for CRC {
    fn register_value(&self, register: Register) -> u8 {
        if register != Register::Config {
            return 0;
        }

        ConfigRegister::default()
            .with_en_crc(self.bytes() > 0)
            .with_crco(self.bytes() == 2)
            .0
    }
}
