//! Commands that can be sent to the NRF24L01 Module.
//!
//! Every exchange with the module starts with one of these opcodes while the
//! bus-select line is held low.

use crate::register::Register;

/// The various SPI commands that can be issued to the NRF24L01 module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    ReadRegister(Register),
    WriteRegister(Register),
    ReadRxPayload,
    WriteTxPayload,
    FlushTx,
    FlushRx,
    Nop,
}

impl Command {
    // Parse the opcode of command from the command itself
    pub const fn opcode(&self) -> u8 {
        match self {
            Self::ReadRegister(register) => 0b0000_0000 | register.address(),
            Self::WriteRegister(register) => 0b0010_0000 | register.address(),
            Self::ReadRxPayload => 0b0110_0001,
            Self::WriteTxPayload => 0b1010_0000,
            Self::FlushTx => 0b1110_0001,
            Self::FlushRx => 0b1110_0010,
            Self::Nop => 0b1111_1111,
        }
    }
}
