//!
//! Error for the NRF24L01 Module
//!

/// Errors raised while talking to the module. `GPIOE` is the error of the
/// enable and bus-select pins, `SPIE` the error of the SPI bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<GPIOE, SPIE> {
    // The payload is empty or larger than the 32 byte FIFO
    InvalidPayloadLength,
    // A status flag never appeared within the allotted time
    Unresponsive,
    // The CONFIG read-back after a mode change did not match what was written
    ModeChangeRejected { expected: u8, found: u8 },
    GpioError(GPIOE),
    SpiError(SPIE),
}
