//! State Representation of the NRF24L01 Module

use crate::register::ConfigRegister;

/// The mode the transceiver is in, derived from PWR_UP, PRIM_RX and the
/// enable (CE) line. It is never stored on its own.
///
/// Mode         | PWR_UP | PRIM_RX | CE
/// -------------------------------------
/// Listening    |    1   |    1    |  1
/// -------------------------------------
/// Transmitting |    1   |    0    |  1
/// -------------------------------------
/// Standby      |    1   |    -    |  0
/// -------------------------------------
/// Power Down   |    0   |    -    |  -
/// -------------------------------------
///
/// State Transitions:
///
/// Transition              | Maximum Time | Minimum Time
/// -----------------------------------------------------
/// Power Down -> Standby   | 1.5ms        | 150us
/// -----------------------------------------------------
/// Standby -> TX/RX Mode   | 130us        | -----
/// -----------------------------------------------------
/// CE High                 | -----        | 10us
/// -----------------------------------------------------
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransceiverMode {
    // Registers are maintained, but the module cannot do anything until
    // turned on
    PowerDown,
    // Powered and idle, waiting for CE
    Standby,
    // CE pulse in progress with PRIM_RX clear (returns to Standby once the
    // packet has left)
    Transmitting,
    // CE held high with PRIM_RX set, filling the RX FIFO with matching frames
    Listening,
}

impl TransceiverMode {
    pub const fn from_lines(config: ConfigRegister, enable_high: bool) -> Self {
        if !config.pwr_up() {
            Self::PowerDown
        } else if !enable_high {
            Self::Standby
        } else if config.prim_rx() {
            Self::Listening
        } else {
            Self::Transmitting
        }
    }
}
