//! IRQ pin masking

use crate::register::{ConfigRegister, Interrupts, Register};

use super::RegisterValue;

/// Status flags kept off the IRQ pin. A masked flag still shows in STATUS,
/// it just does not pull the IRQ line low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptMask(Interrupts);

impl InterruptMask {
    pub const fn new(masked: Interrupts) -> Self {
        Self(masked)
    }

    /// Only the retransmit limit is masked. Auto-retransmit is off, so
    /// MAX_RT never fires anyway.
    pub const fn retransmits() -> Self {
        Self(Interrupts::MAX_RT)
    }

    pub const fn none() -> Self {
        Self(Interrupts::empty())
    }

    pub const fn masked(&self) -> Interrupts {
        self.0
    }
}

impl RegisterValue for InterruptMask {
    fn register_value(&self, register: Register) -> u8 {
        if register != Register::Config {
            return 0;
        }

        ConfigRegister::default()
            .with_mask_rx_dr(self.0.contains(Interrupts::RX_DR))
            .with_mask_tx_ds(self.0.contains(Interrupts::TX_DS))
            .with_mask_max_rt(self.0.contains(Interrupts::MAX_RT))
            .0
    }
}
