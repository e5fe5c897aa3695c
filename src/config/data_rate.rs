//! Air data rate

use crate::register::{Register, RfSetup};

use super::RegisterValue;

/// Both ends must agree on the rate. 1Mbps trades current for sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    R1Mb,
    R2Mb,
}

impl RegisterValue for DataRate {
    fn register_value(&self, register: Register) -> u8 {
        match register {
            Register::RfSetup => RfSetup::default().with_rf_dr(matches!(self, Self::R2Mb)).0,
            _ => 0,
        }
    }
}
