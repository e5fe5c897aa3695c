//! Error for creating a given configuration

/// Configuration Error (only used for ensuring values fit their register fields)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    // The rf channel provided to the configuration is not within the valid range [0,125]
    InvalidRfChannel,
    // The retransmit delay provided was too large (greater than 0xf)
    InvalidRetransmitDelay,
    // The retransmit count provided was too large (greater than 0xf)
    InvalidRetransmitCount,
    // The payload width is larger than the 32 byte FIFO
    InvalidPayloadWidth,
}
