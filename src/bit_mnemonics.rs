//!
//! Bit positions of the named register fields
//!

// CONFIG
pub const MASK_RX_DR: u8 = 6;
pub const MASK_TX_DS: u8 = 5;
pub const MASK_MAX_RT: u8 = 4;
pub const EN_CRC: u8 = 3;
pub const CRCO: u8 = 2;
pub const PWR_UP: u8 = 1;
pub const PRIM_RX: u8 = 0;

// SETUP_AW
pub const AW: u8 = 0;

// SETUP_RETR
pub const ARD: u8 = 4;
pub const ARC: u8 = 0;

// RF_CH
pub const RF_CH: u8 = 0;

// RF_SETUP
pub const PLL_LOCK: u8 = 4;
pub const RF_DR: u8 = 3;
pub const RF_PWR: u8 = 1;
pub const LNA_HCURR: u8 = 0;

// STATUS
pub const RX_DR: u8 = 6;
pub const TX_DS: u8 = 5;
pub const MAX_RT: u8 = 4;
pub const RX_P_NO: u8 = 1;
pub const TX_FULL: u8 = 0;

// FIFO_STATUS
pub const TX_REUSE: u8 = 6;
pub const FIFO_TX_FULL: u8 = 5;
pub const TX_EMPTY: u8 = 4;
pub const RX_FULL: u8 = 1;
pub const RX_EMPTY: u8 = 0;

// RX_PW_Px
pub const RX_PW: u8 = 0;
