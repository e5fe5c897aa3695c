//! Logging shim
//!
//! Forwards to `defmt` when the `defmt` feature is enabled and prints to
//! stdout under host unit tests, with or without the feature, so test builds
//! never need a defmt global logger. Otherwise it compiles to nothing.
//!
//! Format strings must stay within the subset understood by both `defmt` and
//! `core::fmt` (`{}` for integers, `{:?}` for everything else).

/// Log a debug message
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::debug!($($arg)*);

        #[cfg(test)]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// Log an info message
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::info!($($arg)*);

        #[cfg(test)]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log a warning message
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($($arg)*);

        #[cfg(test)]
        println!("[WARN] {}", format!($($arg)*));
    }};
}
