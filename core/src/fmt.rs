//! Logging macros
//!
//! Forward to `defmt` on target. Host tests without `defmt` print to stdout
//! with a level prefix; any other build discards the message but still
//! borrows the arguments so they never look unused.

#![allow(unused_macros)]

macro_rules! log_event {
    ($level:ident, $prefix:literal, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!($prefix, $s) $(, $x)*);
        #[cfg(not(any(test, feature = "defmt")))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        log_event!(trace, "[TRACE] ", $s $(, $x)*)
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        log_event!(debug, "[DEBUG] ", $s $(, $x)*)
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        log_event!(info, "[INFO] ", $s $(, $x)*)
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        log_event!(warn, "[WARN] ", $s $(, $x)*)
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        log_event!(error, "[ERROR] ", $s $(, $x)*)
    };
}
