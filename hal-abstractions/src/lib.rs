//! Hardware abstraction traits for the positioning beacon
//!
//! This crate defines the capabilities the beacon core needs from the radio
//! driver and the external power controller. Board support crates implement
//! these traits; the core never touches hardware directly.

#![cfg_attr(not(any(test, feature = "mock")), no_std)]
#![deny(unsafe_code)]
#![deny(warnings)]

pub mod power;
pub mod radio;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use power::{PinPowerSignal, PowerController};
pub use radio::{
    Bssid, BssidParseError, ConnectionOutcome, DeepSleep, NetworkScan, RadioLink, SocketLink,
    Ssid, StationLink, MAX_SSID_LEN,
};
