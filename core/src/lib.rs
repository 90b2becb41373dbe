//! Platform-agnostic duty-cycle logic for the WiFi positioning beacon
//!
//! The beacon wakes, joins a network, scans for access points of the
//! registered positioning networks and pushes their BSSID/RSSI pairs to a
//! collection endpoint in fixed-size batches. Everything here is written
//! against the `beacon-hal` traits; it has NO hardware dependencies.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(warnings)]

#[macro_use]
mod fmt;

pub mod beacon;
pub mod bootstrap;
pub mod config;
pub mod cycle;
pub mod datapoint;
pub mod error;
pub mod payload;
pub mod scanner;
pub mod transmit;

pub use beacon::Beacon;
pub use bootstrap::ConnectionBootstrap;
pub use config::{
    AssociationConfig, BeaconConfig, EndpointConfig, ScanConfig, CONNECTION_RETRIES,
    DEFAULT_TRANSMISSION_SIZE, MAX_DATAPOINTS,
};
pub use cycle::{CycleController, CycleReport};
pub use datapoint::{Datapoint, Datapoints};
pub use error::BeaconError;
pub use scanner::PositioningScanner;
pub use transmit::TransmissionPipeline;

pub use beacon_hal::{Bssid, ConnectionOutcome, PinPowerSignal, PowerController, RadioLink};
