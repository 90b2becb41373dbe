//! Positioning datapoints

use beacon_hal::Bssid;

use crate::config::MAX_DATAPOINTS;

/// One access point observation usable for fingerprinting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datapoint {
    identifier: Bssid,
    signal_strength: i32,
}

impl Datapoint {
    pub const fn new(identifier: Bssid, signal_strength: i32) -> Self {
        Self {
            identifier,
            signal_strength,
        }
    }

    /// Access point BSSID
    pub const fn identifier(&self) -> Bssid {
        self.identifier
    }

    /// RSSI in dBm
    pub const fn signal_strength(&self) -> i32 {
        self.signal_strength
    }
}

/// Datapoints collected in one scan cycle, in scan order
pub type Datapoints = heapless::Vec<Datapoint, MAX_DATAPOINTS>;
