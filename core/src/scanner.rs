//! Positioning scan
//!
//! Runs one radio scan and keeps only access points broadcasting a
//! registered positioning SSID. BSSID and RSSI are read only for matching
//! results, and everything is copied out of the driver before returning.

use beacon_hal::NetworkScan;

use crate::config::ScanConfig;
use crate::datapoint::{Datapoint, Datapoints};

/// Turns a radio scan into positioning datapoints
pub struct PositioningScanner<'a> {
    config: &'a ScanConfig,
}

impl<'a> PositioningScanner<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    /// Exact-match membership in the positioning network set
    pub fn is_positioning_network(&self, ssid: &str) -> bool {
        self.config
            .positioning_networks
            .iter()
            .any(|network| *network == ssid)
    }

    /// Trigger a fresh scan and collect datapoints in scan order
    ///
    /// No signal threshold, no deduplication. Matches past the datapoint
    /// capacity are dropped.
    pub fn scan<R: NetworkScan>(&self, radio: &mut R) -> Datapoints {
        let count = radio.scan_networks();
        let mut datapoints = Datapoints::new();
        let mut dropped = 0usize;

        for index in 0..count {
            let ssid = radio.ssid_at(index);
            if !self.is_positioning_network(ssid.as_str()) {
                continue;
            }
            let datapoint = Self::network_context(radio, index);
            trace!(
                "Positioning AP {} rssi={}",
                datapoint.identifier(),
                datapoint.signal_strength()
            );
            if datapoints.push(datapoint).is_err() {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!("Datapoint buffer full, dropped {} match(es)", dropped);
        }
        info!(
            "Scan found {} network(s), {} positioning datapoint(s)",
            count,
            datapoints.len()
        );
        datapoints
    }

    /// Read BSSID and RSSI for one scan index
    pub fn network_context<R: NetworkScan>(radio: &mut R, index: usize) -> Datapoint {
        let identifier = radio.bssid_at(index);
        let signal_strength = radio.rssi_at(index);
        Datapoint::new(identifier, signal_strength)
    }
}
