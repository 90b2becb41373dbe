//! Beacon configuration structures

use crate::error::BeaconError;
use crate::payload;

/// Association polls before giving up and going back to sleep
pub const CONNECTION_RETRIES: u8 = 10;

/// Datapoints per transmission unless changed at runtime
pub const DEFAULT_TRANSMISSION_SIZE: usize = 10;

/// Datapoints kept from one scan cycle
///
/// Covers the largest result count a radio reporting its scan count as a
/// signed 8-bit value can return, so every match of a scan is kept.
pub const MAX_DATAPOINTS: usize = 128;

/// SSIDs whose access points are registered for location fingerprinting
pub const DEFAULT_POSITIONING_NETWORKS: &[&str] = &["eduroam", "positioning"];

const fn env_or_empty(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "",
    }
}

/// Boot-time association settings
#[derive(Debug, Clone)]
pub struct AssociationConfig {
    /// Network to join at boot
    pub ssid: &'static str,
    /// Passphrase for `ssid` (empty for open networks)
    pub passphrase: &'static str,
    /// Status polls before association counts as failed (at least 1)
    pub retries: u8,
    /// Pause between status polls in milliseconds
    pub poll_interval_ms: u32,
    /// Deep sleep duration requested on failure, `0` = until external wake
    pub sleep_duration_us: u64,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            ssid: env_or_empty(option_env!("BEACON_WIFI_SSID")),
            passphrase: env_or_empty(option_env!("BEACON_WIFI_PASSWORD")),
            retries: CONNECTION_RETRIES,
            poll_interval_ms: 500,
            sleep_duration_us: 0,
        }
    }
}

/// Scan filtering settings
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// SSIDs usable for fingerprinting, matched by exact equality
    pub positioning_networks: &'static [&'static str],
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            positioning_networks: DEFAULT_POSITIONING_NETWORKS,
        }
    }
}

/// Collection endpoint settings
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Endpoint hostname or address
    pub host: &'static str,
    /// Endpoint TCP port
    pub port: u16,
    /// Request path datapoints are posted to
    pub path: &'static str,
    /// Availability polls before a batch counts as timed out (at least 1)
    pub response_polls: u32,
    /// Pause between availability polls in milliseconds
    pub response_poll_interval_ms: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.1",
            port: 8080,
            path: "/datapoints",
            response_polls: 500,
            response_poll_interval_ms: 10,
        }
    }
}

/// Complete beacon configuration
#[derive(Debug, Clone)]
pub struct BeaconConfig {
    pub association: AssociationConfig,
    pub scan: ScanConfig,
    pub endpoint: EndpointConfig,
    /// Initial datapoints per transmission (at least 1)
    pub transmission_size: usize,
}

impl BeaconConfig {
    /// Check every bound the core relies on
    pub fn validate(&self) -> Result<(), BeaconError> {
        if self.association.retries == 0 {
            return Err(BeaconError::InvalidRetryBudget);
        }
        if self.scan.positioning_networks.is_empty() {
            return Err(BeaconError::NoPositioningNetworks);
        }
        if self.endpoint.response_polls == 0 {
            return Err(BeaconError::InvalidResponsePolls);
        }
        if !payload::header_fits(&self.endpoint) {
            return Err(BeaconError::EndpointTooLong);
        }
        validate_transmission_size(self.transmission_size)
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            association: AssociationConfig::default(),
            scan: ScanConfig::default(),
            endpoint: EndpointConfig::default(),
            transmission_size: DEFAULT_TRANSMISSION_SIZE,
        }
    }
}

/// Accepts any size of at least one datapoint
///
/// Sizes above the datapoint count of a scan simply send the whole scan
/// as one batch.
pub fn validate_transmission_size(size: usize) -> Result<(), BeaconError> {
    if size == 0 {
        return Err(BeaconError::InvalidTransmissionSize);
    }
    Ok(())
}
