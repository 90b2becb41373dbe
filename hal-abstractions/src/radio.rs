//! Radio capability traits
//!
//! The beacon core talks to the WiFi driver through four small traits, one
//! per concern, so each component only asks for what it actually uses:
//!
//! - **`StationLink`**: station mode and boot-time association
//! - **`NetworkScan`**: one scan and indexed access to its results
//! - **`SocketLink`**: a single TCP-style connection to the collection endpoint
//! - **`DeepSleep`**: handing the chip over to deep sleep
//!
//! `RadioLink` is implemented automatically for any driver providing all four.
//!
//! All calls are blocking. Scan results are only valid until the next call to
//! [`NetworkScan::scan_networks`]; the core copies what it needs out of them
//! immediately.

use core::fmt;

/// Maximum SSID length (IEEE 802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Network name as reported by a scan
pub type Ssid = heapless::String<MAX_SSID_LEN>;

/// Association state reported by the driver
///
/// Also used as the result of the boot-time association loop, which only
/// ever resolves to `Connected` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionOutcome {
    /// Associated and ready for traffic
    Connected,
    /// The driver gave up on this association attempt
    Failed,
    /// Association still in progress
    Pending,
}

/// Hardware identifier (MAC address) of an access point
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bssid(pub [u8; 6]);

/// Returned by [`Bssid::parse`] for malformed MAC strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BssidParseError;

impl Bssid {
    /// Length of the rendered form, e.g. `00-14-22-01-23-45`
    pub const STR_LEN: usize = 17;

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Parse six hex octets separated by `-` or `:`
    pub fn parse(s: &str) -> Result<Self, BssidParseError> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(['-', ':']);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(BssidParseError)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(BssidParseError);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| BssidParseError)?;
        }
        if parts.next().is_some() {
            return Err(BssidParseError);
        }
        Ok(Self(octets))
    }

    pub const fn octets(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}-{b:02X}-{c:02X}-{d:02X}-{e:02X}-{g:02X}")
    }
}

impl fmt::Debug for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bssid({self})")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Bssid {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d, e, g] = self.0;
        defmt::write!(
            f,
            "{=u8:02X}-{=u8:02X}-{=u8:02X}-{=u8:02X}-{=u8:02X}-{=u8:02X}",
            a,
            b,
            c,
            d,
            e,
            g
        );
    }
}

/// Station mode and association with the configured network
pub trait StationLink {
    /// Put the radio in station (client) mode
    fn enter_station_mode(&mut self);

    /// Start associating with `ssid`; progress is observed with `poll_status`
    fn begin_association(&mut self, ssid: &str, passphrase: &str);

    /// Current association state
    fn poll_status(&mut self) -> ConnectionOutcome;
}

/// Access point discovery
pub trait NetworkScan {
    /// Run a blocking scan and return the number of results
    ///
    /// Drivers that signal scan failure with a negative count report `0`.
    /// Calling this invalidates the results of the previous scan.
    fn scan_networks(&mut self) -> usize;

    /// SSID of the result at `index` (`0..count`)
    fn ssid_at(&mut self, index: usize) -> Ssid;

    /// BSSID of the result at `index`
    fn bssid_at(&mut self, index: usize) -> Bssid;

    /// Received signal strength of the result at `index`, in dBm
    fn rssi_at(&mut self, index: usize) -> i32;
}

/// Single outbound connection to the collection endpoint
pub trait SocketLink {
    /// Open a connection; `false` if the endpoint could not be reached
    fn open_connection(&mut self, host: &str, port: u16) -> bool;

    /// Queue `bytes` on the open connection, returning how many were accepted
    fn send(&mut self, bytes: &[u8]) -> usize;

    /// Number of response bytes ready to be read
    fn bytes_available(&mut self) -> usize;

    /// Close the open connection
    fn close_connection(&mut self);
}

/// Deep sleep entry
pub trait DeepSleep {
    /// Ask the chip to enter deep sleep for `duration_us` microseconds
    ///
    /// `0` sleeps until an external wake-up. On real hardware this call
    /// does not return.
    fn request_deep_sleep(&mut self, duration_us: u64);
}

/// Full radio driver capability set
pub trait RadioLink: StationLink + NetworkScan + SocketLink + DeepSleep {}

impl<T> RadioLink for T where T: StationLink + NetworkScan + SocketLink + DeepSleep {}
