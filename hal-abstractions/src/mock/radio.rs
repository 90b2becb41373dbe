//! Mock radio driver
//!
//! Behaves like a blocking WiFi driver with one scan buffer and one socket.
//! Association statuses, connect results and response availability are
//! scripted per call; once a script runs dry the fallback value is used.

use std::collections::VecDeque;

use crate::radio::{
    Bssid, ConnectionOutcome, DeepSleep, NetworkScan, SocketLink, Ssid, StationLink,
};

/// One access point visible to the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAccessPoint {
    pub ssid: String,
    pub bssid: Bssid,
    pub rssi: i32,
}

/// Per-method call counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RadioCalls {
    pub enter_station_mode: usize,
    pub begin_association: usize,
    pub poll_status: usize,
    pub scan_networks: usize,
    pub ssid_at: usize,
    pub bssid_at: usize,
    pub rssi_at: usize,
    pub open_connection: usize,
    pub send: usize,
    pub bytes_available: usize,
    pub close_connection: usize,
    pub request_deep_sleep: usize,
}

/// Scripted radio driver
#[derive(Debug)]
pub struct MockRadio {
    access_points: Vec<MockAccessPoint>,
    scan_buffer: Vec<MockAccessPoint>,
    statuses: VecDeque<ConnectionOutcome>,
    fallback_status: ConnectionOutcome,
    connect_results: VecDeque<bool>,
    fallback_connect: bool,
    availability: VecDeque<usize>,
    fallback_availability: usize,
    send_limit: Option<usize>,
    socket_open: bool,
    calls: RadioCalls,
    station_mode: bool,
    associations: Vec<(String, String)>,
    endpoints: Vec<(String, u16)>,
    sent: Vec<Vec<u8>>,
    ssid_reads: Vec<usize>,
    bssid_reads: Vec<usize>,
    rssi_reads: Vec<usize>,
    deep_sleeps: Vec<u64>,
}

impl MockRadio {
    /// Radio with no access points that never associates, always connects
    /// and always has a response waiting
    pub fn new() -> Self {
        Self {
            access_points: Vec::new(),
            scan_buffer: Vec::new(),
            statuses: VecDeque::new(),
            fallback_status: ConnectionOutcome::Failed,
            connect_results: VecDeque::new(),
            fallback_connect: true,
            availability: VecDeque::new(),
            fallback_availability: 1,
            send_limit: None,
            socket_open: false,
            calls: RadioCalls::default(),
            station_mode: false,
            associations: Vec::new(),
            endpoints: Vec::new(),
            sent: Vec::new(),
            ssid_reads: Vec::new(),
            bssid_reads: Vec::new(),
            rssi_reads: Vec::new(),
            deep_sleeps: Vec::new(),
        }
    }

    /// Add an access point to the air; visible from the next scan on
    pub fn with_access_point(mut self, ssid: &str, bssid: &str, rssi: i32) -> Self {
        self.add_access_point(ssid, bssid, rssi);
        self
    }

    /// Add `count` access points broadcasting `ssid` with generated BSSIDs
    pub fn with_filler_networks(mut self, ssid: &str, count: usize) -> Self {
        for n in 0..count {
            let bssid = Bssid::new([0xde, 0xad, 0x00, 0x00, (n >> 8) as u8, n as u8]);
            self.access_points.push(MockAccessPoint {
                ssid: ssid.into(),
                bssid,
                rssi: -90,
            });
        }
        self
    }

    /// Statuses returned by successive `poll_status` calls
    pub fn with_statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = ConnectionOutcome>,
    {
        self.statuses.extend(statuses);
        self
    }

    /// Status returned once the scripted statuses are used up
    pub fn with_fallback_status(mut self, status: ConnectionOutcome) -> Self {
        self.fallback_status = status;
        self
    }

    /// Results of successive `open_connection` calls
    pub fn with_connect_results<I>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        self.connect_results.extend(results);
        self
    }

    /// `open_connection` result once the script is used up
    pub fn with_fallback_connect(mut self, connects: bool) -> Self {
        self.fallback_connect = connects;
        self
    }

    /// Values of successive `bytes_available` calls
    pub fn with_availability<I>(mut self, counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.availability.extend(counts);
        self
    }

    /// `bytes_available` value once the script is used up
    pub fn with_fallback_availability(mut self, count: usize) -> Self {
        self.fallback_availability = count;
        self
    }

    /// Accept at most `limit` bytes per `send`
    pub fn with_send_limit(mut self, limit: usize) -> Self {
        self.send_limit = Some(limit);
        self
    }

    pub fn add_access_point(&mut self, ssid: &str, bssid: &str, rssi: i32) {
        let bssid = Bssid::parse(bssid).unwrap_or(Bssid::new([0; 6]));
        self.access_points.push(MockAccessPoint {
            ssid: ssid.into(),
            bssid,
            rssi,
        });
    }

    /// Remove every access point from the air
    pub fn clear_access_points(&mut self) {
        self.access_points.clear();
    }

    pub fn calls(&self) -> RadioCalls {
        self.calls
    }

    /// Whether station mode was entered
    pub fn station_mode(&self) -> bool {
        self.station_mode
    }

    /// `(ssid, passphrase)` of every association started
    pub fn associations(&self) -> &[(String, String)] {
        &self.associations
    }

    /// `(host, port)` of every connection attempt
    pub fn endpoints(&self) -> &[(String, u16)] {
        &self.endpoints
    }

    /// Every buffer passed to `send`
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Every buffer passed to `send`, decoded as UTF-8
    pub fn sent_text(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Scan indices whose SSID was read, in call order
    pub fn ssid_reads(&self) -> &[usize] {
        &self.ssid_reads
    }

    /// Scan indices whose BSSID was read, in call order
    pub fn bssid_reads(&self) -> &[usize] {
        &self.bssid_reads
    }

    /// Scan indices whose RSSI was read, in call order
    pub fn rssi_reads(&self) -> &[usize] {
        &self.rssi_reads
    }

    /// Durations of every deep sleep requested
    pub fn deep_sleeps(&self) -> &[u64] {
        &self.deep_sleeps
    }

    /// Whether a connection is currently open
    pub fn socket_open(&self) -> bool {
        self.socket_open
    }

    fn scanned(&self, index: usize) -> Option<&MockAccessPoint> {
        self.scan_buffer.get(index)
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl StationLink for MockRadio {
    fn enter_station_mode(&mut self) {
        self.calls.enter_station_mode += 1;
        self.station_mode = true;
    }

    fn begin_association(&mut self, ssid: &str, passphrase: &str) {
        self.calls.begin_association += 1;
        self.associations.push((ssid.into(), passphrase.into()));
    }

    fn poll_status(&mut self) -> ConnectionOutcome {
        self.calls.poll_status += 1;
        self.statuses.pop_front().unwrap_or(self.fallback_status)
    }
}

impl NetworkScan for MockRadio {
    fn scan_networks(&mut self) -> usize {
        self.calls.scan_networks += 1;
        self.scan_buffer = self.access_points.clone();
        self.scan_buffer.len()
    }

    fn ssid_at(&mut self, index: usize) -> Ssid {
        self.calls.ssid_at += 1;
        self.ssid_reads.push(index);
        self.scanned(index)
            .and_then(|ap| Ssid::try_from(ap.ssid.as_str()).ok())
            .unwrap_or_default()
    }

    fn bssid_at(&mut self, index: usize) -> Bssid {
        self.calls.bssid_at += 1;
        self.bssid_reads.push(index);
        self.scanned(index)
            .map(|ap| ap.bssid)
            .unwrap_or(Bssid::new([0; 6]))
    }

    fn rssi_at(&mut self, index: usize) -> i32 {
        self.calls.rssi_at += 1;
        self.rssi_reads.push(index);
        self.scanned(index).map(|ap| ap.rssi).unwrap_or(0)
    }
}

impl SocketLink for MockRadio {
    fn open_connection(&mut self, host: &str, port: u16) -> bool {
        self.calls.open_connection += 1;
        self.endpoints.push((host.into(), port));
        let connected = self
            .connect_results
            .pop_front()
            .unwrap_or(self.fallback_connect);
        self.socket_open = connected;
        connected
    }

    fn send(&mut self, bytes: &[u8]) -> usize {
        self.calls.send += 1;
        let accepted = self.send_limit.map_or(bytes.len(), |limit| limit.min(bytes.len()));
        self.sent.push(bytes.to_vec());
        accepted
    }

    fn bytes_available(&mut self) -> usize {
        self.calls.bytes_available += 1;
        self.availability
            .pop_front()
            .unwrap_or(self.fallback_availability)
    }

    fn close_connection(&mut self) {
        self.calls.close_connection += 1;
        self.socket_open = false;
    }
}

impl DeepSleep for MockRadio {
    fn request_deep_sleep(&mut self, duration_us: u64) {
        self.calls.request_deep_sleep += 1;
        self.deep_sleeps.push(duration_us);
    }
}
