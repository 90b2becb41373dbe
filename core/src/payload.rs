//! Batch serialization
//!
//! Each batch becomes one HTTP/1.1 POST carrying a JSON array:
//!
//! ```text
//! POST /datapoints HTTP/1.1
//! Host: 192.168.1.1:8080
//! Content-Type: application/json
//! Content-Length: 41
//! Connection: close
//!
//! [{"bssid":"00-14-22-01-23-45","rssi":12}]
//! ```

use core::fmt::Write;

use heapless::String;

use crate::config::{EndpointConfig, MAX_DATAPOINTS};
use crate::datapoint::Datapoint;
use crate::error::BeaconError;

/// Longest JSON object for one datapoint plus its separator
/// (`{"bssid":"XX-XX-XX-XX-XX-XX","rssi":-2147483648},`)
const DATAPOINT_JSON_MAX: usize = 49;

/// Request line and headers, including host and path
pub const HEADER_CAPACITY: usize = 320;

/// JSON body for the largest possible batch, one whole scan
pub const BODY_CAPACITY: usize = MAX_DATAPOINTS * DATAPOINT_JSON_MAX + 2;

/// Header text around the path, host, port and content length
const HEADER_FIXED_LEN: usize = "POST  HTTP/1.1\r\n\
     Host: :\r\n\
     Content-Type: application/json\r\n\
     Content-Length: \r\n\
     Connection: close\r\n\
     \r\n"
    .len();

/// Widest rendering of a `u16` port
const PORT_DIGITS_MAX: usize = 5;

/// Complete request for a full batch
pub const PAYLOAD_CAPACITY: usize = HEADER_CAPACITY + BODY_CAPACITY;

pub type Payload = String<PAYLOAD_CAPACITY>;

/// Serialize `batch` as a JSON array
pub fn encode_body(batch: &[Datapoint]) -> Result<String<BODY_CAPACITY>, BeaconError> {
    let mut body = String::new();
    body.push('[').map_err(|_| BeaconError::PayloadOverflow)?;
    for (i, datapoint) in batch.iter().enumerate() {
        if i > 0 {
            body.push(',').map_err(|_| BeaconError::PayloadOverflow)?;
        }
        write!(
            body,
            "{{\"bssid\":\"{}\",\"rssi\":{}}}",
            datapoint.identifier(),
            datapoint.signal_strength()
        )
        .map_err(|_| BeaconError::PayloadOverflow)?;
    }
    body.push(']').map_err(|_| BeaconError::PayloadOverflow)?;
    Ok(body)
}

const fn decimal_digits(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Longest request line and headers `endpoint` can produce
pub fn header_len_max(endpoint: &EndpointConfig) -> usize {
    HEADER_FIXED_LEN
        + endpoint.path.len()
        + endpoint.host.len()
        + PORT_DIGITS_MAX
        + decimal_digits(BODY_CAPACITY)
}

/// Whether every batch addressed to `endpoint` fits the header budget
pub fn header_fits(endpoint: &EndpointConfig) -> bool {
    header_len_max(endpoint) <= HEADER_CAPACITY
}

/// Build the full request for `batch` addressed to `endpoint`
pub fn encode_batch(endpoint: &EndpointConfig, batch: &[Datapoint]) -> Result<Payload, BeaconError> {
    let body = encode_body(batch)?;
    let mut payload = Payload::new();
    write!(
        payload,
        "POST {} HTTP/1.1\r\n\
         Host: {}:{}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        endpoint.path,
        endpoint.host,
        endpoint.port,
        body.len(),
        body
    )
    .map_err(|_| BeaconError::PayloadOverflow)?;
    Ok(payload)
}
