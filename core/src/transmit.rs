//! Batch transmission
//!
//! Each call pushes one batch over its own connection: serialize, connect,
//! send once, wait for the endpoint to answer, close. The connection is
//! closed exactly once after a successful connect and never after a failed
//! one.

use beacon_hal::SocketLink;
use embedded_hal::delay::DelayNs;

use crate::config::EndpointConfig;
use crate::datapoint::Datapoint;
use crate::error::BeaconError;
use crate::payload;

/// Sends datapoint batches to the collection endpoint
pub struct TransmissionPipeline<'a> {
    config: &'a EndpointConfig,
}

impl<'a> TransmissionPipeline<'a> {
    pub fn new(config: &'a EndpointConfig) -> Self {
        Self { config }
    }

    /// Transmit one batch
    ///
    /// Succeeds once the endpoint has any response bytes available. An empty
    /// batch fails immediately without touching the radio.
    pub fn transmit<R, D>(
        &self,
        radio: &mut R,
        delay: &mut D,
        batch: &[Datapoint],
    ) -> Result<(), BeaconError>
    where
        R: SocketLink,
        D: DelayNs,
    {
        if batch.is_empty() {
            debug!("Nothing to transmit");
            return Err(BeaconError::EmptyBatch);
        }

        let request = payload::encode_batch(self.config, batch).map_err(|e| {
            error!("Failed to encode {} datapoint(s): {}", batch.len(), e);
            e
        })?;

        if !radio.open_connection(self.config.host, self.config.port) {
            warn!(
                "Connection to {}:{} failed",
                self.config.host,
                self.config.port
            );
            return Err(BeaconError::ConnectFailed);
        }

        let accepted = radio.send(request.as_bytes());
        if accepted < request.len() {
            warn!(
                "Short write: {} of {} byte(s) accepted",
                accepted,
                request.len()
            );
        }

        let result = self.await_response(radio, delay);
        radio.close_connection();

        match result {
            Ok(()) => info!("Transmitted {} datapoint(s)", batch.len()),
            Err(e) => warn!("Transmission of {} datapoint(s) failed: {}", batch.len(), e),
        }
        result
    }

    /// Poll for response bytes up to the configured budget
    fn await_response<R, D>(&self, radio: &mut R, delay: &mut D) -> Result<(), BeaconError>
    where
        R: SocketLink,
        D: DelayNs,
    {
        for poll in 1..=self.config.response_polls {
            let available = radio.bytes_available();
            if available > 0 {
                debug!("{} response byte(s) after {} poll(s)", available, poll);
                return Ok(());
            }
            if poll < self.config.response_polls {
                delay.delay_ms(self.config.response_poll_interval_ms);
            }
        }
        Err(BeaconError::ResponseTimeout)
    }
}
