//! Duty cycle orchestration
//!
//! One cycle scans, splits the datapoints into consecutive batches of the
//! current transmission size and sends them in order. The first failing
//! batch ends the cycle; nothing is retried and nothing carries over.

use beacon_hal::{NetworkScan, SocketLink};
use embedded_hal::delay::DelayNs;

use crate::config::validate_transmission_size;
use crate::error::BeaconError;
use crate::scanner::PositioningScanner;
use crate::transmit::TransmissionPipeline;

/// What happened during one duty cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Datapoints produced by the scan
    pub datapoints_found: usize,
    /// Batches the datapoints were split into
    pub batches_planned: usize,
    /// Batches handed to the pipeline
    pub batches_attempted: usize,
    /// Batches the endpoint acknowledged
    pub batches_sent: usize,
    /// Datapoints in acknowledged batches
    pub datapoints_sent: usize,
    /// Error of the batch that ended the cycle early
    pub failure: Option<BeaconError>,
}

impl CycleReport {
    /// Every planned batch was acknowledged (trivially true for an empty scan)
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.batches_sent == self.batches_planned
    }
}

/// Runs scan-then-transmit duty cycles
pub struct CycleController<'a> {
    scanner: PositioningScanner<'a>,
    pipeline: TransmissionPipeline<'a>,
    transmission_size: usize,
}

impl<'a> CycleController<'a> {
    /// Controller sending batches of `transmission_size` datapoints
    ///
    /// Fails for a size of zero.
    pub fn new(
        scanner: PositioningScanner<'a>,
        pipeline: TransmissionPipeline<'a>,
        transmission_size: usize,
    ) -> Result<Self, BeaconError> {
        validate_transmission_size(transmission_size)?;
        Ok(Self {
            scanner,
            pipeline,
            transmission_size,
        })
    }

    pub fn transmission_size(&self) -> usize {
        self.transmission_size
    }

    /// Run one duty cycle
    ///
    /// An empty scan returns before any connection is attempted.
    pub fn run_cycle<R, D>(&self, radio: &mut R, delay: &mut D) -> CycleReport
    where
        R: NetworkScan + SocketLink,
        D: DelayNs,
    {
        let datapoints = self.scanner.scan(radio);
        let mut report = CycleReport {
            datapoints_found: datapoints.len(),
            batches_planned: datapoints.len().div_ceil(self.transmission_size),
            ..CycleReport::default()
        };

        if datapoints.is_empty() {
            info!("No positioning datapoints, nothing to transmit");
            return report;
        }

        for (index, batch) in datapoints.chunks(self.transmission_size).enumerate() {
            debug!(
                "Batch {}/{}: {} datapoint(s)",
                index + 1,
                report.batches_planned,
                batch.len()
            );
            report.batches_attempted += 1;
            match self.pipeline.transmit(radio, delay, batch) {
                Ok(()) => {
                    report.batches_sent += 1;
                    report.datapoints_sent += batch.len();
                }
                Err(e) => {
                    warn!(
                        "Batch {}/{} failed ({}), abandoning cycle",
                        index + 1,
                        report.batches_planned,
                        e
                    );
                    report.failure = Some(e);
                    break;
                }
            }
        }

        info!(
            "Cycle done: {}/{} batch(es), {}/{} datapoint(s) sent",
            report.batches_sent,
            report.batches_planned,
            report.datapoints_sent,
            report.datapoints_found
        );
        report
    }
}
