//! Beacon facade
//!
//! Owns the radio, power controller and delay source and exposes the boot
//! and duty cycle operations a board's entry point calls.

use beacon_hal::{ConnectionOutcome, PowerController, RadioLink};
use embedded_hal::delay::DelayNs;

use crate::bootstrap::{self, ConnectionBootstrap};
use crate::config::{validate_transmission_size, BeaconConfig};
use crate::cycle::{CycleController, CycleReport};
use crate::error::BeaconError;
use crate::scanner::PositioningScanner;
use crate::transmit::TransmissionPipeline;

/// A positioning beacon bound to its hardware
pub struct Beacon<R, P, D> {
    radio: R,
    power: P,
    delay: D,
    config: BeaconConfig,
    transmission_size: usize,
}

impl<R, P, D> Beacon<R, P, D>
where
    R: RadioLink,
    P: PowerController,
    D: DelayNs,
{
    /// Bind the hardware to a validated configuration
    pub fn new(radio: R, power: P, delay: D, config: BeaconConfig) -> Result<Self, BeaconError> {
        config.validate()?;
        let transmission_size = config.transmission_size;
        Ok(Self {
            radio,
            power,
            delay,
            config,
            transmission_size,
        })
    }

    /// Hold the power line awake, then run the association bootstrap
    ///
    /// On `Failed` deep sleep has already been requested.
    pub fn setup(&mut self) -> ConnectionOutcome {
        if self.power.hold_awake().is_err() {
            warn!("Power controller did not accept the awake signal");
        }
        ConnectionBootstrap::new(&self.config.association).bootstrap(
            &mut self.radio,
            &mut self.power,
            &mut self.delay,
        )
    }

    /// [`setup`](Self::setup) as a `Result`
    pub fn start(&mut self) -> Result<(), BeaconError> {
        match self.setup() {
            ConnectionOutcome::Connected => Ok(()),
            _ => Err(BeaconError::AssociationFailed),
        }
    }

    /// Run one scan and transmit cycle
    pub fn run_cycle(&mut self) -> CycleReport {
        let controller = CycleController::new(
            PositioningScanner::new(&self.config.scan),
            TransmissionPipeline::new(&self.config.endpoint),
            self.transmission_size,
        );
        match controller {
            Ok(controller) => controller.run_cycle(&mut self.radio, &mut self.delay),
            Err(e) => {
                error!("Cannot run cycle: {}", e);
                CycleReport {
                    failure: Some(e),
                    ..CycleReport::default()
                }
            }
        }
    }

    /// Signal the power controller and request deep sleep
    pub fn request_sleep(&mut self) {
        bootstrap::request_sleep(
            &mut self.radio,
            &mut self.power,
            self.config.association.sleep_duration_us,
        );
    }

    /// Datapoints per transmission for upcoming cycles
    pub fn transmission_size(&self) -> usize {
        self.transmission_size
    }

    /// Change the transmission size; zero is rejected and the previous size
    /// is kept
    pub fn set_transmission_size(&mut self, size: usize) -> Result<(), BeaconError> {
        validate_transmission_size(size)?;
        debug!(
            "Transmission size {} -> {}",
            self.transmission_size,
            size
        );
        self.transmission_size = size;
        Ok(())
    }

    pub fn config(&self) -> &BeaconConfig {
        &self.config
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Give the hardware back
    pub fn release(self) -> (R, P, D) {
        (self.radio, self.power, self.delay)
    }
}
