//! Boot-time association
//!
//! Joins the configured network once at startup. The driver is polled a
//! bounded number of times; a `Connected` poll ends the loop at once, and
//! running out of polls sends the device back to deep sleep.

use beacon_hal::{ConnectionOutcome, DeepSleep, PowerController, StationLink};
use embedded_hal::delay::DelayNs;

use crate::config::AssociationConfig;

/// Drives the association retry loop
pub struct ConnectionBootstrap<'a> {
    config: &'a AssociationConfig,
}

impl<'a> ConnectionBootstrap<'a> {
    pub fn new(config: &'a AssociationConfig) -> Self {
        Self { config }
    }

    /// Associate with the configured network
    ///
    /// Returns `Connected` as soon as one poll reports it, including on the
    /// last allowed poll. Otherwise returns `Failed` after signaling the
    /// power controller and requesting deep sleep exactly once.
    pub fn bootstrap<R, P, D>(&self, radio: &mut R, power: &mut P, delay: &mut D) -> ConnectionOutcome
    where
        R: StationLink + DeepSleep,
        P: PowerController,
        D: DelayNs,
    {
        match self.associate(radio, delay) {
            ConnectionOutcome::Connected => ConnectionOutcome::Connected,
            _ => {
                request_sleep(radio, power, self.config.sleep_duration_us);
                ConnectionOutcome::Failed
            }
        }
    }

    /// Association loop without the sleep side effect
    ///
    /// Every poll that does not report `Connected` uses up one retry.
    pub fn associate<R, D>(&self, radio: &mut R, delay: &mut D) -> ConnectionOutcome
    where
        R: StationLink,
        D: DelayNs,
    {
        info!(
            "Associating with {} ({} attempts)",
            self.config.ssid,
            self.config.retries
        );
        radio.enter_station_mode();
        radio.begin_association(self.config.ssid, self.config.passphrase);

        for attempt in 1..=self.config.retries {
            match radio.poll_status() {
                ConnectionOutcome::Connected => {
                    info!("Associated after {} attempt(s)", attempt);
                    return ConnectionOutcome::Connected;
                }
                status => {
                    debug!("Association attempt {}: {:?}", attempt, status);
                }
            }
            if attempt < self.config.retries {
                delay.delay_ms(self.config.poll_interval_ms);
            }
        }

        error!(
            "Association failed after {} attempt(s)",
            self.config.retries
        );
        ConnectionOutcome::Failed
    }
}

/// Signal the power controller, then hand the chip to deep sleep
///
/// A failing power line is logged; deep sleep is requested regardless.
pub fn request_sleep<R, P>(radio: &mut R, power: &mut P, duration_us: u64)
where
    R: DeepSleep,
    P: PowerController,
{
    if power.signal_sleep().is_err() {
        warn!("Power controller did not accept the sleep signal");
    }
    info!("Requesting deep sleep ({} us)", duration_us);
    radio.request_deep_sleep(duration_us);
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_hal::mock::{MockDelay, MockPin, MockRadio, PinLevel};
    use beacon_hal::PinPowerSignal;

    use crate::config::CONNECTION_RETRIES;

    fn config(retries: u8) -> AssociationConfig {
        AssociationConfig {
            ssid: "beacon-net",
            passphrase: "secret",
            retries,
            poll_interval_ms: 500,
            sleep_duration_us: 0,
        }
    }

    fn run(radio: &mut MockRadio, retries: u8) -> (ConnectionOutcome, MockPin) {
        let config = config(retries);
        let mut power = PinPowerSignal::new(MockPin::new());
        let mut delay = MockDelay::new();
        let outcome = ConnectionBootstrap::new(&config).bootstrap(radio, &mut power, &mut delay);
        (outcome, power.release())
    }

    #[test]
    fn test_sets_station_mode_and_credentials() {
        let mut radio = MockRadio::new().with_statuses([ConnectionOutcome::Connected]);
        run(&mut radio, 3);

        assert!(radio.station_mode());
        assert_eq!(radio.calls().enter_station_mode, 1);
        assert_eq!(
            radio.associations(),
            &[("beacon-net".to_string(), "secret".to_string())]
        );
    }

    #[test]
    fn test_connected_on_first_poll_does_not_sleep() {
        let mut radio = MockRadio::new().with_statuses([ConnectionOutcome::Connected]);
        let (outcome, pin) = run(&mut radio, CONNECTION_RETRIES);

        assert_eq!(outcome, ConnectionOutcome::Connected);
        assert_eq!(radio.calls().poll_status, 1);
        assert!(radio.deep_sleeps().is_empty());
        assert!(pin.transitions().is_empty());
    }

    #[test]
    fn test_all_polls_failed_sleeps_once() {
        let mut radio = MockRadio::new().with_fallback_status(ConnectionOutcome::Failed);
        let (outcome, pin) = run(&mut radio, CONNECTION_RETRIES);

        assert_eq!(outcome, ConnectionOutcome::Failed);
        assert_eq!(radio.calls().poll_status, usize::from(CONNECTION_RETRIES));
        assert_eq!(radio.deep_sleeps(), &[0]);
        assert_eq!(pin.transitions(), &[PinLevel::High]);
    }

    #[test]
    fn test_success_on_last_allowed_poll_counts() {
        let retries = CONNECTION_RETRIES;
        let mut statuses = vec![ConnectionOutcome::Failed; usize::from(retries) - 1];
        statuses.push(ConnectionOutcome::Connected);
        let mut radio = MockRadio::new()
            .with_statuses(statuses)
            .with_fallback_status(ConnectionOutcome::Failed);
        let (outcome, _) = run(&mut radio, retries);

        assert_eq!(outcome, ConnectionOutcome::Connected);
        assert_eq!(radio.calls().poll_status, usize::from(retries));
        assert_eq!(radio.calls().request_deep_sleep, 0);
    }

    #[test]
    fn test_success_after_budget_is_not_observed() {
        let retries = 3;
        let mut radio = MockRadio::new()
            .with_statuses([ConnectionOutcome::Failed; 3])
            .with_fallback_status(ConnectionOutcome::Connected);
        let (outcome, _) = run(&mut radio, retries);

        assert_eq!(outcome, ConnectionOutcome::Failed);
        assert_eq!(radio.calls().poll_status, 3);
        assert_eq!(radio.calls().request_deep_sleep, 1);
    }

    #[test]
    fn test_pending_polls_use_up_the_budget() {
        let mut radio = MockRadio::new().with_fallback_status(ConnectionOutcome::Pending);
        let (outcome, _) = run(&mut radio, 4);

        assert_eq!(outcome, ConnectionOutcome::Failed);
        assert_eq!(radio.calls().poll_status, 4);
        assert_eq!(radio.deep_sleeps().len(), 1);
    }

    #[test]
    fn test_every_budget_size() {
        for retries in 1..=8u8 {
            for success_at in 1..=retries {
                let mut statuses = vec![ConnectionOutcome::Failed; usize::from(success_at) - 1];
                statuses.push(ConnectionOutcome::Connected);
                let mut radio = MockRadio::new().with_statuses(statuses);
                let (outcome, _) = run(&mut radio, retries);
                assert_eq!(outcome, ConnectionOutcome::Connected);
                assert_eq!(radio.calls().poll_status, usize::from(success_at));
                assert!(radio.deep_sleeps().is_empty());
            }

            let mut radio = MockRadio::new().with_fallback_status(ConnectionOutcome::Failed);
            let (outcome, _) = run(&mut radio, retries);
            assert_eq!(outcome, ConnectionOutcome::Failed);
            assert_eq!(radio.deep_sleeps().len(), 1);
        }
    }

    #[test]
    fn test_polls_are_spaced_by_interval() {
        let config = config(3);
        let mut radio = MockRadio::new().with_fallback_status(ConnectionOutcome::Pending);
        let mut delay = MockDelay::new();
        ConnectionBootstrap::new(&config).associate(&mut radio, &mut delay);

        assert_eq!(delay.calls(), 2);
        assert_eq!(delay.elapsed_ms(), 1_000);
    }

    #[test]
    fn test_sleep_requested_even_if_power_line_fails() {
        let mut radio = MockRadio::new();
        let mut power = PinPowerSignal::new(MockPin::failing());
        request_sleep(&mut radio, &mut power, 5_000_000);

        assert_eq!(radio.deep_sleeps(), &[5_000_000]);
    }
}
