//! Boot, scan, transmit and sleep driven through the public API

use beacon_core::{Beacon, BeaconConfig, BeaconError, ConnectionOutcome, PinPowerSignal};
use beacon_hal::mock::{MockDelay, MockPin, MockRadio, PinLevel};

const NETWORKS: &[&str] = &["positioning"];

fn config(transmission_size: usize) -> BeaconConfig {
    let mut config = BeaconConfig::default();
    config.association.ssid = "beacon-net";
    config.association.passphrase = "secret";
    config.scan.positioning_networks = NETWORKS;
    config.endpoint.response_polls = 4;
    config.transmission_size = transmission_size;
    config
}

fn office_radio() -> MockRadio {
    MockRadio::new()
        .with_statuses([ConnectionOutcome::Pending, ConnectionOutcome::Connected])
        .with_filler_networks("SomeOtherSSID", 8)
        .with_access_point("positioning", "00-14-22-01-23-45", 12)
        .with_access_point("positioning", "01-24-22-AA-23-FF", 2)
}

#[test]
fn test_full_duty_cycle_with_one_datapoint_per_batch() {
    let mut beacon = Beacon::new(
        office_radio(),
        PinPowerSignal::new(MockPin::new()),
        MockDelay::new(),
        config(1),
    )
    .unwrap();

    assert_eq!(beacon.setup(), ConnectionOutcome::Connected);
    let report = beacon.run_cycle();
    assert!(report.is_complete());
    assert_eq!(report.datapoints_found, 2);
    assert_eq!(report.batches_sent, 2);

    beacon.request_sleep();

    let (radio, power, delay) = beacon.release();
    let calls = radio.calls();
    assert_eq!(calls.poll_status, 2);
    assert_eq!(calls.open_connection, 2);
    assert_eq!(calls.send, 2);
    assert_eq!(calls.close_connection, 2);
    assert_eq!(radio.bssid_reads(), &[8, 9]);
    assert_eq!(radio.deep_sleeps(), &[0]);
    assert_eq!(
        power.release().transitions(),
        &[PinLevel::Low, PinLevel::High]
    );
    assert_eq!(delay.calls(), 1);

    let sent = radio.sent_text();
    assert!(sent[0].starts_with("POST /datapoints HTTP/1.1\r\n"));
    assert!(sent[0].ends_with("[{\"bssid\":\"00-14-22-01-23-45\",\"rssi\":12}]"));
    assert!(sent[1].ends_with("[{\"bssid\":\"01-24-22-AA-23-FF\",\"rssi\":2}]"));
}

#[test]
fn test_failed_association_sleeps_without_scanning() {
    let mut beacon = Beacon::new(
        MockRadio::new().with_fallback_status(ConnectionOutcome::Failed),
        PinPowerSignal::new(MockPin::new()),
        MockDelay::new(),
        config(10),
    )
    .unwrap();

    assert_eq!(beacon.start(), Err(BeaconError::AssociationFailed));

    let (radio, power, _) = beacon.release();
    assert_eq!(radio.calls().poll_status, 10);
    assert_eq!(radio.calls().scan_networks, 0);
    assert_eq!(radio.deep_sleeps().len(), 1);
    assert_eq!(
        power.release().transitions(),
        &[PinLevel::Low, PinLevel::High]
    );
}

#[test]
fn test_unanswered_batch_ends_cycle_and_next_cycle_starts_fresh() {
    let radio = office_radio()
        .with_availability([0, 0, 0, 0])
        .with_fallback_availability(1);
    let mut beacon = Beacon::new(
        radio,
        PinPowerSignal::new(MockPin::new()),
        MockDelay::new(),
        config(1),
    )
    .unwrap();
    assert_eq!(beacon.setup(), ConnectionOutcome::Connected);

    let first = beacon.run_cycle();
    assert_eq!(first.failure, Some(BeaconError::ResponseTimeout));
    assert_eq!(first.batches_attempted, 1);
    assert_eq!(beacon.radio().calls().open_connection, 1);

    let second = beacon.run_cycle();
    assert!(second.is_complete());
    assert_eq!(second.batches_sent, 2);
    assert_eq!(beacon.radio().calls().scan_networks, 2);
    assert_eq!(beacon.radio().calls().open_connection, 3);
}

#[test]
fn test_cycle_without_positioning_networks_opens_no_connection() {
    let mut beacon = Beacon::new(
        MockRadio::new()
            .with_statuses([ConnectionOutcome::Connected])
            .with_filler_networks("SomeOtherSSID", 10),
        PinPowerSignal::new(MockPin::new()),
        MockDelay::new(),
        config(1),
    )
    .unwrap();
    assert_eq!(beacon.setup(), ConnectionOutcome::Connected);

    let report = beacon.run_cycle();
    assert_eq!(report.datapoints_found, 0);
    assert!(report.is_complete());
    assert_eq!(beacon.radio().calls().open_connection, 0);
    assert_eq!(beacon.radio().calls().ssid_at, 10);
}
