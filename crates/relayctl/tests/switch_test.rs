//! End-to-end wire scenarios for the switch controller.
//!
//! These tests drive a [`Switch`] against a scripted [`MockTransport`]
//! and assert on the exact bytes crossing the link, so they pin down the
//! wire behavior an actual LCUS relay board would see.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use relayctl::{Error, Feature, MockTransport, Switch, SwitchState};

// ============================================================================
// Helpers
// ============================================================================

fn ack_features() -> HashSet<Feature> {
    [Feature::Ack].into_iter().collect()
}

fn no_features() -> HashSet<Feature> {
    HashSet::new()
}

// ============================================================================
// Wire Scenarios
// ============================================================================

#[test]
fn test_construction_query_reports_on() {
    // Ack feature: the constructor queries and adopts the reported state
    let mock = MockTransport::new();
    mock.queue_reply(&[0xA0, 0x01, 0x03, 0xA4]); // OnAck

    let switch = Switch::new(mock.clone(), 0x01, ack_features()).expect("construct");

    assert_eq!(switch.status(), SwitchState::On);
    assert_eq!(mock.writes(), vec![vec![0xA0, 0x01, 0x05, 0xA6]]); // QueryAck
}

#[test]
fn test_off_writes_single_frame_without_reading() {
    let mock = MockTransport::new();
    let mut switch = Switch::new(mock.clone(), 0x01, no_features()).expect("construct");

    switch.off().expect("off");

    assert_eq!(mock.writes(), vec![vec![0xA0, 0x01, 0x00, 0xA1]]);
    assert_eq!(mock.recv_calls(), 0);
    assert_eq!(switch.status(), SwitchState::Off);
}

#[test]
fn test_reset_pulses_off_then_on() {
    let mock = MockTransport::new();
    let mut switch = Switch::new(mock.clone(), 0x01, no_features()).expect("construct");

    let started = Instant::now();
    switch
        .reset(Duration::from_millis(200), false)
        .expect("reset");

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(
        mock.writes(),
        vec![vec![0xA0, 0x01, 0x00, 0xA1], vec![0xA0, 0x01, 0x01, 0xA2]]
    );
    assert_eq!(switch.status(), SwitchState::On);
}

#[test]
fn test_reverse_reset_pulses_on_then_off() {
    let mock = MockTransport::new();
    let mut switch = Switch::new(mock.clone(), 0x01, no_features()).expect("construct");

    switch
        .reset(Duration::from_millis(10), true)
        .expect("reset");

    assert_eq!(
        mock.writes(),
        vec![vec![0xA0, 0x01, 0x01, 0xA2], vec![0xA0, 0x01, 0x00, 0xA1]]
    );
    assert_eq!(switch.status(), SwitchState::Off);
}

#[test]
fn test_toggle_adopts_reported_state() {
    // The toggle reply is authoritative even when it matches the cache
    let mock = MockTransport::new();
    mock.queue_reply(&[0xA0, 0x01, 0x03, 0xA4]); // constructor query: OnAck
    mock.queue_reply(&[0xA0, 0x01, 0x02, 0xA3]); // toggle: OffAck

    let mut switch = Switch::new(mock.clone(), 0x01, ack_features()).expect("construct");
    switch.toggle().expect("toggle");

    assert_eq!(switch.status(), SwitchState::Off);
    assert_eq!(
        mock.writes(),
        vec![
            vec![0xA0, 0x01, 0x05, 0xA6], // QueryAck
            vec![0xA0, 0x01, 0x04, 0xA5], // NegateAck
        ]
    );
}

// ============================================================================
// Failure Paths
// ============================================================================

#[test]
fn test_silent_device_surfaces_no_response() {
    // Ack assumed but the board never answers the construction query
    let mock = MockTransport::new();

    let err = Switch::new(mock.clone(), 0x01, ack_features())
        .err()
        .expect("silent device");

    assert!(matches!(err, Error::NoResponse(_)));
    assert_eq!(mock.writes(), vec![vec![0xA0, 0x01, 0x05, 0xA6]]);
}

#[test]
fn test_corrupt_reply_surfaces_protocol_error() {
    let mock = MockTransport::new();
    mock.queue_reply(&[0xA0, 0x01, 0x03, 0x00]); // bad checksum

    let err = Switch::new(mock, 0x01, ack_features())
        .err()
        .expect("corrupt reply");

    assert!(matches!(err, Error::Protocol(_)));
}

#[test]
fn test_chunked_reply_still_decodes() {
    // Serial reads can split a frame; the session reassembles it
    let mock = MockTransport::new();
    mock.queue_reply(&[0xA0]);
    mock.queue_reply(&[0x01, 0x03]);
    mock.queue_reply(&[0xA4]);

    let switch = Switch::new(mock, 0x01, ack_features()).expect("construct");

    assert_eq!(switch.status(), SwitchState::On);
}
