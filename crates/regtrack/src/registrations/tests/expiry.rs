use super::common::*;
use crate::registrations::domain::RegistrationStatus;
use crate::registrations::expiry::{aggregate, ExpiryMonitor, MonitorError};
use crate::registrations::lifecycle::LifecycleError;
use crate::registrations::store::StoreError;
use chrono::Duration;
use std::sync::Arc;

#[test]
fn aggregate_partitions_pending_records_by_bucket() {
    let records = vec![
        registration("fresh", 2),
        registration("soon", 11),
        registration("edge", 15),
        registration("late", 16),
    ];

    let alerts = aggregate(&records, now()).expect("aggregates");

    let soon: Vec<_> = alerts
        .expiring_soon
        .iter()
        .map(|entry| entry.registration.customer_id.as_str())
        .collect();
    assert_eq!(soon, vec!["ESPsoon"]);
    assert_eq!(alerts.expiring_soon[0].classification.days_remaining, 4);

    assert_eq!(alerts.expired.len(), 1);
    assert_eq!(alerts.expired[0].registration.customer_id, "ESPlate");
    assert_eq!(alerts.expired[0].classification.days_expired_by, 1);
}

#[test]
fn aggregate_skips_decided_records() {
    let records = vec![
        with_status(registration("approved", 30), RegistrationStatus::Approved),
        with_status(registration("rejected", 12), RegistrationStatus::Rejected),
        registration("pending", 30),
    ];

    let alerts = aggregate(&records, now()).expect("aggregates");

    assert!(alerts.expiring_soon.is_empty());
    assert_eq!(alerts.expired.len(), 1);
    assert!(alerts
        .expired
        .iter()
        .chain(alerts.expiring_soon.iter())
        .all(|entry| entry.registration.is_pending()));
}

#[test]
fn aggregate_orders_oldest_created_first() {
    let records = vec![
        registration("c", 17),
        registration("a", 40),
        registration("b", 25),
        registration("y", 10),
        registration("x", 13),
    ];

    let alerts = aggregate(&records, now()).expect("aggregates");

    let expired: Vec<_> = alerts
        .expired
        .iter()
        .map(|entry| entry.registration.created_at)
        .collect();
    let mut sorted = expired.clone();
    sorted.sort();
    assert_eq!(expired, sorted);
    assert_eq!(alerts.expired[0].registration.customer_id, "ESPa");
    assert_eq!(alerts.expiring_soon[0].registration.customer_id, "ESPx");
}

#[test]
fn aggregate_fails_whole_call_on_future_creation() {
    let mut bad = registration("bad", 0);
    bad.created_at = now() + Duration::hours(3);
    let records = vec![registration("late", 20), bad];

    match aggregate(&records, now()) {
        Err(LifecycleError::InvalidTimestamp { .. }) => {}
        other => panic!("expected invalid timestamp, got {other:?}"),
    }
}

#[test]
fn monitor_scans_store_with_injected_clock() {
    let store = store_with(vec![
        registration("soon", 13),
        registration("late", 19),
        with_status(registration("done", 19), RegistrationStatus::Approved),
    ]);
    let monitor = ExpiryMonitor::new(store, clock());

    let alerts = monitor.scan().expect("scan succeeds");

    assert_eq!(alerts.expiring_soon_records().len(), 1);
    assert_eq!(alerts.expired_records()[0].customer_id, "ESPlate");
    assert!(!alerts.is_empty());
}

#[test]
fn monitor_surfaces_store_failures() {
    let monitor = ExpiryMonitor::new(Arc::new(UnavailableStore), clock());

    match monitor.scan() {
        Err(MonitorError::Store(StoreError::Unavailable(message))) => {
            assert_eq!(message, "database offline")
        }
        other => panic!("expected store error, got {other:?}"),
    }
}

#[test]
fn alerts_serialize_with_store_shaped_registrations() {
    let alerts = aggregate(&[registration("soon", 11)], now()).expect("aggregates");

    let json = serde_json::to_value(&alerts).expect("serializes");
    let entry = &json["expiring_soon"][0];

    assert_eq!(entry["registration"]["id"], "reg-soon");
    assert_eq!(entry["registration"]["fee_paid"], "300");
    assert_eq!(entry["registration"]["approved_by"], serde_json::Value::Null);
    assert_eq!(entry["classification"]["days_remaining"], 4);
}
