use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::clock::Clock;
use super::domain::Registration;
use super::lifecycle::{classify, Classification, ExpiryBucket, LifecycleError};
use super::store::{RegistrationStore, StoreError};

/// A pending registration together with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRegistration {
    pub registration: Registration,
    pub classification: Classification,
}

/// Pending registrations needing attention, each list oldest-created first.
///
/// `expiring_soon` is the operator-facing alert, `expired` the
/// administrative one. Registrations in the `Normal` bucket appear in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpiryAlerts {
    pub expiring_soon: Vec<ClassifiedRegistration>,
    pub expired: Vec<ClassifiedRegistration>,
}

impl ExpiryAlerts {
    pub fn is_empty(&self) -> bool {
        self.expiring_soon.is_empty() && self.expired.is_empty()
    }

    pub fn expiring_soon_records(&self) -> Vec<Registration> {
        self.expiring_soon
            .iter()
            .map(|entry| entry.registration.clone())
            .collect()
    }

    pub fn expired_records(&self) -> Vec<Registration> {
        self.expired
            .iter()
            .map(|entry| entry.registration.clone())
            .collect()
    }
}

/// Partition pending registrations into the expiring-soon and expired sets.
///
/// Non-pending records are ignored. A single unclassifiable record fails the
/// whole call.
pub fn aggregate(
    records: &[Registration],
    now: DateTime<Utc>,
) -> Result<ExpiryAlerts, LifecycleError> {
    let mut pending: Vec<&Registration> = records.iter().filter(|r| r.is_pending()).collect();
    pending.sort_by_key(|record| record.created_at);

    let mut alerts = ExpiryAlerts::default();
    for record in pending {
        let classification = classify(record.created_at, now)?;
        let entry = ClassifiedRegistration {
            registration: record.clone(),
            classification,
        };
        match classification.bucket {
            ExpiryBucket::ExpiringSoon => alerts.expiring_soon.push(entry),
            ExpiryBucket::Expired => alerts.expired.push(entry),
            ExpiryBucket::Normal => {}
        }
    }

    Ok(alerts)
}

/// Reads pending registrations from the store and aggregates them against
/// the injected clock. Holds no state between scans.
pub struct ExpiryMonitor<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ExpiryMonitor<S, C>
where
    S: RegistrationStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn scan(&self) -> Result<ExpiryAlerts, MonitorError> {
        let now = self.clock.now();
        let pending = self.store.list_pending()?;
        let alerts = aggregate(&pending, now)?;

        debug!(
            pending = pending.len(),
            expiring_soon = alerts.expiring_soon.len(),
            expired = alerts.expired.len(),
            "expiry scan complete"
        );
        Ok(alerts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
