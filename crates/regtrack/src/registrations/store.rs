use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{Registration, RegistrationId, RegistrationStatus};

/// Field changes written by a status transition.
///
/// `expected_status` is the status the record held when the transition was
/// computed. Stores that can compare-and-swap reject the write with
/// [`StoreError::Conflict`] when the stored status has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPatch {
    pub expected_status: RegistrationStatus,
    pub status: RegistrationStatus,
    pub updated_at: DateTime<Utc>,
    pub approved_date: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
}

impl StatusPatch {
    /// Patch that turns `before` into `after`.
    pub fn between(before: &Registration, after: &Registration) -> Self {
        Self {
            expected_status: before.status,
            status: after.status,
            updated_at: after.updated_at,
            approved_date: after.approved_date,
            approved_by: after.approved_by.clone(),
        }
    }

    fn apply(&self, record: &mut Registration) {
        record.status = self.status;
        record.updated_at = self.updated_at;
        record.approved_date = self.approved_date;
        record.approved_by = self.approved_by.clone();
    }
}

/// Storage collaborator owning registration records.
pub trait RegistrationStore: Send + Sync {
    /// Pending registrations, oldest `created_at` first.
    fn list_pending(&self) -> Result<Vec<Registration>, StoreError>;
    fn update(&self, id: &RegistrationId, patch: StatusPatch)
        -> Result<Registration, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("registration {0} not found")]
    NotFound(RegistrationId),
    #[error("registration {id} is {actual}, expected {expected}")]
    Conflict {
        id: RegistrationId,
        expected: RegistrationStatus,
        actual: RegistrationStatus,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded store keyed by registration id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistrationStore {
    records: Arc<Mutex<BTreeMap<RegistrationId, Registration>>>,
}

impl InMemoryRegistrationStore {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Registration>,
    {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<RegistrationId, Registration>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("registration store lock poisoned".to_string()))
    }

    pub fn insert(&self, record: Registration) -> Result<(), StoreError> {
        self.lock()?.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn fetch(&self, id: &RegistrationId) -> Result<Option<Registration>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Every record, oldest `created_at` first.
    pub fn all(&self) -> Result<Vec<Registration>, StoreError> {
        let mut records: Vec<Registration> = self.lock()?.values().cloned().collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }
}

impl RegistrationStore for InMemoryRegistrationStore {
    fn list_pending(&self) -> Result<Vec<Registration>, StoreError> {
        let mut pending: Vec<Registration> = self
            .lock()?
            .values()
            .filter(|record| record.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|record| record.created_at);
        Ok(pending)
    }

    fn update(
        &self,
        id: &RegistrationId,
        patch: StatusPatch,
    ) -> Result<Registration, StoreError> {
        let mut guard = self.lock()?;
        let record = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if record.status != patch.expected_status {
            return Err(StoreError::Conflict {
                id: id.clone(),
                expected: patch.expected_status,
                actual: record.status,
            });
        }

        patch.apply(record);
        Ok(record.clone())
    }
}
