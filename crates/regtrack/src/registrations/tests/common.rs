use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::registrations::clock::FixedClock;
use crate::registrations::domain::{
    CategoryRef, PanchayathRef, Registration, RegistrationId, RegistrationStatus,
};
use crate::registrations::store::{
    InMemoryRegistrationStore, RegistrationStore, StatusPatch, StoreError,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

pub(super) fn registration(suffix: &str, created_days_ago: i64) -> Registration {
    let created_at = now() - Duration::days(created_days_ago);
    Registration {
        id: RegistrationId(format!("reg-{suffix}")),
        customer_id: format!("ESP{suffix}"),
        name: format!("Applicant {suffix}"),
        mobile_number: "9847012345".to_string(),
        address: "Kizhakkemadom, Thrissur".to_string(),
        ward: "7".to_string(),
        status: RegistrationStatus::Pending,
        fee_paid: dec!(300),
        created_at,
        updated_at: created_at,
        approved_date: None,
        approved_by: None,
        category: Some(CategoryRef {
            name: "Job Card".to_string(),
        }),
        panchayath: Some(PanchayathRef {
            name: "Pananchery".to_string(),
            district: "Thrissur".to_string(),
        }),
        agent_pro: None,
        preference: None,
        verification: None,
    }
}

pub(super) fn with_status(mut record: Registration, status: RegistrationStatus) -> Registration {
    record.status = status;
    if status == RegistrationStatus::Approved {
        record.approved_date = Some(record.created_at + Duration::days(1));
        record.approved_by = Some("admin".to_string());
    }
    record
}

pub(super) fn store_with(records: Vec<Registration>) -> Arc<InMemoryRegistrationStore> {
    Arc::new(InMemoryRegistrationStore::new(records))
}

pub(super) struct UnavailableStore;

impl RegistrationStore for UnavailableStore {
    fn list_pending(&self) -> Result<Vec<Registration>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: &RegistrationId,
        _patch: StatusPatch,
    ) -> Result<Registration, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
