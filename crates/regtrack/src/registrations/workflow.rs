use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::clock::Clock;
use super::domain::{Registration, RegistrationId, RegistrationStatus};
use super::lifecycle::LifecycleError;
use super::store::{RegistrationStore, StatusPatch, StoreError};

/// Operator decision on a pending registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve { actor: String },
    Reject,
}

impl Decision {
    pub const fn target(&self) -> RegistrationStatus {
        match self {
            Decision::Approve { .. } => RegistrationStatus::Approved,
            Decision::Reject => RegistrationStatus::Rejected,
        }
    }
}

/// Approve a pending registration, stamping the approver and decision time.
pub fn approve(
    record: &Registration,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<Registration, WorkflowError> {
    ensure_pending(record, RegistrationStatus::Approved)?;
    ensure_not_before_creation(record, now)?;
    let actor = actor.trim();
    if actor.is_empty() {
        return Err(WorkflowError::MissingActor);
    }

    let mut updated = record.clone();
    updated.status = RegistrationStatus::Approved;
    updated.approved_date = Some(now);
    updated.approved_by = Some(actor.to_string());
    updated.updated_at = now;
    Ok(updated)
}

/// Reject a pending registration. No approver metadata is captured.
pub fn reject(record: &Registration, now: DateTime<Utc>) -> Result<Registration, WorkflowError> {
    ensure_pending(record, RegistrationStatus::Rejected)?;
    ensure_not_before_creation(record, now)?;

    let mut updated = record.clone();
    updated.status = RegistrationStatus::Rejected;
    updated.updated_at = now;
    Ok(updated)
}

fn ensure_pending(record: &Registration, to: RegistrationStatus) -> Result<(), WorkflowError> {
    if record.status.is_terminal() {
        return Err(WorkflowError::InvalidTransition {
            id: record.id.clone(),
            from: record.status,
            to,
        });
    }
    Ok(())
}

/// `updated_at` may never precede `created_at`.
fn ensure_not_before_creation(
    record: &Registration,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    if now < record.created_at {
        return Err(LifecycleError::InvalidTimestamp {
            value: record.created_at.to_rfc3339(),
            reason: "creation time is after the decision time",
        }
        .into());
    }
    Ok(())
}

/// Applies decisions and persists them through the store.
///
/// The caller's record is never mutated: on success the stored record is
/// returned, on failure the error is handed back without retrying.
pub struct ApprovalWorkflow<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ApprovalWorkflow<S, C>
where
    S: RegistrationStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn approve(
        &self,
        record: &Registration,
        actor: &str,
    ) -> Result<Registration, WorkflowError> {
        self.decide(
            record,
            Decision::Approve {
                actor: actor.to_string(),
            },
        )
    }

    pub fn reject(&self, record: &Registration) -> Result<Registration, WorkflowError> {
        self.decide(record, Decision::Reject)
    }

    pub fn decide(
        &self,
        record: &Registration,
        decision: Decision,
    ) -> Result<Registration, WorkflowError> {
        let now = self.clock.now();
        let updated = match &decision {
            Decision::Approve { actor } => approve(record, actor, now)?,
            Decision::Reject => reject(record, now)?,
        };

        debug!(
            registration = %record.id,
            to = decision.target().label(),
            "persisting status transition"
        );
        let stored = self
            .store
            .update(&record.id, StatusPatch::between(record, &updated))?;

        info!(
            registration = %stored.id,
            customer_id = %stored.customer_id,
            status = stored.status.label(),
            "registration decided"
        );
        Ok(stored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("registration {id} is already {from}; cannot move to {to}")]
    InvalidTransition {
        id: RegistrationId,
        from: RegistrationStatus,
        to: RegistrationStatus,
    },
    #[error("approval requires an approver")]
    MissingActor,
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
