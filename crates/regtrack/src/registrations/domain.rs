use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque store identifier for a registration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegistrationId(pub String);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Approval state. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, RegistrationStatus::Pending)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Denormalized category reference joined in by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// Denormalized local-body reference joined in by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanchayathRef {
    pub name: String,
    pub district: String,
}

/// Post-approval verification stamp attached by an external step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub verified_by: String,
    pub verified_at: DateTime<Utc>,
}

/// A tracked applicant registration.
///
/// `created_at` is the origin of every expiry calculation. The decision
/// fields (`approved_date`, `approved_by`) are only written by a status
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub customer_id: String,
    pub name: String,
    pub mobile_number: String,
    pub address: String,
    pub ward: String,
    pub status: RegistrationStatus,
    pub fee_paid: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_date: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub category: Option<CategoryRef>,
    pub panchayath: Option<PanchayathRef>,
    pub agent_pro: Option<String>,
    pub preference: Option<String>,
    pub verification: Option<Verification>,
}

impl Registration {
    pub fn is_pending(&self) -> bool {
        self.status == RegistrationStatus::Pending
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_some()
    }
}

/// Per-status counts over a registration listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusTally {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Registration>,
    {
        records
            .into_iter()
            .fold(StatusTally::default(), |mut tally, record| {
                tally.total += 1;
                match record.status {
                    RegistrationStatus::Pending => tally.pending += 1,
                    RegistrationStatus::Approved => tally.approved += 1,
                    RegistrationStatus::Rejected => tally.rejected += 1,
                }
                tally
            })
    }
}
