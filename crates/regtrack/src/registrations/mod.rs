//! Registration lifecycle: expiry classification, alert aggregation, and the
//! one-way approval decision.

pub mod clock;
pub mod domain;
pub mod expiry;
pub mod lifecycle;
pub mod listing;
pub mod store;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    CategoryRef, PanchayathRef, Registration, RegistrationId, RegistrationStatus, StatusTally,
    Verification,
};
pub use expiry::{aggregate, ClassifiedRegistration, ExpiryAlerts, ExpiryMonitor, MonitorError};
pub use lifecycle::{
    classify, expires_at, parse_timestamp, Classification, ExpiryBucket, LifecycleError, Urgency,
    EXPIRING_SOON_WINDOW_DAYS, EXPIRY_WINDOW_DAYS,
};
pub use listing::RegistrationQuery;
pub use store::{InMemoryRegistrationStore, RegistrationStore, StatusPatch, StoreError};
pub use workflow::{approve, reject, ApprovalWorkflow, Decision, WorkflowError};
