//! Lifecycle tracking for time-bounded applicant registrations.
//!
//! Pending registrations are classified by elapsed time into expiry buckets,
//! moved through a single approve/reject decision, and exported as
//! spreadsheet or tabular-document reports.

pub mod config;
pub mod error;
pub mod export;
pub mod registrations;
pub mod telemetry;
