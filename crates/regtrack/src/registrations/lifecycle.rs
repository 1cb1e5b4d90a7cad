use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Days a pending registration stays valid after creation.
pub const EXPIRY_WINDOW_DAYS: i64 = 15;

/// Final stretch of the expiry window in which operators are alerted.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 5;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Operational bucket for a pending registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryBucket {
    Normal,
    ExpiringSoon,
    Expired,
}

impl ExpiryBucket {
    pub const fn label(self) -> &'static str {
        match self {
            ExpiryBucket::Normal => "normal",
            ExpiryBucket::ExpiringSoon => "expiring soon",
            ExpiryBucket::Expired => "expired",
        }
    }
}

/// How close an expiring-soon registration is to the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Moderate,
    High,
    Critical,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Result of measuring one registration against the expiry window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub days_elapsed: i64,
    pub days_remaining: i64,
    pub days_expired_by: i64,
    pub bucket: ExpiryBucket,
}

impl Classification {
    fn from_days_elapsed(days_elapsed: i64) -> Self {
        let days_remaining = (EXPIRY_WINDOW_DAYS - days_elapsed).max(0);
        let days_expired_by = (days_elapsed - EXPIRY_WINDOW_DAYS).max(0);

        // At exactly the window edge nothing remains but nothing is overdue
        // either, so the record sits in `Normal` for that one day.
        let bucket = if days_elapsed > EXPIRY_WINDOW_DAYS {
            ExpiryBucket::Expired
        } else if days_remaining > 0 && days_remaining <= EXPIRING_SOON_WINDOW_DAYS {
            ExpiryBucket::ExpiringSoon
        } else {
            ExpiryBucket::Normal
        };

        Self {
            days_elapsed,
            days_remaining,
            days_expired_by,
            bucket,
        }
    }

    pub fn urgency(&self) -> Option<Urgency> {
        if self.bucket != ExpiryBucket::ExpiringSoon {
            return None;
        }
        let urgency = if self.days_remaining <= 1 {
            Urgency::Critical
        } else if self.days_remaining <= 3 {
            Urgency::High
        } else {
            Urgency::Moderate
        };
        Some(urgency)
    }
}

/// Classify a registration created at `created_at` as seen at `now`.
///
/// Elapsed time is counted in whole days rounding partial days up, so a
/// registration created an hour ago has one elapsed day.
pub fn classify(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Classification, LifecycleError> {
    if created_at > now {
        return Err(LifecycleError::InvalidTimestamp {
            value: created_at.to_rfc3339(),
            reason: "creation time is after the evaluation time",
        });
    }

    let elapsed_ms = (now - created_at).num_milliseconds();
    let days_elapsed = (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    Ok(Classification::from_days_elapsed(days_elapsed))
}

/// Instant a registration created at `created_at` runs out of its window.
pub fn expires_at(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(EXPIRY_WINDOW_DAYS)
}

/// Parse a raw store timestamp (RFC 3339).
pub fn parse_timestamp(raw: Option<&str>) -> Result<DateTime<Utc>, LifecycleError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(LifecycleError::InvalidTimestamp {
            value: String::new(),
            reason: "timestamp is missing",
        })?;

    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| LifecycleError::InvalidTimestamp {
            value: raw.to_string(),
            reason: "timestamp is not RFC 3339",
        })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: &'static str },
}
