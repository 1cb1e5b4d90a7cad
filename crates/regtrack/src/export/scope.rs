use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::ExportError;
use crate::registrations::Registration;

/// Inclusive calendar-date range, compared in the display offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExportError> {
        if start > end {
            return Err(ExportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, offset: FixedOffset) -> bool {
        let day = timestamp.with_timezone(&offset).date_naive();
        self.start <= day && day <= self.end
    }

    /// Records whose `created_at` falls inside the range, order preserved.
    pub fn filter(&self, records: &[Registration], offset: FixedOffset) -> Vec<Registration> {
        records
            .iter()
            .filter(|record| self.contains(record.created_at, offset))
            .cloned()
            .collect()
    }
}

/// Records carrying a verification stamp, order preserved.
pub fn verified_only(records: &[Registration]) -> Vec<Registration> {
    records
        .iter()
        .filter(|record| record.is_verified())
        .cloned()
        .collect()
}

/// When an export is produced and which date range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportScope {
    pub generated_at: DateTime<Utc>,
    pub date_range: Option<DateRange>,
}

impl ExportScope {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            date_range: None,
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }
}
