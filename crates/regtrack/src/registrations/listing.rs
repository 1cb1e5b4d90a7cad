use std::cmp::Reverse;

use super::domain::{Registration, RegistrationStatus};

/// Management listing filter: free-text search plus an optional status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationQuery {
    search: Option<String>,
    status: Option<RegistrationStatus>,
}

impl RegistrationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match over name, mobile number and
    /// customer id. A blank term matches everything.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn status(mut self, status: RegistrationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &Registration) -> bool {
        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }
        match &self.search {
            Some(term) => [&record.name, &record.mobile_number, &record.customer_id]
                .iter()
                .any(|value| value.to_lowercase().contains(term.as_str())),
            None => true,
        }
    }

    /// Matching records, newest-created first.
    pub fn apply(&self, records: &[Registration]) -> Vec<Registration> {
        let mut matched: Vec<Registration> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        matched.sort_by_key(|record| Reverse(record.created_at));
        matched
    }
}
