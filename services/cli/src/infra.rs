use chrono::{DateTime, NaiveDate, Utc};
use regtrack::error::AppError;
use regtrack::registrations::{
    parse_timestamp, CategoryRef, InMemoryRegistrationStore, PanchayathRef, Registration,
    RegistrationId, RegistrationStatus, Verification,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Registration as exported from the hosted store: joined relations keep the
/// table names and verifications arrive as a list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct RegistrationRow {
    id: String,
    customer_id: String,
    name: String,
    mobile_number: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    ward: String,
    status: RegistrationStatus,
    #[serde(default, deserialize_with = "non_negative_fee")]
    fee_paid: Decimal,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    approved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    approved_by: Option<String>,
    #[serde(default)]
    categories: Option<CategoryRef>,
    #[serde(default)]
    panchayaths: Option<PanchayathRef>,
    #[serde(default)]
    agent_pro: Option<String>,
    #[serde(default)]
    preference: Option<String>,
    #[serde(default)]
    registration_verifications: Vec<Verification>,
}

impl RegistrationRow {
    fn into_registration(self) -> Result<Registration, AppError> {
        let created_at = parse_timestamp(self.created_at.as_deref())?;
        let updated_at = match self.updated_at.as_deref() {
            Some(raw) => parse_timestamp(Some(raw))?,
            None => created_at,
        };

        Ok(Registration {
            id: RegistrationId(self.id),
            customer_id: self.customer_id,
            name: self.name,
            mobile_number: self.mobile_number,
            address: self.address,
            ward: self.ward,
            status: self.status,
            fee_paid: self.fee_paid,
            created_at,
            updated_at,
            approved_date: self.approved_date,
            approved_by: self.approved_by,
            category: self.categories,
            panchayath: self.panchayaths,
            agent_pro: self.agent_pro,
            preference: self.preference,
            verification: self.registration_verifications.into_iter().next(),
        })
    }
}

impl From<Registration> for RegistrationRow {
    fn from(record: Registration) -> Self {
        Self {
            id: record.id.0,
            customer_id: record.customer_id,
            name: record.name,
            mobile_number: record.mobile_number,
            address: record.address,
            ward: record.ward,
            status: record.status,
            fee_paid: record.fee_paid,
            created_at: Some(record.created_at.to_rfc3339()),
            updated_at: Some(record.updated_at.to_rfc3339()),
            approved_date: record.approved_date,
            approved_by: record.approved_by,
            categories: record.category,
            panchayaths: record.panchayath,
            agent_pro: record.agent_pro,
            preference: record.preference,
            registration_verifications: record.verification.into_iter().collect(),
        }
    }
}

fn non_negative_fee<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let fee = Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default();
    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(serde::de::Error::custom(format!(
            "fee_paid must not be negative, got {fee}"
        )));
    }
    Ok(fee)
}

pub(crate) fn parse_registrations(raw: &str) -> Result<Vec<Registration>, AppError> {
    let rows: Vec<RegistrationRow> = serde_json::from_str(raw)?;
    rows.into_iter()
        .map(RegistrationRow::into_registration)
        .collect()
}

pub(crate) fn load_snapshot(path: &Path) -> Result<Vec<Registration>, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_registrations(&raw)
}

pub(crate) fn load_store(path: &Path) -> Result<InMemoryRegistrationStore, AppError> {
    Ok(InMemoryRegistrationStore::new(load_snapshot(path)?))
}

pub(crate) fn write_snapshot(path: &Path, records: Vec<Registration>) -> Result<(), AppError> {
    let rows: Vec<RegistrationRow> = records.into_iter().map(RegistrationRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    fs::write(path, json)?;
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(Some(raw)).map_err(|err| err.to_string())
}
