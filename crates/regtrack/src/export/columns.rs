//! Fixed column layouts. Labels, order, and widths are part of the exported
//! file format and must not drift.

use chrono::FixedOffset;

use super::format::{amount, currency, locale_date, locale_date_time};
use crate::registrations::{expires_at, Registration};

/// Which report is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Registrations,
    VerifiedRegistrations,
}

impl ReportKind {
    pub const fn file_stem(self) -> &'static str {
        match self {
            ReportKind::Registrations => "registrations",
            ReportKind::VerifiedRegistrations => "verified_registrations",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ReportKind::Registrations => "Registrations Report",
            ReportKind::VerifiedRegistrations => "Verified Registrations Report",
        }
    }

    pub const fn sheet_name(self) -> &'static str {
        match self {
            ReportKind::Registrations => "Registrations",
            ReportKind::VerifiedRegistrations => "Verified Registrations",
        }
    }

    /// Header row fill: blue for general reports, green for verified ones.
    pub const fn header_fill(self) -> Rgb {
        match self {
            ReportKind::Registrations => Rgb(0x42, 0x8B, 0xCA),
            ReportKind::VerifiedRegistrations => Rgb(0x22, 0xC5, 0x5E),
        }
    }

    pub const fn spreadsheet_columns(self) -> &'static [SheetColumn] {
        match self {
            ReportKind::Registrations => REGISTRATION_SHEET,
            ReportKind::VerifiedRegistrations => VERIFIED_SHEET,
        }
    }

    pub const fn document_columns(self) -> &'static [DocumentColumn] {
        match self {
            ReportKind::Registrations => REGISTRATION_DOCUMENT,
            ReportKind::VerifiedRegistrations => VERIFIED_DOCUMENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A value a report column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CustomerId,
    Name,
    Mobile,
    Address,
    Category,
    Panchayath,
    District,
    Ward,
    AgentPro,
    Preference,
    Status,
    FeePaid,
    AppliedDate,
    UpdatedDate,
    ApprovedDate,
    ExpiresOn,
    VerifiedBy,
    VerifiedAt,
}

/// Output format a cell is rendered for. Absent values render differently
/// per destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Spreadsheet,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetColumn {
    pub field: Field,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentColumn {
    pub field: Field,
    pub label: &'static str,
    pub width_mm: f32,
}

const fn sheet(field: Field, label: &'static str) -> SheetColumn {
    SheetColumn { field, label }
}

const fn doc(field: Field, label: &'static str, width_mm: f32) -> DocumentColumn {
    DocumentColumn {
        field,
        label,
        width_mm,
    }
}

const REGISTRATION_SHEET: &[SheetColumn] = &[
    sheet(Field::CustomerId, "Customer ID"),
    sheet(Field::Name, "Name"),
    sheet(Field::Mobile, "Mobile Number"),
    sheet(Field::Address, "Address"),
    sheet(Field::Category, "Category"),
    sheet(Field::Panchayath, "Panchayath"),
    sheet(Field::District, "District"),
    sheet(Field::Ward, "Ward"),
    sheet(Field::AgentPro, "Agent/PRO"),
    sheet(Field::Preference, "Preference"),
    sheet(Field::Status, "Status"),
    sheet(Field::FeePaid, "Fee Paid"),
    sheet(Field::AppliedDate, "Applied Date"),
    sheet(Field::UpdatedDate, "Updated Date"),
    sheet(Field::ExpiresOn, "Expires On"),
];

const VERIFIED_SHEET: &[SheetColumn] = &[
    sheet(Field::CustomerId, "Customer ID"),
    sheet(Field::Name, "Name"),
    sheet(Field::Mobile, "Mobile Number"),
    sheet(Field::Address, "Address"),
    sheet(Field::Category, "Category"),
    sheet(Field::Panchayath, "Panchayath"),
    sheet(Field::District, "District"),
    sheet(Field::Ward, "Ward"),
    sheet(Field::AgentPro, "Agent/PRO"),
    sheet(Field::Preference, "Preference"),
    sheet(Field::FeePaid, "Fee Paid"),
    sheet(Field::AppliedDate, "Applied Date"),
    sheet(Field::ApprovedDate, "Approved Date"),
    sheet(Field::ExpiresOn, "Expires On"),
    sheet(Field::VerifiedBy, "Verified By"),
    sheet(Field::VerifiedAt, "Verified At"),
];

const REGISTRATION_DOCUMENT: &[DocumentColumn] = &[
    doc(Field::CustomerId, "Customer ID", 20.0),
    doc(Field::Name, "Name", 30.0),
    doc(Field::Mobile, "Mobile", 22.0),
    doc(Field::Category, "Category", 25.0),
    doc(Field::Preference, "Preference", 18.0),
    doc(Field::Status, "Status", 18.0),
    doc(Field::FeePaid, "Fee", 18.0),
    doc(Field::AppliedDate, "Applied Date", 22.0),
    doc(Field::ExpiresOn, "Expires On", 22.0),
];

const VERIFIED_DOCUMENT: &[DocumentColumn] = &[
    doc(Field::CustomerId, "Customer ID", 22.0),
    doc(Field::Name, "Name", 30.0),
    doc(Field::Mobile, "Mobile", 22.0),
    doc(Field::Category, "Category", 25.0),
    doc(Field::Panchayath, "Panchayath", 25.0),
    doc(Field::FeePaid, "Fee", 18.0),
    doc(Field::AppliedDate, "Applied Date", 22.0),
    doc(Field::VerifiedBy, "Verified By", 20.0),
    doc(Field::VerifiedAt, "Verified Date", 22.0),
];

const MISSING_RELATION: &str = "N/A";
const MISSING_PREFERENCE: &str = "-";

impl Field {
    /// Render this field of `record` for `destination`.
    pub fn render(
        self,
        record: &Registration,
        destination: Destination,
        offset: FixedOffset,
    ) -> String {
        let document = destination == Destination::Document;
        let relation = |value: Option<&str>| match value {
            Some(value) => value.to_string(),
            None if document => MISSING_RELATION.to_string(),
            None => String::new(),
        };

        match self {
            Field::CustomerId => record.customer_id.clone(),
            Field::Name => record.name.clone(),
            Field::Mobile => record.mobile_number.clone(),
            Field::Address => record.address.clone(),
            Field::Category => relation(record.category.as_ref().map(|c| c.name.as_str())),
            Field::Panchayath => relation(record.panchayath.as_ref().map(|p| p.name.as_str())),
            Field::District => relation(record.panchayath.as_ref().map(|p| p.district.as_str())),
            Field::Ward => record.ward.clone(),
            Field::AgentPro => record.agent_pro.clone().unwrap_or_default(),
            Field::Preference => match record.preference.as_deref() {
                Some(value) if !value.is_empty() => value.to_string(),
                _ if document => MISSING_PREFERENCE.to_string(),
                _ => String::new(),
            },
            Field::Status => record.status.label().to_string(),
            Field::FeePaid if document => currency(record.fee_paid),
            Field::FeePaid => amount(record.fee_paid),
            Field::AppliedDate => locale_date(record.created_at, offset),
            Field::UpdatedDate => locale_date(record.updated_at, offset),
            Field::ApprovedDate => record
                .approved_date
                .map(|date| locale_date(date, offset))
                .unwrap_or_default(),
            Field::ExpiresOn => locale_date(expires_at(record.created_at), offset),
            Field::VerifiedBy => record
                .verification
                .as_ref()
                .map(|v| v.verified_by.clone())
                .unwrap_or_default(),
            Field::VerifiedAt => match &record.verification {
                Some(v) if document => locale_date(v.verified_at, offset),
                Some(v) => locale_date_time(v.verified_at, offset),
                None => String::new(),
            },
        }
    }
}
