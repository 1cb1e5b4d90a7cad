use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use regtrack::config::india_standard_time;
use regtrack::export::{
    verified_only, DateRange, ExportError, ExportScope, ReportExporter, ReportKind,
};
use regtrack::export::metrics::{text_width_mm, Face};
use regtrack::registrations::{
    CategoryRef, PanchayathRef, Registration, RegistrationId, RegistrationStatus, Verification,
};
use rust_decimal_macros::dec;

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 14, 6, 45, 0)
        .single()
        .expect("valid instant")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn record(id: &str, created_at: DateTime<Utc>) -> Registration {
    Registration {
        id: RegistrationId(id.to_string()),
        customer_id: id.to_uppercase(),
        name: "Suresh Kumar".to_string(),
        mobile_number: "9447001122".to_string(),
        address: "Near Temple, Ollur".to_string(),
        ward: "3".to_string(),
        status: RegistrationStatus::Pending,
        fee_paid: dec!(250.00),
        created_at,
        updated_at: created_at,
        approved_date: None,
        approved_by: None,
        category: Some(CategoryRef {
            name: "Pennyekart Free Registration".to_string(),
        }),
        panchayath: Some(PanchayathRef {
            name: "Ollur".to_string(),
            district: "Thrissur".to_string(),
        }),
        agent_pro: None,
        preference: None,
        verification: None,
    }
}

fn bare_record(id: &str, created_at: DateTime<Utc>) -> Registration {
    let mut record = record(id, created_at);
    record.category = None;
    record.panchayath = None;
    record
}

fn verified(id: &str, created_at: DateTime<Utc>) -> Registration {
    let mut record = record(id, created_at);
    record.status = RegistrationStatus::Approved;
    record.approved_date = Some(created_at + Duration::days(2));
    record.approved_by = Some("admin".to_string());
    record.verification = Some(Verification {
        verified_by: "field-officer".to_string(),
        verified_at: created_at + Duration::days(3),
    });
    record
}

fn exporter(kind: ReportKind) -> ReportExporter {
    ReportExporter::new(kind, india_standard_time())
}

#[test]
fn rows_match_input_count_with_stable_column_order() {
    let created = Utc
        .with_ymd_and_hms(2025, 8, 1, 4, 0, 0)
        .single()
        .expect("valid");
    let records = vec![record("esp-1", created), bare_record("esp-2", created)];
    let exporter = exporter(ReportKind::Registrations);

    let first = exporter.to_rows(&records);
    let second = exporter.to_rows(&records);
    assert_eq!(first.len(), records.len());
    assert_eq!(first, second);

    let sheet = exporter.spreadsheet(&records);
    assert_eq!(
        sheet.columns,
        vec![
            "Customer ID",
            "Name",
            "Mobile Number",
            "Address",
            "Category",
            "Panchayath",
            "District",
            "Ward",
            "Agent/PRO",
            "Preference",
            "Status",
            "Fee Paid",
            "Applied Date",
            "Updated Date",
            "Expires On",
        ]
    );
    assert_eq!(
        first[0].cells(),
        [
            "ESP-1",
            "Suresh Kumar",
            "9447001122",
            "Near Temple, Ollur",
            "Pennyekart Free Registration",
            "Ollur",
            "Thrissur",
            "3",
            "",
            "",
            "pending",
            "250",
            "1/8/2025",
            "1/8/2025",
            "16/8/2025",
        ]
    );
    // Missing relations are blank in the spreadsheet.
    assert_eq!(&first[1].cells()[4..7], ["", "", ""]);
}

#[test]
fn empty_inputs_split_between_no_op_and_error() {
    let exporter = exporter(ReportKind::Registrations);
    let scope = ExportScope::new(generated_at());

    assert!(exporter.to_rows(&[]).is_empty());
    assert!(exporter
        .to_spreadsheet(&[], &scope)
        .expect("spreadsheet tolerates empty input")
        .is_none());

    match exporter.to_document(&[], &scope) {
        Err(ExportError::Empty { kind }) => assert_eq!(kind, ReportKind::Registrations),
        other => panic!("expected empty export error, got {other:?}"),
    }
}

#[test]
fn document_cells_use_placeholders_and_currency() {
    let created = generated_at() - Duration::days(4);
    let records = vec![bare_record("esp-9", created)];
    let layout = exporter(ReportKind::Registrations)
        .layout(&records, &ExportScope::new(generated_at()))
        .expect("layout");

    let labels: Vec<_> = layout.table.columns.iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        vec![
            "Customer ID",
            "Name",
            "Mobile",
            "Category",
            "Preference",
            "Status",
            "Fee",
            "Applied Date",
            "Expires On",
        ]
    );
    let row = &layout.table.rows[0];
    assert_eq!(row[3], "N/A");
    assert_eq!(row[4], "-");
    assert_eq!(row[6], "₹250");
    assert_eq!(layout.table.header_fill, regtrack::export::Rgb(0x42, 0x8B, 0xCA));
    assert_eq!(layout.table.font_size, 7.0);
    assert_eq!(layout.table.start_y_mm, 35.0);
    assert_eq!(layout.lines.len(), 2);
    assert_eq!(layout.lines[1].text, "Generated on: 14/8/2025");
}

#[test]
fn long_document_cells_wrap_within_their_column() {
    let created = generated_at() - Duration::days(4);
    let records = vec![record("esp-1", created), bare_record("esp-2", created)];
    let layout = exporter(ReportKind::Registrations)
        .layout(&records, &ExportScope::new(generated_at()))
        .expect("layout");
    let table = &layout.table;

    let wrapped = table.wrap_cells(&table.rows[0], Face::Regular);
    assert_eq!(wrapped[3], vec!["Pennyekart Free", "Registration"]);
    for (column, lines) in table.columns.iter().zip(&wrapped) {
        for line in lines {
            assert!(
                text_width_mm(line, table.font_size, Face::Regular)
                    <= column.width_mm - 2.0 * table.cell_padding_mm,
                "{line:?} overflows {}",
                column.label
            );
        }
    }

    let two_lines = table.row_height_mm(0);
    let one_line = table.row_height_mm(1);
    assert!((two_lines - one_line - table.line_height_mm()).abs() < 1e-4);

    let export = exporter(ReportKind::Registrations)
        .to_document(&records, &ExportScope::new(generated_at()))
        .expect("document renders");
    assert!(export.file.bytes.starts_with(b"%PDF"));
}

#[test]
fn ranged_document_export_names_both_boundaries() {
    let created = Utc
        .with_ymd_and_hms(2025, 7, 10, 5, 0, 0)
        .single()
        .expect("valid");
    let records = vec![verified("esp-1", created), verified("esp-2", created)];
    let range = DateRange::new(date(2025, 7, 1), date(2025, 7, 31)).expect("valid range");
    let scope = ExportScope::new(generated_at()).with_range(range);

    let export = exporter(ReportKind::VerifiedRegistrations)
        .to_document(&records, &scope)
        .expect("document renders");

    assert_eq!(
        export.file.file_name,
        "verified_registrations_2025-07-01_to_2025-07-31_2025-08-14.pdf"
    );
    assert!(export.file.bytes.starts_with(b"%PDF"));

    let range_line = export
        .layout
        .lines
        .iter()
        .find(|line| line.text.starts_with("Date Range:"))
        .expect("date range line present");
    assert_eq!(range_line.text, "Date Range: 1/7/2025 to 31/7/2025");
    assert!(export.layout.table.start_y_mm > range_line.y_mm);
    assert!(export.layout.table.start_y_mm > export.layout.last_line_y_mm());
    assert_eq!(export.layout.table.start_y_mm, 40.0);
    assert_eq!(export.layout.table.rows.len(), 2);
    assert_eq!(
        export.layout.table.header_fill,
        regtrack::export::Rgb(0x22, 0xC5, 0x5E)
    );

    let row = &export.layout.table.rows[0];
    assert_eq!(row[7], "field-officer");
    assert_eq!(row[8], "13/7/2025");
}

#[test]
fn verified_spreadsheet_swaps_status_for_decision_columns() {
    let created = Utc
        .with_ymd_and_hms(2025, 7, 10, 5, 0, 0)
        .single()
        .expect("valid");
    let records = vec![verified("esp-1", created), record("esp-2", created)];
    let verified_records = verified_only(&records);
    assert_eq!(verified_records.len(), 1);

    let exporter = exporter(ReportKind::VerifiedRegistrations);
    let sheet = exporter.spreadsheet(&verified_records);
    assert!(!sheet.columns.contains(&"Status"));
    assert_eq!(
        &sheet.columns[10..],
        [
            "Fee Paid",
            "Applied Date",
            "Approved Date",
            "Expires On",
            "Verified By",
            "Verified At",
        ]
    );
    let cells = sheet.rows[0].cells();
    assert_eq!(cells[12], "12/7/2025");
    assert_eq!(cells[15], "13/7/2025 10:30:00 am");

    let file = exporter
        .to_spreadsheet(&verified_records, &ExportScope::new(generated_at()))
        .expect("exports")
        .expect("non-empty export produces a file");
    assert_eq!(file.file_name, "verified_registrations_2025-08-14.csv");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = file.write_to(dir.path()).expect("writes");
    let written = std::fs::read_to_string(path).expect("reads back");
    assert!(written.starts_with("Customer ID,Name,Mobile Number"));
}

#[test]
fn date_range_filters_on_local_creation_day() {
    // 19:00 UTC on 31 July is 1 August in India.
    let late_evening = Utc
        .with_ymd_and_hms(2025, 7, 31, 19, 0, 0)
        .single()
        .expect("valid");
    let inside = Utc
        .with_ymd_and_hms(2025, 7, 15, 6, 0, 0)
        .single()
        .expect("valid");
    let records = vec![record("in", inside), record("out", late_evening)];
    let range = DateRange::new(date(2025, 7, 1), date(2025, 7, 31)).expect("valid range");

    let filtered = range.filter(&records, india_standard_time());

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].customer_id, "IN");
    assert!(matches!(
        DateRange::new(date(2025, 8, 1), date(2025, 7, 1)),
        Err(ExportError::InvalidDateRange { .. })
    ));
}
