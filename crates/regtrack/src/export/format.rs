//! en-IN style rendering for report cells and deterministic file names.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::scope::DateRange;

const ISO_DATE: &str = "%Y-%m-%d";

/// `d/m/yyyy` in the display offset.
pub fn locale_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    calendar_date(timestamp.with_timezone(&offset).date_naive())
}

/// `d/m/yyyy h:mm:ss am` in the display offset.
pub fn locale_date_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = timestamp.with_timezone(&offset);
    format!(
        "{} {}",
        calendar_date(local.date_naive()),
        local.format("%-I:%M:%S %P")
    )
}

pub fn calendar_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Plain amount for spreadsheet cells: `300`, `250.5`.
pub fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Amount with the rupee glyph for document cells.
pub fn currency(value: Decimal) -> String {
    format!("₹{}", amount(value))
}

/// `<stem>[_<start>_to_<end>]_<today>.<extension>`, dates in ISO form.
///
/// `today` is the UTC calendar date of the export.
pub fn file_name(
    stem: &str,
    range: Option<&DateRange>,
    today: NaiveDate,
    extension: &str,
) -> String {
    let range_suffix = range
        .map(|range| format!("_{}_to_{}", iso_date(range.start()), iso_date(range.end())))
        .unwrap_or_default();
    format!("{stem}{range_suffix}_{}.{extension}", iso_date(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::india_standard_time;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn dates_render_in_display_offset() {
        // 20:00 UTC is already the next morning in India.
        let instant = Utc
            .with_ymd_and_hms(2025, 1, 4, 20, 0, 0)
            .single()
            .expect("valid");
        assert_eq!(locale_date(instant, india_standard_time()), "5/1/2025");
        assert_eq!(
            locale_date_time(instant, india_standard_time()),
            "5/1/2025 1:30:00 am"
        );
    }

    #[test]
    fn amounts_drop_trailing_zeroes() {
        assert_eq!(amount(dec!(300.00)), "300");
        assert_eq!(amount(dec!(250.50)), "250.5");
        assert_eq!(currency(dec!(300)), "₹300");
    }

    #[test]
    fn file_name_places_range_before_export_date() {
        let today = date(2025, 6, 1);
        assert_eq!(
            file_name("registrations", None, today, "pdf"),
            "registrations_2025-06-01.pdf"
        );

        let range = DateRange::new(date(2025, 5, 1), date(2025, 5, 31)).expect("valid range");
        assert_eq!(
            file_name("verified_registrations", Some(&range), today, "csv"),
            "verified_registrations_2025-05-01_to_2025-05-31_2025-06-01.csv"
        );
    }
}
