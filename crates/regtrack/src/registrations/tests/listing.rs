use super::common::*;
use crate::registrations::domain::{Registration, RegistrationStatus};
use crate::registrations::listing::RegistrationQuery;

fn customer_ids(records: &[Registration]) -> Vec<&str> {
    records.iter().map(|record| record.customer_id.as_str()).collect()
}

#[test]
fn empty_query_lists_everything_newest_first() {
    let records = vec![
        registration("old", 9),
        registration("new", 1),
        registration("mid", 4),
    ];

    let listed = RegistrationQuery::new().apply(&records);

    assert_eq!(customer_ids(&listed), vec!["ESPnew", "ESPmid", "ESPold"]);
}

#[test]
fn search_ignores_case_across_name_mobile_and_customer_id() {
    let mut by_mobile = registration("two", 2);
    by_mobile.mobile_number = "9995551234".to_string();
    let records = vec![registration("one", 3), by_mobile, registration("three", 1)];

    let by_name = RegistrationQuery::new().search("APPLICANT ONE").apply(&records);
    assert_eq!(customer_ids(&by_name), vec!["ESPone"]);

    let by_phone = RegistrationQuery::new().search("555").apply(&records);
    assert_eq!(customer_ids(&by_phone), vec!["ESPtwo"]);

    let by_id = RegistrationQuery::new().search("espthree").apply(&records);
    assert_eq!(customer_ids(&by_id), vec!["ESPthree"]);
}

#[test]
fn blank_search_term_matches_everything() {
    let records = vec![registration("one", 3), registration("two", 2)];
    assert_eq!(RegistrationQuery::new().search("   ").apply(&records).len(), 2);
}

#[test]
fn status_filter_combines_with_search() {
    let records = vec![
        registration("one", 3),
        with_status(registration("two", 2), RegistrationStatus::Approved),
        with_status(registration("three", 1), RegistrationStatus::Rejected),
    ];

    let approved = RegistrationQuery::new()
        .status(RegistrationStatus::Approved)
        .apply(&records);
    assert_eq!(customer_ids(&approved), vec!["ESPtwo"]);

    let none = RegistrationQuery::new()
        .status(RegistrationStatus::Pending)
        .search("three")
        .apply(&records);
    assert!(none.is_empty());
}
