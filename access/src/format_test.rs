use super::*;

#[test]
fn currency_groups_thousands_and_pads_cents() {
    assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
    assert_eq!(format_currency(0.0, "usd"), "$0.00");
    assert_eq!(format_currency(1_000_000.0, "EUR"), "€1,000,000.00");
    assert_eq!(format_currency(999.999, "GBP"), "£1,000.00");
}

#[test]
fn currency_handles_negative_and_unknown_codes() {
    assert_eq!(format_currency(-12.3, "USD"), "-$12.30");
    assert_eq!(format_currency(5.0, "chf"), "CHF 5.00");
}

#[test]
fn date_formats_short_month() {
    assert_eq!(format_date("2025-01-05T10:00:00Z"), "Jan 5, 2025");
    assert_eq!(format_date("2024-12-24"), "Dec 24, 2024");
    assert_eq!(format_date("not a date"), "not a date");
}

#[test]
fn initials_take_first_two_words() {
    assert_eq!(initials("ada king lovelace"), "AK");
    assert_eq!(initials("Bob"), "B");
    assert_eq!(initials("   "), "U");
}

#[test]
fn status_labels_are_capitalized() {
    assert_eq!(status_label(ExpenseStatus::Reimbursed), "Reimbursed");
}

#[test]
fn iso_date_pads_month_and_day() {
    assert_eq!(iso_date(time::macros::date!(2025-03-07)), "2025-03-07");
}
