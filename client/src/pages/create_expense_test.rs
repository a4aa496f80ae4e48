use super::*;

fn category(name: &str, requires_receipt: bool) -> Category {
    Category {
        name: name.to_owned(),
        label: name.to_uppercase(),
        requires_receipt,
    }
}

#[test]
fn receipt_hint_follows_selected_category() {
    let list = vec![category("meals", false), category("travel", true)];
    assert!(needs_receipt(&list, "travel"));
    assert!(!needs_receipt(&list, "meals"));
    assert!(!needs_receipt(&list, ""));
}

#[test]
fn default_currency_is_usd() {
    assert_eq!(CURRENCIES[0], "USD");
}

#[test]
fn form_values_validate_into_a_request() {
    let expense = validate_new_expense("$1,250.00", "USD", "travel", "Flight", "2025-03-01").unwrap();
    assert!((expense.amount - 1250.0).abs() < f64::EPSILON);
    assert_eq!(
        validate_new_expense("-3", "USD", "travel", "Flight", "2025-03-01").unwrap_err().to_string(),
        "Please enter a valid amount"
    );
}
