use super::*;

#[test]
fn known_statuses_have_modifiers() {
    assert_eq!(badge_class(ExpenseStatus::Approved), "badge badge--approved");
    assert_eq!(badge_class(ExpenseStatus::Unknown), "badge");
}
