use super::*;

use access::types::ExpenseStatus;

fn expense(id: &str, date: &str) -> Expense {
    Expense {
        id: id.to_owned(),
        employee_id: "u1".to_owned(),
        employee_name: None,
        amount: 10.0,
        currency: "USD".to_owned(),
        category: "meals".to_owned(),
        description: format!("Expense {id}"),
        date: date.to_owned(),
        status: ExpenseStatus::Pending,
        merchant_name: None,
        policy_violation: false,
        violation_reason: None,
        created_at: None,
    }
}

#[test]
fn recent_expenses_are_newest_first_and_capped() {
    let list: Vec<Expense> = (1..=7).map(|day| expense(&day.to_string(), &format!("2025-01-0{day}"))).collect();
    let recent = recent_expenses(list);
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert_eq!(recent[0].id, "7");
    assert_eq!(recent[4].id, "3");
}

#[test]
fn stat_cards_follow_role_specific_fields() {
    let employee = DashboardStats {
        total_expenses: 4,
        pending_expenses: 1,
        approved_expenses: 2,
        total_amount: Some(1234.5),
        total_users: None,
    };
    let cards = stat_cards(&employee);
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[3], ("Total amount", "$1,234.50".to_owned()));

    let manager = DashboardStats {
        total_users: Some(12),
        total_amount: None,
        ..employee
    };
    assert_eq!(stat_cards(&manager)[3], ("Team members", "12".to_owned()));
}
