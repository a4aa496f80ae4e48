use super::*;

use time::macros::datetime;

fn expense(id: &str, amount: f64, status: ExpenseStatus, category: &str, created_at: &str) -> Expense {
    Expense {
        id: id.to_owned(),
        employee_id: format!("emp-{id}"),
        employee_name: Some(format!("Employee {id}")),
        amount,
        currency: "USD".to_owned(),
        category: category.to_owned(),
        description: format!("Expense {id}"),
        date: "2025-01-01".to_owned(),
        status,
        merchant_name: None,
        policy_violation: false,
        violation_reason: None,
        created_at: Some(created_at.to_owned()),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense("a", 40.0, ExpenseStatus::Pending, "meals", "2025-03-10T09:00:00Z"),
        expense("b", 250.0, ExpenseStatus::Approved, "travel", "2025-02-01T12:00:00.500000"),
        expense("c", 15.5, ExpenseStatus::Rejected, "meals", "2024-12-24"),
    ]
}

fn ids(expenses: &[Expense]) -> Vec<&str> {
    expenses.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn parse_timestamp_accepts_backend_shapes() {
    assert_eq!(parse_timestamp("2025-03-10T09:00:00Z"), Some(datetime!(2025-03-10 09:00:00 UTC)));
    assert_eq!(parse_timestamp("2025-03-10T09:00:00+02:00"), Some(datetime!(2025-03-10 07:00:00 UTC)));
    assert_eq!(parse_timestamp("2025-03-10T09:00:00.123456"), Some(datetime!(2025-03-10 09:00:00.123456 UTC)));
    assert_eq!(parse_timestamp("2025-03-10"), Some(datetime!(2025-03-10 00:00:00 UTC)));
    assert_eq!(parse_timestamp("yesterday"), None);
}

#[test]
fn empty_filter_matches_everything() {
    let all = sample();
    assert_eq!(apply(&all, &ExpenseFilter::default(), SortKey::Amount, SortOrder::Asc).len(), 3);
}

#[test]
fn search_is_case_insensitive_over_text_fields() {
    let filter = ExpenseFilter { search: "TRAVEL".to_owned(), ..ExpenseFilter::default() };
    assert_eq!(ids(&apply(&sample(), &filter, SortKey::Date, SortOrder::Desc)), vec!["b"]);

    let filter = ExpenseFilter { search: "employee c".to_owned(), ..ExpenseFilter::default() };
    assert_eq!(ids(&apply(&sample(), &filter, SortKey::Date, SortOrder::Desc)), vec!["c"]);
}

#[test]
fn status_category_and_employee_filters_combine() {
    let filter = ExpenseFilter {
        category: Some("meals".to_owned()),
        status: Some(ExpenseStatus::Pending),
        ..ExpenseFilter::default()
    };
    assert_eq!(ids(&apply(&sample(), &filter, SortKey::Date, SortOrder::Desc)), vec!["a"]);

    let filter = ExpenseFilter { employee_id: Some("emp-c".to_owned()), ..ExpenseFilter::default() };
    assert_eq!(ids(&apply(&sample(), &filter, SortKey::Date, SortOrder::Desc)), vec!["c"]);
}

#[test]
fn since_excludes_older_and_unparsable() {
    let mut all = sample();
    all[0].created_at = Some("garbage".to_owned());
    all[0].date = "also garbage".to_owned();
    let filter = ExpenseFilter {
        since: Some(datetime!(2025-01-15 00:00:00 UTC)),
        ..ExpenseFilter::default()
    };
    assert_eq!(ids(&apply(&all, &filter, SortKey::Date, SortOrder::Desc)), vec!["b"]);
}

#[test]
fn sorting_by_each_key() {
    let all = sample();
    let f = ExpenseFilter::default();
    assert_eq!(ids(&apply(&all, &f, SortKey::Date, SortOrder::Desc)), vec!["a", "b", "c"]);
    assert_eq!(ids(&apply(&all, &f, SortKey::Date, SortOrder::Asc)), vec!["c", "b", "a"]);
    assert_eq!(ids(&apply(&all, &f, SortKey::Amount, SortOrder::Desc)), vec!["b", "a", "c"]);
    assert_eq!(ids(&apply(&all, &f, SortKey::Status, SortOrder::Asc)), vec!["b", "a", "c"]);
    assert_eq!(ids(&apply(&all, &f, SortKey::Category, SortOrder::Asc)), vec!["a", "c", "b"]);
    assert_eq!(ids(&apply(&all, &f, SortKey::Employee, SortOrder::Desc)), vec!["c", "b", "a"]);
}

#[test]
fn parse_sort_reads_select_values() {
    assert_eq!(parse_sort("amount-asc"), Some((SortKey::Amount, SortOrder::Asc)));
    assert_eq!(parse_sort("date-desc"), Some((SortKey::Date, SortOrder::Desc)));
    assert_eq!(parse_sort("amount"), None);
    assert_eq!(parse_sort("size-asc"), None);
}

#[test]
fn date_range_cutoffs_use_calendar_months() {
    let now = datetime!(2025-03-31 10:00:00 UTC);
    assert_eq!(DateRange::All.cutoff(now), None);
    assert_eq!(DateRange::Week.cutoff(now), Some(datetime!(2025-03-24 10:00:00 UTC)));
    assert_eq!(DateRange::Month.cutoff(now), Some(datetime!(2025-02-28 10:00:00 UTC)));
    assert_eq!(DateRange::Quarter.cutoff(now), Some(datetime!(2024-12-31 10:00:00 UTC)));
    assert_eq!(DateRange::Year.cutoff(now), Some(datetime!(2024-03-31 10:00:00 UTC)));
    assert_eq!("quarter".parse::<DateRange>(), Ok(DateRange::Quarter));
}

#[test]
fn unique_categories_keep_first_seen_order() {
    assert_eq!(unique_categories(&sample()), vec!["meals".to_owned(), "travel".to_owned()]);
}

#[test]
fn team_stats_sum_by_status() {
    let stats = TeamStats::from_expenses(&sample());
    assert_eq!(stats.total, 3);
    assert_eq!((stats.pending, stats.approved, stats.rejected), (1, 1, 1));
    assert!((stats.total_amount - 305.5).abs() < 1e-9);
    assert!((stats.pending_amount - 40.0).abs() < 1e-9);
    assert!((stats.approved_amount - 250.0).abs() < 1e-9);
    assert_eq!(TeamStats::default().average_amount(), 0.0);
}
