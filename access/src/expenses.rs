//! In-memory filtering, sorting and totals for expense lists.
//!
//! Lists are small and already scoped by the backend; these helpers only
//! narrow and order what a page shows.

#[cfg(test)]
#[path = "expenses_test.rs"]
mod expenses_test;

use std::cmp::Ordering;
use std::str::FromStr;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime};

use crate::types::{Expense, ExpenseStatus};

/// Parse a backend timestamp: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (taken as UTC), or a bare date.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    if let Ok(ts) = PrimitiveDateTime::parse(raw, &naive) {
        return Some(ts.assume_utc());
    }
    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &date_only).ok().map(|date| date.midnight().assume_utc())
}

/// When an expense happened for list purposes: creation time, else its date.
fn timestamp_of(expense: &Expense) -> Option<OffsetDateTime> {
    expense
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| parse_timestamp(&expense.date))
}

/// Relative window for the "date range" filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateRange {
    /// Earliest instant inside the window ending at `now`.
    #[must_use]
    pub fn cutoff(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Self::All => None,
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => Some(months_back(now, 1)),
            Self::Quarter => Some(months_back(now, 3)),
            Self::Year => Some(months_back(now, 12)),
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

/// Same wall-clock time `months` calendar months earlier, clamping the day to
/// the target month's length.
fn months_back(now: OffsetDateTime, months: i32) -> OffsetDateTime {
    let date = now.date();
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months;
    let year = index.div_euclid(12);
    let Some(month) = u8::try_from(index.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
    else {
        return now;
    };
    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .map_or(now, |shifted| now.replace_date(shifted))
}

/// Criteria a listed expense must meet. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of description, category, merchant or employee.
    pub search: String,
    pub status: Option<ExpenseStatus>,
    pub category: Option<String>,
    pub employee_id: Option<String>,
    /// Keep only expenses at or after this instant.
    pub since: Option<OffsetDateTime>,
}

impl ExpenseFilter {
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystacks = [
                Some(expense.description.as_str()),
                Some(expense.category.as_str()),
                expense.merchant_name.as_deref(),
                expense.employee_name.as_deref(),
            ];
            if !haystacks.into_iter().flatten().any(|text| text.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        if self.status.is_some_and(|status| status != expense.status) {
            return false;
        }
        if self.category.as_deref().is_some_and(|category| category != expense.category) {
            return false;
        }
        if self.employee_id.as_deref().is_some_and(|id| id != expense.employee_id) {
            return false;
        }
        if let Some(since) = self.since {
            return timestamp_of(expense).is_some_and(|ts| ts >= since);
        }
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Employee,
    Status,
    Category,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Parse a combined select value such as `amount-asc`.
#[must_use]
pub fn parse_sort(value: &str) -> Option<(SortKey, SortOrder)> {
    let (key, order) = value.split_once('-')?;
    let key = match key {
        "date" => SortKey::Date,
        "amount" => SortKey::Amount,
        "employee" => SortKey::Employee,
        "status" => SortKey::Status,
        "category" => SortKey::Category,
        _ => return None,
    };
    let order = match order {
        "asc" => SortOrder::Asc,
        "desc" => SortOrder::Desc,
        _ => return None,
    };
    Some((key, order))
}

fn compare(a: &Expense, b: &Expense, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => timestamp_of(a).cmp(&timestamp_of(b)),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Employee => a.employee_name.as_deref().unwrap_or_default().cmp(b.employee_name.as_deref().unwrap_or_default()),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::Category => a.category.cmp(&b.category),
    }
}

/// Stable sort; ties keep their incoming order in both directions.
pub fn sort_expenses(expenses: &mut [Expense], key: SortKey, order: SortOrder) {
    expenses.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b, key),
        SortOrder::Desc => compare(b, a, key),
    });
}

/// Filter then sort into a new list.
#[must_use]
pub fn apply(expenses: &[Expense], filter: &ExpenseFilter, key: SortKey, order: SortOrder) -> Vec<Expense> {
    let mut out: Vec<Expense> = expenses.iter().filter(|e| filter.matches(e)).cloned().collect();
    sort_expenses(&mut out, key, order);
    out
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn unique_categories(expenses: &[Expense]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for expense in expenses {
        if !seen.contains(&expense.category) {
            seen.push(expense.category.clone());
        }
    }
    seen
}

/// Counts and amounts per status for a team overview.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TeamStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_amount: f64,
    pub pending_amount: f64,
    pub approved_amount: f64,
}

impl TeamStats {
    #[must_use]
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        expenses.iter().fold(Self::default(), |mut stats, expense| {
            stats.total += 1;
            stats.total_amount += expense.amount;
            match expense.status {
                ExpenseStatus::Pending => {
                    stats.pending += 1;
                    stats.pending_amount += expense.amount;
                }
                ExpenseStatus::Approved => {
                    stats.approved += 1;
                    stats.approved_amount += expense.amount;
                }
                ExpenseStatus::Rejected => stats.rejected += 1,
                ExpenseStatus::Reimbursed | ExpenseStatus::Unknown => {}
            }
            stats
        })
    }

    /// Mean amount, zero for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_amount(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.total_amount / self.total as f64
        }
    }
}
