//! CSV export of expense listings.
//!
//! Rows are written in the order given, so callers export exactly what the
//! list shows after filtering and sorting.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use csv::Writer;

use crate::expenses::parse_timestamp;
use crate::format::{iso_date, status_label};
use crate::types::Expense;

pub const EXPENSE_CSV_HEADER: [&str; 6] = ["Date", "Employee", "Description", "Category", "Amount", "Status"];

/// Render `expenses` as CSV with a header row.
///
/// # Errors
///
/// Returns the writer's error if a record cannot be encoded.
pub fn expenses_csv(expenses: &[Expense]) -> Result<String, csv::Error> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(EXPENSE_CSV_HEADER)?;
    for expense in expenses {
        let date = parse_timestamp(&expense.date).map_or_else(|| expense.date.clone(), |ts| iso_date(ts.date()));
        let amount = format!("{:.2}", expense.amount);
        wtr.write_record([
            date.as_str(),
            expense.employee_name.as_deref().unwrap_or("Unknown"),
            expense.description.as_str(),
            expense.category.as_str(),
            amount.as_str(),
            status_label(expense.status),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name offered for a team export taken on `today` (`YYYY-MM-DD`).
#[must_use]
pub fn team_export_file_name(today: &str) -> String {
    format!("team-expenses-{today}.csv")
}
