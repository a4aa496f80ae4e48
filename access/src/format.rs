//! Display formatting for amounts, dates and names.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;
use time::macros::format_description;

use crate::expenses::parse_timestamp;
use crate::types::ExpenseStatus;

/// Format an amount with its currency symbol and thousands separators,
/// e.g. `$1,234.50`. Unknown currencies are prefixed with their code.
#[must_use]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let currency = currency.trim().to_ascii_uppercase();
    match currency_symbol(&currency) {
        Some(symbol) => format!("{sign}{symbol}{whole}.{fraction:02}"),
        None => format!("{sign}{currency} {whole}.{fraction:02}"),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "" | "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" => Some("¥"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "SGD" => Some("SGD "),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a backend timestamp as `Jan 5, 2025`; unparsable input is returned as-is.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let short = format_description!("[month repr:short] [day padding:none], [year]");
    parse_timestamp(raw)
        .and_then(|ts| ts.format(&short).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// `YYYY-MM-DD`: the value of a date input and the date column of exports.
#[must_use]
pub fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Up to two uppercase initials for an avatar, `U` for an empty name.
#[must_use]
pub fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if out.is_empty() { "U".to_owned() } else { out }
}

/// Human label for an expense status badge.
#[must_use]
pub fn status_label(status: ExpenseStatus) -> &'static str {
    match status {
        ExpenseStatus::Pending => "Pending",
        ExpenseStatus::Approved => "Approved",
        ExpenseStatus::Rejected => "Rejected",
        ExpenseStatus::Reimbursed => "Reimbursed",
        ExpenseStatus::Unknown => "Unknown",
    }
}
