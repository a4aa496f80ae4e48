//! Client-side form checks run before any request is sent.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use rand::Rng;

use crate::error::ValidationError;
use crate::types::{LoginRequest, NewExpense, NewUser, RegisterRequest, Role};

/// Minimum [`password_strength`] accepted for accounts created by an admin.
pub const MIN_PASSWORD_STRENGTH: u8 = 3;

/// Length of a [`generate_password`] result.
pub const GENERATED_PASSWORD_LEN: usize = 12;

const PASSWORD_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@#$%&*!";

/// `local@domain.tld` with no whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Score 0..=5: one point each for length >= 8, an uppercase letter, a
/// lowercase letter, a digit, and any other character.
#[must_use]
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.into_iter().map(u8::from).sum()
}

/// Label shown next to the strength meter.
#[must_use]
pub fn strength_label(score: u8) -> &'static str {
    match score {
        0 | 1 => "Weak",
        2 => "Fair",
        3 => "Good",
        4 => "Strong",
        _ => "Very strong",
    }
}

/// Temporary password for a new account, offered by the admin form.
///
/// Draws are repeated until the result reaches [`MIN_PASSWORD_STRENGTH`], so
/// the output always passes [`validate_new_user`].
#[must_use]
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    loop {
        let candidate: String = (0..GENERATED_PASSWORD_LEN)
            .map(|_| {
                let idx = rng.random_range(0..PASSWORD_ALPHABET.len());
                char::from(PASSWORD_ALPHABET[idx])
            })
            .collect();
        if password_strength(&candidate) >= MIN_PASSWORD_STRENGTH {
            return candidate;
        }
    }
}

fn required(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField)
    } else {
        Ok(value.to_owned())
    }
}

/// Both fields are required; the password is kept verbatim.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = required(email)?;
    if password.is_empty() {
        return Err(ValidationError::MissingField);
    }
    Ok(LoginRequest {
        email,
        password: password.to_owned(),
    })
}

/// Check a registration form. A blank company name is sent as absent.
///
/// # Errors
///
/// Returns the first failing check: missing field, then email shape.
pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    company_name: &str,
    country: &str,
) -> Result<RegisterRequest, ValidationError> {
    let full_name = required(full_name)?;
    let email = required(email)?;
    if password.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    let company_name = company_name.trim();
    Ok(RegisterRequest {
        email,
        password: password.to_owned(),
        full_name,
        company_name: (!company_name.is_empty()).then(|| company_name.to_owned()),
        country: required(country).unwrap_or_else(|_| "US".to_owned()),
    })
}

/// Check an admin "create user" form.
///
/// # Errors
///
/// Returns the first failing check: missing field, weak password, then email
/// shape.
pub fn validate_new_user(
    full_name: &str,
    email: &str,
    password: &str,
    role: Option<Role>,
    manager_id: Option<&str>,
) -> Result<NewUser, ValidationError> {
    let full_name = required(full_name)?;
    let email = required(email)?;
    let role = role.ok_or(ValidationError::MissingField)?;
    if password.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if password_strength(password) < MIN_PASSWORD_STRENGTH {
        return Err(ValidationError::WeakPassword);
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    let manager_id = manager_id
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != "none")
        .map(str::to_owned);
    Ok(NewUser {
        full_name,
        email,
        password: password.to_owned(),
        role,
        manager_id,
    })
}

/// Check a new-expense form. `amount` must parse to a positive finite number.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for blank fields and
/// [`ValidationError::InvalidAmount`] for a non-positive or unparsable amount.
pub fn validate_new_expense(
    amount: &str,
    currency: &str,
    category: &str,
    description: &str,
    date: &str,
) -> Result<NewExpense, ValidationError> {
    let amount_text = required(amount)?;
    let category = required(category)?;
    let description = required(description)?;
    let date = required(date)?;
    let amount = amount_text
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    let currency = currency.trim();
    Ok(NewExpense {
        amount,
        currency: if currency.is_empty() { "USD".to_owned() } else { currency.to_ascii_uppercase() },
        category,
        description,
        date,
    })
}
