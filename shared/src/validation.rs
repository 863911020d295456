//! Client-side form validation.
//!
//! Forms are checked before any request is issued; failures are collected
//! per field so they can be rendered inline next to the offending input.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern"));

// optional leading +, then 9-15 digits with optional single spaces or dashes between them
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9](?:[ -]?[0-9]){8,14}$").expect("phone pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter a valid phone number")]
    InvalidPhone,
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must be a date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
    #[error("End date must be after the start date")]
    EndBeforeStart,
}

/// Validation failures keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, ValidationError)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, error: ValidationError) {
        self.errors.push((field, error));
    }

    /// Record the error of `result` under `field` and pass the value through
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    /// First error message for `field`
    pub fn get(&self, field: &str) -> Option<String> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, error)| error.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, ValidationError)> {
        self.errors.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|(_, e)| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Trimmed, non-empty value
pub fn required(label: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(label))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trimmed value, `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn email(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if EMAIL_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn phone(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("Phone number"));
    }
    if PHONE_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Blank is accepted; anything else must be a valid phone number
pub fn optional_phone(value: &str) -> Result<Option<String>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        phone(value).map(Some)
    }
}

pub fn non_negative_count(label: &'static str, value: &str) -> Result<u32, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(ValidationError::Negative(label)),
        Ok(n) => u32::try_from(n).map_err(|_| ValidationError::NotANumber(label)),
        Err(_) => Err(ValidationError::NotANumber(label)),
    }
}

pub fn non_negative_amount(label: &'static str, value: &str) -> Result<f64, ValidationError> {
    let amount = parse_amount(label, value)?;
    if amount < 0.0 {
        Err(ValidationError::Negative(label))
    } else {
        Ok(amount)
    }
}

pub fn positive_amount(label: &'static str, value: &str) -> Result<f64, ValidationError> {
    let amount = parse_amount(label, value)?;
    if amount <= 0.0 {
        Err(ValidationError::NotPositive(label))
    } else {
        Ok(amount)
    }
}

fn parse_amount(label: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    match trimmed.replace(',', "").parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::NotANumber(label)),
    }
}

pub fn date(label: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(email("admin@oims.org").is_ok());
        assert!(email("first.last+tag@sub.example.co").is_ok());
        assert_eq!(email("no-at-sign"), Err(ValidationError::InvalidEmail));
        assert_eq!(email("a@b"), Err(ValidationError::InvalidEmail));
        assert_eq!(email("   "), Err(ValidationError::Required("Email")));
    }

    #[test]
    fn test_phone() {
        assert!(phone("+251911234567").is_ok());
        assert!(phone("0911 234 567").is_ok());
        assert!(phone("0911-234-567").is_ok());
        assert_eq!(phone("12345"), Err(ValidationError::InvalidPhone));
        assert_eq!(phone("09x1234567"), Err(ValidationError::InvalidPhone));
        assert_eq!(optional_phone(""), Ok(None));
    }

    #[test]
    fn test_counts_and_amounts() {
        assert_eq!(non_negative_count("Quantity", "12"), Ok(12));
        assert_eq!(non_negative_count("Quantity", "-1"), Err(ValidationError::Negative("Quantity")));
        assert_eq!(non_negative_count("Quantity", "ten"), Err(ValidationError::NotANumber("Quantity")));
        assert_eq!(positive_amount("Goal", "1,500.50"), Ok(1500.5));
        assert_eq!(positive_amount("Goal", "0"), Err(ValidationError::NotPositive("Goal")));
        assert_eq!(non_negative_amount("Price", "0"), Ok(0.0));
    }

    #[test]
    fn test_field_errors_collects_per_field() {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", required("Name", "  "));
        let mail = errors.check("email", email("ok@example.com"));
        assert!(name.is_none());
        assert_eq!(mail.as_deref(), Some("ok@example.com"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name").as_deref(), Some("Name is required"));
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_date() {
        assert!(date("Start date", "2025-01-31").is_ok());
        assert_eq!(date("Start date", "31/01/2025"), Err(ValidationError::InvalidDate("Start date")));
    }
}
