use bigdecimal::BigDecimal;
use serde::Serialize;
use std::fmt;

pub const CURRENCY_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

/// Currency codes are exactly 3 ASCII letters. Lowercase input is accepted
/// and normalized to uppercase; any other length or character set fails.
pub fn validate_currency(currency: &str) -> Result<String, ValidationError> {
    let currency = currency.trim();
    validate_required("currency", currency)?;

    if currency.len() != CURRENCY_LEN {
        return Err(ValidationError::new(
            "currency",
            format!("must be exactly {} characters", CURRENCY_LEN),
        ));
    }

    if !currency.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ValidationError::new(
            "currency",
            "must contain only letters",
        ));
    }

    Ok(currency.to_ascii_uppercase())
}

pub fn validate_positive_amount(amount: &BigDecimal) -> ValidationResult {
    if amount <= &BigDecimal::from(0) {
        return Err(ValidationError::new("amount", "must be greater than zero"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn validates_required_field() {
        assert!(validate_required("field", "value").is_ok());
        assert!(validate_required("field", "").is_err());
        assert!(validate_required("field", "   ").is_err());
    }

    #[test]
    fn validates_currency_length() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("USDT").is_err());
        assert!(validate_currency("").is_err());
    }

    #[test]
    fn uppercases_lowercase_currency() {
        assert_eq!(validate_currency("usd").unwrap(), "USD");
        assert_eq!(validate_currency("Eur").unwrap(), "EUR");
        assert_eq!(validate_currency("GBP").unwrap(), "GBP");
    }

    #[test]
    fn rejects_non_alphabetic_currency() {
        assert!(validate_currency("U5D").is_err());
        assert!(validate_currency("U D").is_err());
        assert!(validate_currency("U$D").is_err());
    }

    #[test]
    fn validates_positive_amount() {
        let positive = BigDecimal::from_str("10.50").expect("valid decimal");
        let zero = BigDecimal::from(0);
        let negative = BigDecimal::from_str("-5.25").expect("valid decimal");

        assert!(validate_positive_amount(&positive).is_ok());
        assert!(validate_positive_amount(&zero).is_err());
        assert!(validate_positive_amount(&negative).is_err());
    }
}
