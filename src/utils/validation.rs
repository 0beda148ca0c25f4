use crate::utils::error::{BookingError, Result};
use rust_decimal::Decimal;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// ISO 4217 style: exactly three uppercase ASCII letters.
pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Currency code must be three uppercase letters".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_amount(field_name: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// The amount must be expressible in whole minor units (e.g. cents).
pub fn validate_minor_units(field_name: &str, amount: Decimal, minor_units: u32) -> Result<()> {
    if amount.normalize().scale() > minor_units {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: format!("Amount has more than {} decimal place(s)", minor_units),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_minor_units() {
        assert!(validate_minor_units("cars.daily_rate", Decimal::new(35000, 2), 2).is_ok());
        assert!(validate_minor_units("cars.daily_rate", Decimal::new(350500, 3), 2).is_ok());
        assert!(validate_minor_units("cars.daily_rate", Decimal::new(350005, 3), 2).is_err());
        assert!(validate_minor_units("cars.daily_rate", Decimal::new(3505, 1), 0).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("engine.currency", "MAD").is_ok());
        assert!(validate_currency_code("engine.currency", "EUR").is_ok());
        assert!(validate_currency_code("engine.currency", "mad").is_err());
        assert!(validate_currency_code("engine.currency", "DIRHAM").is_err());
        assert!(validate_currency_code("engine.currency", "").is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("cars.daily_rate", Decimal::new(4500, 2)).is_ok());
        assert!(validate_positive_amount("cars.daily_rate", Decimal::ZERO).is_err());
        assert!(validate_positive_amount("cars.daily_rate", Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("engine.minor_units", 2u32, 0, 4).is_ok());
        assert!(validate_range("engine.minor_units", 5u32, 0, 4).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("search.limit", 9, 1).is_ok());
        assert!(validate_positive_number("search.limit", 0, 1).is_err());
    }
}
