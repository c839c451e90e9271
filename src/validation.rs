// Custom validation rules shared by request DTOs

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"))
}

/// Validates that a phone number is exactly 10 digits
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone_regex().is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_must_be_ten_digits"))
    }
}

/// Validates that a product price is strictly positive
pub fn validate_price(price: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if price > &rust_decimal::Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("price_must_be_positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ten_digit_phone_accepted() {
        assert!(validate_phone("1234567890").is_ok());
    }

    #[test]
    fn malformed_phones_rejected() {
        for phone in ["123456789", "12345678901", "12345abcde", "", "+1234567890"] {
            assert!(validate_phone(phone).is_err(), "{phone:?} should be rejected");
        }
    }

    #[test]
    fn positive_price_accepted() {
        assert!(validate_price(&dec!(4.50)).is_ok());
    }

    #[test]
    fn zero_and_negative_prices_rejected() {
        assert!(validate_price(&dec!(0)).is_err());
        assert!(validate_price(&dec!(-1.25)).is_err());
    }
}
