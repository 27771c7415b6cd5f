//! Input validation for payment requests.
//!
//! All checks are pure; the only effect is the returned error. Validation
//! runs before any network call, so obviously bad input never reaches the
//! gateway.

use crate::error::ValidationError;
use crate::gateway::PaymentRequest;

/// Minimum digits in a normalized phone number.
pub const MIN_PHONE_LENGTH: usize = 9;

/// Maximum accepted description length.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Validate a payment request, failing on the first bad field.
///
/// Field order is phone, amount, description. Each check is also exposed
/// on its own for callers that want per-field feedback.
pub fn validate(request: &PaymentRequest) -> Result<(), ValidationError> {
    validate_phone(&request.from)?;
    validate_amount(&request.amount)?;
    validate_description(&request.description)?;
    Ok(())
}

/// Check a mobile money number.
///
/// Accepts common human-entered formats (spaces, hyphens, a leading plus)
/// for Cameroon numbers: after stripping separators the value must be at
/// least [`MIN_PHONE_LENGTH`] characters and start with "237" or "6".
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::PhoneEmpty);
    }

    let normalized: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+'))
        .collect();

    if normalized.len() < MIN_PHONE_LENGTH {
        return Err(ValidationError::PhoneTooShort {
            min: MIN_PHONE_LENGTH,
        });
    }

    if !normalized.starts_with("237") && !normalized.starts_with('6') {
        return Err(ValidationError::PhoneBadPrefix);
    }

    Ok(())
}

/// Check that an amount string parses to a finite positive number.
pub fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    if amount.is_empty() {
        return Err(ValidationError::AmountEmpty);
    }

    let value: f64 = amount
        .parse()
        .map_err(|_| ValidationError::AmountNotNumeric)?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }

    Ok(())
}

/// Check a payment description.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::DescriptionEmpty);
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}
