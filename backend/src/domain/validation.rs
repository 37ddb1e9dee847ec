//! Input rules for new cryptocurrency records.

use crate::domain::errors::NameValidationError;

/// Check a proposed name before it reaches storage.
///
/// A name is rejected when it is empty or when the whole string reads as a
/// signed 64-bit integer (`"123"`, `"-5"`, `"+7"`). Whitespace is not trimmed,
/// and digit strings too long for 64 bits are accepted as names.
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    if name.is_empty() {
        return Err(NameValidationError::Empty);
    }

    if name.parse::<i64>().is_ok() {
        return Err(NameValidationError::Numeric);
    }

    Ok(())
}
