//! Field-level checks shared by the create / update DTOs.
//!
//! The functions returning [`ValidationError`] plug into
//! `#[validate(custom(function = ...))]` on the DTO structs.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Reject empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Accept 7 to 15 digits with an optional leading `+`.
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let ok = (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());
    if !ok {
        return Err(ValidationError::new("phone").with_message(Cow::Owned(format!(
            "must be {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits with an optional leading '+'"
        ))));
    }
    Ok(())
}

/// Flatten validator output into one stable, human-readable line.
///
/// Fields are sorted so the message does not depend on hash order.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => Some(
                errs.iter()
                    .map(|e| match &e.message {
                        Some(msg) => format!("{field} {msg}"),
                        None => format!("{field} is invalid ({})", e.code),
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
