//! Bridges `validator` derive checks into [`AppError`].

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use validator::{Validate, ValidationError};

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("may not be blank".into()));
    }
    Ok(())
}

/// Run the derived field checks and flatten failures into a single
/// validation error, fields in alphabetical order.
pub fn check<T: Validate>(payload: &T) -> AppResult<()> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .map(|(field, errs)| {
            let reason = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field}: {reason}")
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(AppError::validation(message))
}
