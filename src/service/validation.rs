//! Name validation shared by create and update.

use crate::error::AppError;
use crate::model::NAME_MAX_CHARS;

/// Returns the trimmed name, or a validation error when it is absent, blank, or too long.
pub fn validate_name(name: Option<&str>) -> Result<String, AppError> {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "name must be at most {} characters",
            NAME_MAX_CHARS
        )));
    }
    Ok(trimmed.to_string())
}
