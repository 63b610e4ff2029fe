use serde::Deserialize;

use crate::error::AppError;

/// Request body for binding an entry to a rank (prediction or result).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AssignRankRequest {
    /// Rank to assign, 1 = best. Must be within 1..=number of entries.
    #[schema(example = 1)]
    pub rank: i32,
}

/// Validate a required text field (1-`max` Unicode characters after trimming).
pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional text field; present values may not exceed `max` characters.
pub fn validate_optional_text(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    if let Some(value) = value
        && value.trim().chars().count() > max
    {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Trim an optional string, mapping blank values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
