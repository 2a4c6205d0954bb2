use garde::Validate;

use crate::error::{AppError, Result};

/// Runs the garde rules declared on a request payload.
///
/// # Returns
///
/// The payload unchanged, or `AppError::Validation` carrying the report.
pub fn validated<T: Validate<Context = ()>>(payload: T) -> Result<T> {
    payload
        .validate()
        .map_err(|report| AppError::Validation(report.to_string().trim().to_string()))?;
    Ok(payload)
}
