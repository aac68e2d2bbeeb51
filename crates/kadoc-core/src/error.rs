use thiserror::Error;

use crate::validate::FieldError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("complexity {0} is outside 1..=5")]
    InvalidComplexity(u8),

    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
