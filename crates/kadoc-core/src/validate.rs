//! Create-payload validation shared by the front-end forms and the server.

use thiserror::Error;

use crate::error::CoreError;
use crate::models::article::NewArticle;
use crate::models::snippet::{Complexity, NewSnippet};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn new_snippet(snippet: &NewSnippet) -> Result<(), CoreError> {
    let mut errors = Vec::new();

    if snippet.title.trim().is_empty() {
        errors.push(FieldError::new("title", "is required"));
    }
    if snippet.language.trim().is_empty() {
        errors.push(FieldError::new("language", "is required"));
    }
    if snippet.code.trim().is_empty() {
        errors.push(FieldError::new("code", "is required"));
    }
    if Complexity::new(snippet.complexity).is_err() {
        errors.push(FieldError::new(
            "complexity",
            format!(
                "{} is outside {}..={}",
                snippet.complexity,
                Complexity::MIN,
                Complexity::MAX
            ),
        ));
    }
    for reference in &snippet.references {
        if let Err(message) = check_reference(reference) {
            errors.push(FieldError::new("references", message));
        }
    }

    finish(errors)
}

pub fn new_article(article: &NewArticle) -> Result<(), CoreError> {
    let mut errors = Vec::new();

    if article.title.trim().is_empty() {
        errors.push(FieldError::new("title", "is required"));
    }
    if article.content.trim().is_empty() {
        errors.push(FieldError::new("content", "is required"));
    }

    finish(errors)
}

fn check_reference(reference: &str) -> Result<(), String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err("blank reference".to_string());
    }
    let parsed =
        url::Url::parse(trimmed).map_err(|e| format!("'{trimmed}' is not a valid URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("'{trimmed}' uses unsupported scheme '{other}'")),
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), CoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}
