use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::validate;

/// Languages offered by the create form, in display order.
pub const LANGUAGES: &[&str] = &[
    "javascript",
    "python",
    "go",
    "typescript",
    "html",
    "css",
    "sql",
    "bash",
    "json",
    "markdown",
    "java",
    "csharp",
    "cpp",
];

pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Number of code characters shown on a list card before truncation.
pub const PREVIEW_CHARS: usize = 300;

/// A stored code snippet as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub language: String,
    pub code: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(deserialize_with = "clamped_complexity")]
    pub complexity: Complexity,
    #[serde(default)]
    pub references: Vec<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Snippet {
    /// Code shown on a list card: the first [`PREVIEW_CHARS`] characters,
    /// followed by an ellipsis line when anything was cut.
    pub fn preview(&self) -> Cow<'_, str> {
        match self.code.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => Cow::Owned(format!("{}\n...", &self.code[..cut])),
            None => Cow::Borrowed(&self.code),
        }
    }

    pub fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description.as_deref().unwrap_or(fallback)
    }

    /// Case-insensitive substring match on title, description, language, or
    /// code. A blank query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            self.title.as_str(),
            self.description.as_deref().unwrap_or_default(),
            self.language.as_str(),
            self.code.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Difficulty rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Complexity(u8);

impl Complexity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidComplexity(value))
        }
    }

    /// Nearest in-range rating: 0 becomes 1, anything above 5 becomes 5.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Complexity {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Complexity> for u8 {
    fn from(c: Complexity) -> Self {
        c.0
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /snippets`.
///
/// Kept in wire form: `complexity` 0 means "not chosen" and is defaulted by
/// [`NewSnippet::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub language: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    #[serde(default)]
    pub complexity: u8,
    #[serde(default)]
    pub references: Vec<String>,
}

impl NewSnippet {
    /// Trim text fields, drop blank reference rows, and default an unset
    /// complexity to 1.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.language = self.language.trim().to_string();
        self.description = self.description.trim().to_string();
        if self.complexity == 0 {
            self.complexity = Complexity::MIN;
        }
        self.references = self
            .references
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate::new_snippet(self)
    }

    /// Validate and build the stored record.
    pub fn into_snippet(self, id: String, now: jiff::Timestamp) -> Result<Snippet, CoreError> {
        self.validate()?;
        let complexity = Complexity::new(self.complexity)?;
        let description = Some(self.description).filter(|d| !d.is_empty());
        Ok(Snippet {
            id,
            title: self.title,
            language: self.language,
            code: self.code,
            description,
            complexity,
            references: self.references,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A prior version of a snippet's code, recorded when the snippet is updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetVersion {
    pub version: u32,
    pub code: String,
    pub created_at: jiff::Timestamp,
}

/// Stored records are read leniently so one out-of-range rating can't fail a
/// whole listing. Create payloads stay strict through [`NewSnippet::validate`].
fn clamped_complexity<'de, D>(deserializer: D) -> Result<Complexity, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(Complexity::clamped)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
