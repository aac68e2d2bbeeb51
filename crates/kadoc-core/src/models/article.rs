use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validate;

/// A documentation article as served by the API. `content` is markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Article {
    /// Case-insensitive substring match on title or category.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.category.as_str().to_lowercase().contains(&needle)
    }
}

/// Article category. The create form offers only the named variants; any
/// other tag coming back from the API is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    General,
    Architecture,
    Guide,
    Troubleshooting,
    Setup,
    Other(String),
}

impl Category {
    /// Categories offered by the create form, in display order.
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Architecture,
        Category::Guide,
        Category::Troubleshooting,
        Category::Setup,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::General => "General",
            Category::Architecture => "Architecture",
            Category::Guide => "Guide",
            Category::Troubleshooting => "Troubleshooting",
            Category::Setup => "Setup",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "General" => Category::General,
            "Architecture" => Category::Architecture,
            "Guide" => Category::Guide,
            "Troubleshooting" => Category::Troubleshooting,
            "Setup" => Category::Setup,
            _ => Category::Other(tag),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            named => named.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /articles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub category: Category,
    pub content: String,
}

impl NewArticle {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate::new_article(self)
    }

    /// Validate and build the stored record.
    pub fn into_article(self, id: String, now: jiff::Timestamp) -> Result<Article, CoreError> {
        self.validate()?;
        Ok(Article {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            created_at: now,
            updated_at: now,
        })
    }
}
