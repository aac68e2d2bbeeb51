//! In-memory record store backing the API.
//!
//! Listings are newest first. Snippet updates keep the replaced code as a
//! numbered [`SnippetVersion`].

use std::collections::HashMap;

use thiserror::Error;

use kadoc_core::error::CoreError;
use kadoc_core::models::article::{Article, NewArticle};
use kadoc_core::models::snippet::{Complexity, NewSnippet, Snippet, SnippetVersion};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    snippets: Vec<Snippet>,
    articles: Vec<Article>,
    history: HashMap<String, Vec<SnippetVersion>>,
}

impl MemoryStore {
    /// Snippets matching `query` (all when `None` or blank), newest first.
    pub fn list_snippets(&self, query: Option<&str>) -> Vec<Snippet> {
        let query = query.unwrap_or_default();
        let mut found: Vec<Snippet> = self
            .snippets
            .iter()
            .rev()
            .filter(|s| s.matches_query(query))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub fn get_snippet(&self, id: &str) -> Result<Snippet, StoreError> {
        self.snippets
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found("snippet", id))
    }

    pub fn create_snippet(&mut self, input: NewSnippet) -> Result<Snippet, StoreError> {
        let snippet = input.normalized().into_snippet(new_id(), jiff::Timestamp::now())?;
        self.snippets.push(snippet.clone());
        tracing::info!(id = %snippet.id, "snippet created");
        Ok(snippet)
    }

    /// Replace a snippet's fields, recording its previous code first.
    pub fn update_snippet(&mut self, id: &str, input: NewSnippet) -> Result<Snippet, StoreError> {
        let input = input.normalized();
        input.validate()?;
        let complexity = Complexity::new(input.complexity)?;

        let current = self
            .snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("snippet", id))?;

        let now = jiff::Timestamp::now();
        let versions = self.history.entry(id.to_string()).or_default();
        let version = u32::try_from(versions.len()).unwrap_or(u32::MAX).saturating_add(1);
        versions.push(SnippetVersion {
            version,
            code: std::mem::take(&mut current.code),
            created_at: now,
        });

        current.title = input.title;
        current.language = input.language;
        current.code = input.code;
        current.description = Some(input.description).filter(|d| !d.is_empty());
        current.complexity = complexity;
        current.references = input.references;
        current.updated_at = now;

        tracing::info!(id, version, "snippet updated");
        Ok(current.clone())
    }

    pub fn snippet_history(&self, id: &str) -> Result<Vec<SnippetVersion>, StoreError> {
        self.get_snippet(id)?;
        Ok(self.history.get(id).cloned().unwrap_or_default())
    }

    /// All articles, newest first.
    pub fn list_articles(&self) -> Vec<Article> {
        let mut found: Vec<Article> = self.articles.iter().rev().cloned().collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub fn get_article(&self, id: &str) -> Result<Article, StoreError> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("article", id))
    }

    pub fn create_article(&mut self, input: NewArticle) -> Result<Article, StoreError> {
        let article = input.normalized().into_article(new_id(), jiff::Timestamp::now())?;
        self.articles.push(article.clone());
        tracing::info!(id = %article.id, "article created");
        Ok(article)
    }

    pub fn update_article(&mut self, id: &str, input: NewArticle) -> Result<Article, StoreError> {
        let input = input.normalized();
        input.validate()?;

        let current = self
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("article", id))?;

        current.title = input.title;
        current.category = input.category;
        current.content = input.content;
        current.updated_at = jiff::Timestamp::now();

        tracing::info!(id, "article updated");
        Ok(current.clone())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn not_found(kind: &'static str, id: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
