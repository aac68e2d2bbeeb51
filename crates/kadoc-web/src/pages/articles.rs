use kadoc_client::{KadocApi, LoadState};
use kadoc_core::models::article::{Article, Category, NewArticle};

use crate::error::WebError;
use crate::locale::Locale;
use crate::location::History;
use crate::pages::EmptyState;
use crate::routes::Route;

/// The documentation index: every article fetched once, filtered locally.
///
/// The filter term is page-local and never written to the location.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleListPage {
    state: LoadState<Vec<Article>>,
    term: String,
}

impl ArticleListPage {
    pub async fn load(api: &dyn KadocApi) -> Self {
        Self {
            state: LoadState::from_result(api.list_articles().await),
            term: String::new(),
        }
    }

    pub fn state(&self) -> &LoadState<Vec<Article>> {
        &self.state
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Articles whose title or category contains the term, ignoring case.
    pub fn visible(&self) -> Vec<&Article> {
        self.state
            .loaded()
            .map(|articles| {
                articles
                    .iter()
                    .filter(|a| a.matches_term(&self.term))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        let articles = self.state.loaded()?;
        if articles.is_empty() {
            return Some(EmptyState::EmptyLibrary);
        }
        self.visible()
            .is_empty()
            .then(|| EmptyState::for_filter(Some(&self.term)))
    }
}

/// Fetch one article for the detail page.
pub async fn load_article(api: &dyn KadocApi, id: &str) -> LoadState<Article> {
    LoadState::from_result(api.get_article(id).await)
}

/// The "new article" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewArticleForm {
    pub title: String,
    pub category: Category,
    pub content: String,
    error: Option<String>,
}

impl NewArticleForm {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn to_payload(&self) -> NewArticle {
        NewArticle {
            title: self.title.clone(),
            category: self.category.clone(),
            content: self.content.clone(),
        }
        .normalized()
    }

    /// Validate, create, and on success navigate to the documentation index.
    pub async fn submit(
        &mut self,
        api: &dyn KadocApi,
        history: &History,
        locale: Locale,
    ) -> Result<Article, WebError> {
        let payload = self.to_payload();
        if let Err(e) = payload.validate() {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        match api.create_article(&payload).await {
            Ok(created) => {
                self.error = None;
                history.push(Route::Docs.localized(locale).to_location());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("article create failed: {e}");
                let err = WebError::SaveFailed(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
