use std::future::Future;
use std::pin::Pin;

use kadoc_core::models::article::{Article, NewArticle};
use kadoc_core::models::snippet::{NewSnippet, Snippet};

use crate::error::ClientError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The read/create surface of the Kadoc API that pages depend on.
///
/// Methods return boxed futures for dyn compatibility, so pages can hold an
/// `Arc<dyn KadocApi>` and tests can substitute their own implementation.
pub trait KadocApi: Send + Sync {
    /// `GET /snippets`, filtered by `q` when `query` is non-blank.
    fn list_snippets<'a>(
        &'a self,
        query: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Snippet>, ClientError>>;

    fn get_snippet<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Snippet, ClientError>>;

    fn create_snippet<'a>(
        &'a self,
        input: &'a NewSnippet,
    ) -> BoxFuture<'a, Result<Snippet, ClientError>>;

    fn list_articles(&self) -> BoxFuture<'_, Result<Vec<Article>, ClientError>>;

    fn get_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Article, ClientError>>;

    fn create_article<'a>(
        &'a self,
        input: &'a NewArticle,
    ) -> BoxFuture<'a, Result<Article, ClientError>>;
}
