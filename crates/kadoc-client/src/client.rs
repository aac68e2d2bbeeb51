use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use kadoc_core::api_paths::{ARTICLES, HEALTH, SEARCH_PARAM, SNIPPETS};
use kadoc_core::models::article::{Article, NewArticle};
use kadoc_core::models::snippet::{NewSnippet, Snippet};

use crate::api::{BoxFuture, KadocApi};
use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one Kadoc API base URL (e.g. `http://localhost:3006/api`).
#[derive(Debug, Clone)]
pub struct KadocClient {
    http: reqwest::Client,
    base: Url,
}

impl KadocClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_http(http, base_url)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&[HEALTH]);
        let response = self.http.get(url).send().await?;
        expect_success(response, HEALTH, "").await.map(|_| ())
    }

    /// Base URL with `segments` appended as percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &'static str,
        id: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        decode(response, resource, id).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        resource: &'static str,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        decode(response, resource, "").await
    }
}

impl KadocApi for KadocClient {
    fn list_snippets<'a>(
        &'a self,
        query: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Snippet>, ClientError>> {
        Box::pin(async move {
            let mut url = self.endpoint(&[SNIPPETS]);
            if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
                url.query_pairs_mut().append_pair(SEARCH_PARAM, q);
            }
            self.get_json(url, SNIPPETS, "").await
        })
    }

    fn get_snippet<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Snippet, ClientError>> {
        Box::pin(async move {
            let url = self.endpoint(&[SNIPPETS, id]);
            self.get_json(url, "snippet", id).await
        })
    }

    fn create_snippet<'a>(
        &'a self,
        input: &'a NewSnippet,
    ) -> BoxFuture<'a, Result<Snippet, ClientError>> {
        Box::pin(async move {
            input.validate()?;
            let url = self.endpoint(&[SNIPPETS]);
            let created: Snippet = self.post_json(url, input, "snippet").await?;
            tracing::info!(id = %created.id, "snippet created");
            Ok(created)
        })
    }

    fn list_articles(&self) -> BoxFuture<'_, Result<Vec<Article>, ClientError>> {
        Box::pin(async move {
            let url = self.endpoint(&[ARTICLES]);
            self.get_json(url, ARTICLES, "").await
        })
    }

    fn get_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Article, ClientError>> {
        Box::pin(async move {
            let url = self.endpoint(&[ARTICLES, id]);
            self.get_json(url, "article", id).await
        })
    }

    fn create_article<'a>(
        &'a self,
        input: &'a NewArticle,
    ) -> BoxFuture<'a, Result<Article, ClientError>> {
        Box::pin(async move {
            input.validate()?;
            let url = self.endpoint(&[ARTICLES]);
            let created: Article = self.post_json(url, input, "article").await?;
            tracing::info!(id = %created.id, "article created");
            Ok(created)
        })
    }
}

async fn expect_success(
    response: Response,
    resource: &'static str,
    id: &str,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            resource,
            id: id.to_string(),
        });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    resource: &'static str,
    id: &str,
) -> Result<T, ClientError> {
    let response = expect_success(response, resource, id).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
