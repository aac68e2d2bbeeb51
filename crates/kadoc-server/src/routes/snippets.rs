use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use kadoc_core::models::snippet::{NewSnippet, Snippet, SnippetVersion};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SnippetQuery {
    pub q: Option<String>,
}

pub async fn list_snippets(
    State(state): State<AppState>,
    query: Result<Query<SnippetQuery>, QueryRejection>,
) -> Result<Json<Vec<Snippet>>, ApiError> {
    let Query(query) = query?;
    let store = state.store.lock().await;
    Ok(Json(store.list_snippets(query.q.as_deref())))
}

pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_snippet(&id)?))
}

pub async fn create_snippet(
    State(state): State<AppState>,
    payload: Result<Json<NewSnippet>, JsonRejection>,
) -> Result<Json<Snippet>, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    Ok(Json(store.create_snippet(input)?))
}

pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewSnippet>, JsonRejection>,
) -> Result<Json<Snippet>, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    Ok(Json(store.update_snippet(&id, input)?))
}

pub async fn snippet_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SnippetVersion>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.snippet_history(&id)?))
}
