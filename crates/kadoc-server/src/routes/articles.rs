use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use kadoc_core::models::article::{Article, NewArticle};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<Article>> {
    let store = state.store.lock().await;
    Json(store.list_articles())
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_article(&id)?))
}

pub async fn create_article(
    State(state): State<AppState>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Result<Json<Article>, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    Ok(Json(store.create_article(input)?))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Result<Json<Article>, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    Ok(Json(store.update_article(&id, input)?))
}
