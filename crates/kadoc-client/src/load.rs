use crate::error::ClientError;

/// What a page shows for one request.
///
/// Transport failures, error statuses and undecodable bodies all collapse
/// into `Failed`; only a 404 is kept apart as `NotFound`. The message in
/// `Failed` is diagnostic and goes to the log, not to the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    NotFound,
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{e}");
                LoadState::NotFound
            }
            Err(e) => {
                tracing::warn!("load failed: {e}");
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ClientError>> for LoadState<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        Self::from_result(result)
    }
}
