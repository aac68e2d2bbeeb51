use kadoc_client::ClientError;
use kadoc_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("language '{0}' is not offered")]
    UnsupportedLanguage(String),

    #[error("{0}")]
    Invalid(#[from] CoreError),

    /// A create request that reached the API and failed. Pages show a single
    /// "could not save" message; the source is only logged.
    #[error("could not save")]
    SaveFailed(#[source] ClientError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
