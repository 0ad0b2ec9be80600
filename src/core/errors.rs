use thiserror::Error;

#[derive(Error, Debug)]
pub enum HayaoshiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    #[error("A note is missing the `{0}` field")]
    MissingField(String),

    #[error("An empty deck or loading error. Select a deck with cards and try again.")]
    EmptyPool,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for HayaoshiError {
    fn from(error: std::io::Error) -> Self {
        HayaoshiError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for HayaoshiError {
    fn from(error: reqwest::Error) -> Self {
        HayaoshiError::Reqwest(Box::new(error))
    }
}
