use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Catalog unavailable: {0}. Run the command again to retry.")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {kind} color: {name}")]
    UnknownColor { kind: String, name: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for EvError {
    fn from(err: confique::Error) -> Self {
        EvError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvError>;
