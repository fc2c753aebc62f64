//! Error taxonomy shared by collaborators and binaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}` in symbol list")]
    MissingColumn(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
