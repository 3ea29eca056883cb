use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed or the API answered with a non-success status
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to parse an API response or a configuration file
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
    /// The API token file does not exist
    #[error("Could not find the token file `{}`", .0.display())]
    TokenNotFound(PathBuf),
    /// The asset has no export URL for the requested format
    #[error("Asset '{uid}' has no {format} export URL in its export settings")]
    MissingExport { uid: String, format: String },
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
