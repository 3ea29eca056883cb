//! API token loading and the request configuration built from it.

use crate::errors::{AppError, AppResult};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// Credentials attached to every API request.
///
/// Passed explicitly to each transport call so no request can go out without them.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiAuth {
    token: String,
}

impl ApiAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header, `Token <value>`.
    pub fn header_value(&self) -> String {
        format!("Token {}", self.token)
    }
}

// Keep the token out of logs.
impl fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiAuth").field("token", &"***").finish()
    }
}

/// Reads the API token from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns `TokenNotFound` if the file does not exist, `InvalidInput` if it holds
/// only whitespace and `IoError` for any other read failure.
pub async fn load_token(path: &Path) -> AppResult<ApiAuth> {
    if !path.exists() {
        return Err(AppError::TokenNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).await?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Token file {} is empty",
            path.display()
        )));
    }

    Ok(ApiAuth::new(token))
}
