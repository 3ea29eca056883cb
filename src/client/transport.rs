use crate::auth::ApiAuth;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

/// Status and body of a completed HTTP exchange.
///
/// Non-success statuses are returned as values; callers decide whether they are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues authenticated GET requests.
///
/// An `Err` means the request never produced a response (DNS, TLS, connection reset).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, auth: &ApiAuth) -> AppResult<HttpResponse>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, auth: &ApiAuth) -> AppResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, auth.header_value())
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to contact {url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read body from {url}: {e}")))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
