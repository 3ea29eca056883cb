//! Common test utilities for integration tests

use async_trait::async_trait;
use kobo_export::auth::ApiAuth;
use kobo_export::client::{ApiClient, HttpResponse, Transport};
use kobo_export::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// First page of the asset listing served by [`FakeTransport`]
#[allow(dead_code)]
pub const ASSETS_URL: &str = "https://kf.example.org/api/v2/assets.json";

/// Token used by [`client`]
#[allow(dead_code)]
pub const TOKEN: &str = "test-token";

/// In-memory transport serving canned responses and recording every request.
///
/// URLs without a canned response fail like an unreachable host.
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Serves one asset listing page per entry; each page links to the next.
    pub fn with_pages(mut self, pages: &[Vec<String>], count: usize) -> Self {
        for (i, assets) in pages.iter().enumerate() {
            let url = page_url(i);
            let next = (i + 1 < pages.len()).then(|| page_url(i + 1));
            self = self.with_response(&url, 200, page_json(assets, next.as_deref(), count));
        }
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn auth_headers(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, header)| header.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, auth: &ApiAuth) -> AppResult<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), auth.header_value()));
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::NetworkError(format!("Connection refused: {url}")))
    }
}

/// URL of the listing page at `index`; page 0 is [`ASSETS_URL`].
#[allow(dead_code)]
pub fn page_url(index: usize) -> String {
    if index == 0 {
        ASSETS_URL.to_string()
    } else {
        format!("{ASSETS_URL}?limit=2&start={}", index * 2)
    }
}

#[allow(dead_code)]
pub fn export_url(uid: &str, extension: &str) -> String {
    format!("https://kf.example.org/api/v2/assets/{uid}/export-settings/es1/data.{extension}")
}

/// JSON of an asset whose first export settings entry has csv and xlsx URLs.
#[allow(dead_code)]
pub fn asset_json(uid: &str, name: &str, asset_type: &str) -> String {
    serde_json::json!({
        "uid": uid,
        "name": name,
        "asset_type": asset_type,
        "owner__username": "tester",
        "export_settings": [{
            "uid": "es1",
            "name": "default",
            "data_url_csv": export_url(uid, "csv"),
            "data_url_xlsx": export_url(uid, "xlsx"),
        }],
    })
    .to_string()
}

#[allow(dead_code)]
pub fn page_json(assets: &[String], next: Option<&str>, count: usize) -> String {
    format!(
        r#"{{"count": {count}, "next": {}, "previous": null, "results": [{}]}}"#,
        serde_json::to_string(&next).unwrap(),
        assets.join(",")
    )
}

#[allow(dead_code)]
pub fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::new(transport, ApiAuth::new(TOKEN), ASSETS_URL)
}
