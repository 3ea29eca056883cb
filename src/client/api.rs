use super::transport::{HttpResponse, Transport};
use crate::auth::ApiAuth;
use crate::errors::{AppError, AppResult};
use crate::models::{Asset, AssetPage};
use tracing::{debug, info, warn};
use url::Url;

/// All assets gathered from the listing endpoint together with the total the server reported.
#[derive(Debug, Clone, Default)]
pub struct AssetListing {
    pub assets: Vec<Asset>,
    /// `count` of the last page fetched
    pub reported_count: usize,
}

impl AssetListing {
    pub fn is_complete(&self) -> bool {
        self.assets.len() == self.reported_count
    }
}

/// Authenticated access to the survey API.
///
/// The credentials travel with every request issued through this client.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    auth: ApiAuth,
    assets_url: String,
}

impl<T: Transport> ApiClient<T> {
    /// # Arguments
    ///
    /// * `transport` - HTTP implementation used for every request
    /// * `auth` - Credentials sent in the `Authorization` header
    /// * `assets_url` - First page of the asset listing
    pub fn new(transport: T, auth: ApiAuth, assets_url: impl Into<String>) -> Self {
        Self {
            transport,
            auth,
            assets_url: assets_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn assets_url(&self) -> &str {
        &self.assets_url
    }

    /// Fetches a single page of the asset listing.
    ///
    /// `None` requests the first page.
    ///
    /// # Errors
    ///
    /// Returns `UrlError` for an unparseable URL, `NetworkError` when the request fails
    /// or answers with a non-success status, and `ParseError` when the body is not a
    /// listing page (`results`, `next` and `count` are all required).
    pub async fn fetch_page(&self, url: Option<&str>) -> AppResult<AssetPage> {
        let url = Url::parse(url.unwrap_or(self.assets_url.as_str()))?;
        info!(url = %url, "Contacting API");

        let response = self.transport.get(url.as_str(), &self.auth).await?;
        if !response.is_success() {
            return Err(AppError::NetworkError(format!(
                "HTTP {}: asset listing request to {url} failed",
                response.status
            )));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| AppError::ParseError(format!("Malformed asset listing from {url}: {e}")))
    }

    /// Fetches every asset by following the `next` cursor until it is null.
    ///
    /// A difference between the number of assets received and the `count` reported by
    /// the last page is logged as a warning and does not fail the call.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`ApiClient::fetch_page`].
    pub async fn fetch_all_assets(&self) -> AppResult<AssetListing> {
        let mut listing = AssetListing::default();
        let mut next: Option<String> = None;

        loop {
            let page = self.fetch_page(next.as_deref()).await?;
            debug!(
                received = page.results.len(),
                has_next = page.next.is_some(),
                "Asset page fetched"
            );
            listing.assets.extend(page.results);
            listing.reported_count = page.count;

            match page.next {
                Some(url) => next = Some(url),
                None => break,
            }
        }

        if listing.is_complete() {
            info!(
                expected = listing.reported_count,
                downloaded = listing.assets.len(),
                "All assets retrieved"
            );
        } else {
            warn!(
                expected = listing.reported_count,
                downloaded = listing.assets.len(),
                "Could not retrieve the expected number of assets"
            );
        }

        Ok(listing)
    }

    /// Downloads an export file. Non-success statuses come back as part of the response.
    pub async fn download(&self, url: &str) -> AppResult<HttpResponse> {
        let url = Url::parse(url)?;
        debug!(url = %url, "Requesting export");
        self.transport.get(url.as_str(), &self.auth).await
    }
}
