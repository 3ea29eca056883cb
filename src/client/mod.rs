//! HTTP access to the survey API.
//!
//! [`Transport`] is the seam between the crate and the network; [`ReqwestTransport`] is the
//! production implementation. [`ApiClient`] pairs a transport with the account credentials
//! and implements the paginated asset listing.

mod api;
mod transport;

// Re-export public API
pub use api::{ApiClient, AssetListing};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
