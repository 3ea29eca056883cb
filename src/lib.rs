//! kobo-export library
//!
//! This crate provides the core functionality for the `kobo-export` binary, which downloads
//! the data exports of every survey owned by a KoboToolbox account.
//!
//! ## Overview
//!
//! - [`client`] - Authenticated HTTP access and the paginated asset listing
//! - [`catalog`] - The in-memory asset catalog, survey filtering and export saving
//! - [`export`] - Filename sanitization and export file writing
//! - [`auth`] - API token loading
//! - [`config`] - Defaults and the optional TOML configuration file
//! - [`cli`] - Command-line interface orchestrating the workflow
//! - [`models`] - Assets, export formats and save outcomes
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use kobo_export::auth::load_token;
//! use kobo_export::catalog::AssetCatalog;
//! use kobo_export::client::{ApiClient, ReqwestTransport};
//! use kobo_export::config::DEFAULT_ASSETS_URL;
//! use kobo_export::errors::AppResult;
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let auth = load_token(Path::new("token.txt")).await?;
//! let client = ApiClient::new(ReqwestTransport::default(), auth, DEFAULT_ASSETS_URL);
//!
//! let catalog = AssetCatalog::fetch(client, "data").await?;
//! let report = catalog.save_all_surveys().await?;
//! println!("{} exports saved", report.saved.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;
