use crate::errors::{AppError, AppResult};
use crate::models::ExportFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Default asset listing endpoint.
pub const DEFAULT_ASSETS_URL: &str = "https://kf.kobotoolbox.org/api/v2/assets.json";

/// Resolved configuration with all values filled in (no Options).
///
/// Every field has a default, so an empty TOML file (or no file at all) yields the
/// behavior of running the binary without arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// First page of the asset listing
    pub api_url: String,
    /// File holding the API token on its first line
    pub token_file: PathBuf,
    /// Existing directory that receives the exports
    pub output_dir: PathBuf,
    /// Formats downloaded for every survey by the batch save
    pub formats: Vec<ExportFormat>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ASSETS_URL.to_string(),
            token_file: PathBuf::from("token.txt"),
            output_dir: PathBuf::from("data"),
            formats: ExportFormat::ALL.to_vec(),
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults. Unknown keys are rejected so typos
    /// are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, `InvalidInput` if the TOML is
    /// malformed, `api_url` is not a valid URL or `formats` is empty.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        Url::parse(&self.api_url)?;
        if self.formats.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one export format must be configured".into(),
            ));
        }
        Ok(())
    }
}
