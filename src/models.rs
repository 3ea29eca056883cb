use crate::errors::AppError;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Asset type tag that marks an asset as a survey.
pub const SURVEY_ASSET_TYPE: &str = "survey";

/// Export format that can be downloaded for a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Every supported format, in the order a batch save downloads them.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Xlsx];

    /// Returns the format keyword, which doubles as the file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(AppError::InvalidInput(format!(
                "Export format must be 'csv' or 'xlsx', got '{other}'"
            ))),
        }
    }
}

/// One entry of an asset's `export_settings`.
///
/// Only the download URLs are kept; the API sends more keys which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExportSetting {
    #[serde(default)]
    pub data_url_csv: Option<String>,
    #[serde(default)]
    pub data_url_xlsx: Option<String>,
}

impl ExportSetting {
    pub fn data_url(&self, format: ExportFormat) -> Option<&str> {
        match format {
            ExportFormat::Csv => self.data_url_csv.as_deref(),
            ExportFormat::Xlsx => self.data_url_xlsx.as_deref(),
        }
    }
}

/// An asset owned by the authenticated account, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub uid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub asset_type: String,
    #[serde(default)]
    pub export_settings: Vec<ExportSetting>,
}

impl Asset {
    pub fn is_survey(&self) -> bool {
        self.asset_type == SURVEY_ASSET_TYPE
    }

    /// Export URL for `format` taken from the first export settings entry only.
    pub fn export_url(&self, format: ExportFormat) -> Option<&str> {
        self.export_settings
            .first()
            .and_then(|setting| setting.data_url(format))
    }
}

/// One page of the paginated asset listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPage {
    pub results: Vec<Asset>,
    /// URL of the following page. The key must be present even when null.
    #[serde(deserialize_with = "nullable")]
    pub next: Option<String>,
    pub count: usize,
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a save produced no file while letting the surrounding batch continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The export download answered with a non-success status.
    ExportUnavailable { url: String, status: u16 },
    /// No asset in the catalog carries the requested uid.
    UidNotFound { uid: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportUnavailable { url, status } => {
                write!(f, "Unable to retrieve the url {url} (HTTP {status})")
            }
            Self::UidNotFound { uid } => write!(f, "UID '{uid}' not found"),
        }
    }
}

/// Result of a single save that did not fail fatally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Skipped(SkipReason),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}
