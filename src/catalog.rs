use crate::client::{ApiClient, Transport};
use crate::errors::{AppError, AppResult};
use crate::export::{export_filename, write_export};
use crate::models::{Asset, ExportFormat, SaveOutcome, SkipReason};
use crate::ui;
use crate::utils::{format_duration, format_megabytes};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Files written and exports skipped by a batch save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<SkipReason>,
}

impl BatchReport {
    fn record(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved(path) => self.saved.push(path),
            SaveOutcome::Skipped(reason) => self.skipped.push(reason),
        }
    }
}

/// Every asset owned by the authenticated account, in listing order.
///
/// The catalog is built once and never mutated, so the survey positions computed at
/// construction stay valid for its whole lifetime.
#[derive(Debug)]
pub struct AssetCatalog<T> {
    client: ApiClient<T>,
    assets: Vec<Asset>,
    surveys: Vec<usize>,
    output_dir: PathBuf,
}

impl<T: Transport> AssetCatalog<T> {
    /// Builds the catalog by exhausting the paginated asset listing.
    ///
    /// # Arguments
    ///
    /// * `client` - Authenticated API client, kept for the export downloads
    /// * `output_dir` - Existing directory that receives the export files
    ///
    /// # Errors
    ///
    /// Any listing failure is fatal: non-success statuses, transport errors and
    /// malformed pages are all propagated.
    pub async fn fetch(client: ApiClient<T>, output_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let listing = client.fetch_all_assets().await?;
        Ok(Self::from_assets(client, listing.assets, output_dir))
    }

    /// Builds a catalog from assets that were already fetched.
    pub fn from_assets(
        client: ApiClient<T>,
        assets: Vec<Asset>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let mut catalog = Self {
            client,
            assets,
            surveys: Vec::new(),
            output_dir: output_dir.into(),
        };
        catalog.surveys = catalog.survey_positions();
        catalog
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Survey positions computed when the catalog was built.
    pub fn surveys(&self) -> &[usize] {
        &self.surveys
    }

    /// Scans the catalog for assets whose type is `survey`, in ascending order.
    pub fn survey_positions(&self) -> Vec<usize> {
        self.assets
            .iter()
            .enumerate()
            .filter(|(_, asset)| asset.is_survey())
            .map(|(index, _)| index)
            .collect()
    }

    /// Position of the asset carrying `uid`. With duplicates the last one wins.
    pub fn find_uid(&self, uid: &str) -> Option<usize> {
        self.assets.iter().rposition(|asset| asset.uid == uid)
    }

    /// Saves one export of the asset at `index`.
    ///
    /// `format` must be `"csv"` or `"xlsx"`; any other value is rejected before a
    /// request is made.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown format or an out of range index. See
    /// [`AssetCatalog::save_export`] for the remaining cases.
    pub async fn save_asset(&self, index: usize, format: &str) -> AppResult<SaveOutcome> {
        let format = format.parse::<ExportFormat>().map_err(|e| {
            warn!(format = format, "Rejected export format");
            e
        })?;
        self.save_export(index, format).await
    }

    /// Downloads the `format` export of the asset at `index` and writes it to the
    /// output directory as `<uid>_<name>.<format>` (sanitized).
    ///
    /// The URL is taken from the first export settings entry. A non-success status from
    /// the export download is not an error: it is logged and reported as
    /// [`SkipReason::ExportUnavailable`] without writing anything.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `index` is out of range
    /// - `MissingExport` if the first export settings entry has no URL for `format`
    /// - `NetworkError`/`UrlError` if the download cannot be performed at all
    /// - `IoError` if the file cannot be written
    pub async fn save_export(&self, index: usize, format: ExportFormat) -> AppResult<SaveOutcome> {
        let asset = self.assets.get(index).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Asset index {index} is out of range (catalog has {} assets)",
                self.assets.len()
            ))
        })?;

        let url = asset
            .export_url(format)
            .ok_or_else(|| AppError::MissingExport {
                uid: asset.uid.clone(),
                format: format.to_string(),
            })?;

        let response = self.client.download(url).await?;
        if !response.is_success() {
            warn!(
                uid = %asset.uid,
                url = url,
                status = response.status,
                "Unable to retrieve the export url"
            );
            return Ok(SaveOutcome::Skipped(SkipReason::ExportUnavailable {
                url: url.to_string(),
                status: response.status,
            }));
        }

        let filename = export_filename(asset, format);
        let path = write_export(&self.output_dir, &filename, &response.body).await?;
        info!(
            file = %path.display(),
            size = %format_megabytes(response.body.len()),
            "Saved export"
        );

        Ok(SaveOutcome::Saved(path))
    }

    /// Saves the csv and xlsx exports of every survey, in catalog order.
    pub async fn save_all_surveys(&self) -> AppResult<BatchReport> {
        self.save_surveys_as(&ExportFormat::ALL).await
    }

    /// Saves each of `formats` for every survey, in catalog order.
    ///
    /// Unavailable exports are collected in the report and the batch moves on; any
    /// fatal error stops the batch and is returned.
    pub async fn save_surveys_as(&self, formats: &[ExportFormat]) -> AppResult<BatchReport> {
        let started = Instant::now();
        let mut report = BatchReport::default();

        info!(
            surveys = self.surveys.len(),
            formats = formats.len(),
            "Saving survey exports"
        );
        let pb = ui::create_progress_bar((self.surveys.len() * formats.len()) as u64)?;

        for &index in &self.surveys {
            for &format in formats {
                pb.set_message(format!("{} ({format})", self.assets[index].uid));
                let outcome = self.save_export(index, format).await?;
                report.record(outcome);
                pb.inc(1);
            }
        }

        pb.finish_with_message(format!(
            "Saved {} file(s), {} skipped",
            report.saved.len(),
            report.skipped.len()
        ));
        info!(
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            elapsed = %format_duration(started.elapsed()),
            "Survey exports completed"
        );

        Ok(report)
    }

    /// Saves one export of the asset identified by `uid`.
    ///
    /// When no asset matches, logs "UID not found" and returns
    /// [`SkipReason::UidNotFound`] without making a request.
    pub async fn save_uid(&self, uid: &str, format: &str) -> AppResult<SaveOutcome> {
        match self.find_uid(uid) {
            Some(index) => self.save_asset(index, format).await,
            None => {
                info!(uid = uid, "UID not found");
                Ok(SaveOutcome::Skipped(SkipReason::UidNotFound {
                    uid: uid.to_string(),
                }))
            }
        }
    }
}
