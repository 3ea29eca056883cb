use crate::errors::{AppError, AppResult};
use crate::models::{Asset, ExportFormat};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Characters that are not allowed in Windows filenames.
pub const FORBIDDEN_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces every forbidden filename character with `_`.
///
/// Works character by character, so the output has as many characters as the input
/// and every allowed character keeps its position.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Builds the sanitized `<uid>_<name>.<format>` filename for an asset export.
pub fn export_filename(asset: &Asset, format: ExportFormat) -> String {
    sanitize_filename(&format!(
        "{}_{}.{}",
        asset.uid,
        asset.name,
        format.extension()
    ))
}

/// Writes an export payload into `output_dir`, replacing any file with the same name.
///
/// The directory must already exist.
///
/// # Errors
///
/// Returns `IoError` if the directory is missing or the file cannot be written.
pub async fn write_export(output_dir: &Path, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    if !output_dir.is_dir() {
        return Err(AppError::IoError(format!(
            "Output directory {} does not exist",
            output_dir.display()
        )));
    }

    let path = output_dir.join(filename);
    fs::write(&path, bytes).await.map_err(|e| {
        AppError::IoError(format!("Failed to write {}: {e}", path.display()))
    })?;
    Ok(path)
}
