use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates the progress bar shown while survey exports are saved.
///
/// # Arguments
///
/// * `total` - Number of exports the batch will attempt
///
/// ```no_run
/// use kobo_export::ui;
///
/// # fn main() -> Result<(), kobo_export::errors::AppError> {
/// let pb = ui::create_progress_bar(4)?;
/// pb.inc(1);
/// pb.finish_with_message("Done");
/// # Ok(())
/// # }
/// ```
pub fn create_progress_bar(total: u64) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} exports {msg}")
            .map_err(|e| AppError::IoError(format!("Invalid progress bar template: {e}")))?
            .progress_chars("=>-"),
    );
    Ok(pb)
}
