use std::time::Duration;

/// Formats a duration as `HH:MM:SS`.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Formats a byte count in megabytes with two decimals, e.g. `1.50 MB`.
pub fn format_megabytes(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / 1_048_576.0)
}
