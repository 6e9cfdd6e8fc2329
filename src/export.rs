use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

use crate::scan::PREFIX_LEN;
use crate::store::{self, Attempt, StoreError};
use crate::utils::format_timestamp;

/// Directory the CSV files land in, created on demand next to the database.
pub const EXPORT_DIR: &str = "exports";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the full archive as a timestamped CSV file into `output_dir` and
/// returns the path of the written file. An empty archive produces a file
/// with just the header row.
pub fn export_archive(conn: &Connection, output_dir: &Path) -> Result<PathBuf, ExportError> {
    let attempts = store::load_archive(conn)?;
    fs::create_dir_all(output_dir)?;
    let filename = format!("archive-{}.csv", Utc::now().format("%Y-%m-%d-%H-%M-%S"));
    let path = output_dir.join(filename);
    let mut file = File::create(&path)?;
    file.write_all(build_csv(&attempts).as_bytes())?;
    info!(path = %path.display(), rows = attempts.len(), "archive exported");
    Ok(path)
}

fn build_csv(attempts: &[Attempt]) -> String {
    let header = [
        "Datetime".to_string(),
        "User".to_string(),
        "Barcode 1 (full)".to_string(),
        "Barcode 2 (full)".to_string(),
        format!("First {PREFIX_LEN} (code 1)"),
        format!("First {PREFIX_LEN} (code 2)"),
        "Status".to_string(),
    ];
    let mut lines = vec![csv_line(&header)];
    for attempt in attempts {
        lines.push(csv_line(&[
            format_timestamp(attempt.timestamp),
            attempt.user.clone(),
            attempt.full1.clone(),
            attempt.full2.clone(),
            attempt.prefix1.clone(),
            attempt.prefix2.clone(),
            attempt.status.to_string(),
        ]));
    }
    lines.join("\n")
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",")
}

// RFC4180-style: quote when a field contains comma, quote, CR or LF, and
// double the quotes inside.
fn escape_csv(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
