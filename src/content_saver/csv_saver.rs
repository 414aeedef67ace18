use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::ScrapeResult;
use crate::job_search::JobRecord;

const CSV_HEADER: [&str; 4] = ["Job Title", "Company", "Location", "Source URL"];

/// `{YYYYmmdd_HHMMSS}_{search_term}.csv` with whitespace runs in the term
/// replaced by underscores
///
/// Path separators and characters reserved on common filesystems are
/// replaced too, so the result is always a single file name.
#[must_use]
pub fn csv_file_name(search_term: &str, at: DateTime<Local>) -> String {
    let term = search_term.split_whitespace().collect::<Vec<_>>().join("_");
    let options = sanitize_filename::Options {
        replacement: "_",
        ..Default::default()
    };
    let term = sanitize_filename::sanitize_with_options(term, options);
    format!("{}_{}.csv", at.format("%Y%m%d_%H%M%S"), term)
}

/// Write the header row and one row per record, in order
pub fn write_jobs_csv<W: Write>(writer: W, records: &[JobRecord]) -> ScrapeResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record([
            record.title.as_str(),
            record.company.as_str(),
            record.location.as_str(),
            record.source_url.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save `records` under `output_dir`, creating it if needed
///
/// Returns the path of the written file.
pub async fn save_jobs_to_csv(
    output_dir: &Path,
    search_term: &str,
    records: &[JobRecord],
) -> ScrapeResult<PathBuf> {
    let mut buffer = Vec::new();
    write_jobs_csv(&mut buffer, records)?;

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(csv_file_name(search_term, Local::now()));
    tokio::fs::write(&path, buffer).await?;

    info!("Saved {} job(s) to {}", records.len(), path.display());
    Ok(path)
}
