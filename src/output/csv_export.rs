//! CSV export of crawl results
//!
//! One header row, then one row per result in sink order. Fields containing
//! a comma, quote or line break are quoted with inner quotes doubled.

use crate::config::OutputConfig;
use crate::crawler::CrawlResult;
use crate::CrawlerError;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header row of the export
pub const CSV_HEADER: [&str; 5] = ["URL", "Title", "Status Code", "Link Count", "Error"];

/// Writes the header and every result to `writer`
pub fn write_results<W: Write>(writer: W, results: &[CrawlResult]) -> Result<(), CrawlerError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for result in results {
        let status = result.status.to_string();
        let link_count = result.link_count.to_string();
        writer.write_record([
            result.url.as_str(),
            result.title.as_str(),
            status.as_str(),
            link_count.as_str(),
            result.error.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the results to a new file at `path`, replacing any existing file
pub fn write_results_csv(path: &Path, results: &[CrawlResult]) -> Result<(), CrawlerError> {
    let file = File::create(path)?;
    write_results(file, results)
}

/// Builds the export file name: `<prefix>_YYYYmmdd_HHMMSS.csv`
pub fn export_file_name(prefix: &str, timestamp: DateTime<Local>) -> String {
    format!("{}_{}.csv", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the results into the configured directory under a timestamped name
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(CrawlerError)` - The directory or file could not be written
pub fn export_results(
    config: &OutputConfig,
    results: &[CrawlResult],
) -> Result<PathBuf, CrawlerError> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory)?;

    let path = directory.join(export_file_name(&config.file_prefix, Local::now()));
    write_results_csv(&path, results)?;

    tracing::info!("Wrote {} results to {}", results.len(), path.display());
    Ok(path)
}
