//! Output module for crawl results
//!
//! This module handles:
//! - Collecting results while workers run (`ResultSink`)
//! - Exporting results as CSV
//! - Summarizing a finished crawl

mod csv_export;
mod sink;
pub mod stats;

pub use csv_export::{
    export_file_name, export_results, write_results, write_results_csv, CSV_HEADER,
};
pub use sink::ResultSink;
pub use stats::{print_statistics, CrawlStatistics};
