//! Output module for the scraped product table
//!
//! This module handles:
//! - Accumulating product rows into a column-growing table
//! - Serializing the table to CSV
//! - Recording run statistics

mod csv_output;
pub mod stats;
mod table;

pub use csv_output::{write_csv, write_table, UTF8_BOM};
pub use stats::{print_statistics, ScrapeStatistics};
pub use table::{ProductRecord, ResultTable, FIXED_COLUMNS};
