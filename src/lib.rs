//! sortphotos - sort media files into date-based folders
//!
//! This library scans a folder, derives a destination subpath for every file from
//! its creation time using one of several naming strategies, and moves each file
//! into place. Collisions are never overwritten and per-file failures do not stop
//! the rest of the run.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod output;
pub mod placer;
pub mod report;
pub mod scanner;
pub mod strategy;

pub use cancel::CancellationToken;
pub use config::{CandidateFilter, ConfigError, SortConfig};
pub use error::{SortError, SortResult};
pub use placer::{Placement, Placer};
pub use report::RunReport;
pub use scanner::{MediaRecord, scan_media};
pub use strategy::{Operation, RelativePath, Strategy};

pub use cli::{RunOptions, run_cli};
