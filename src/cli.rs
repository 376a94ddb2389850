//! Command-line orchestration for sortphotos.
//!
//! This module handles:
//! - Up-front validation of the operation and source folder
//! - Configuration loading
//! - Running the scan → output folder → place pipeline with per-file error isolation
//! - Progress and verbose output

use crate::cancel::CancellationToken;
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::output::OutputFormatter;
use crate::placer::{Placer, ensure_dir_chain};
use crate::report::RunReport;
use crate::scanner::{MediaRecord, scan_media};
use crate::strategy::Operation;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a single run needs, passed explicitly through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Operation name, matched case-insensitively.
    pub operation: String,
    pub src_folder: PathBuf,
    /// Destination root; defaults to `src_folder`.
    pub out_folder: Option<PathBuf>,
    /// Print one line per candidate.
    pub verbose: bool,
    /// Plan placements without touching the filesystem.
    pub dry_run: bool,
    /// Suppress human-readable output (the caller prints JSON instead).
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
}

/// Runs one sorting pass and returns its report.
///
/// Validation happens before anything is created or moved: an unknown
/// operation yields [`SortError::InvalidOperation`], a missing or non-directory
/// source yields [`SortError::InvalidSource`], and a broken configuration or a
/// failed scan abort the run too, before the output folder is created. Once placement starts, per-file errors are
/// collected into the report and the remaining files are still processed.
///
/// # Examples
///
/// ```no_run
/// use sortphotos::cancel::CancellationToken;
/// use sortphotos::cli::{RunOptions, run_cli};
///
/// let options = RunOptions {
///     operation: "num_day_nest".to_string(),
///     src_folder: "/path/to/photos".into(),
///     ..Default::default()
/// };
/// match run_cli(&options, &CancellationToken::new()) {
///     Ok(report) => println!("{} files placed", report.placed.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(options: &RunOptions, cancel: &CancellationToken) -> SortResult<RunReport> {
    let operation: Operation = options.operation.parse()?;
    let src_folder = validate_source(&options.src_folder)?;

    let filter = SortConfig::load(options.config_path.as_deref())?.compile()?;
    let records = scan_media(&src_folder, &filter)?;
    let out_folder = prepare_output(options.out_folder.as_deref(), &src_folder, options)?;

    if !options.quiet {
        OutputFormatter::info(&format!("Input dir: {}", src_folder.display()));
        OutputFormatter::info(&format!("Out dir: {}", out_folder.display()));
        OutputFormatter::info(&format!(
            "Running operation: {} ({})",
            operation,
            operation.description()
        ));
        if options.dry_run {
            OutputFormatter::dry_run_notice("No files will be moved.");
        }
    }

    let placer = Placer::new(out_folder, operation.strategy()).dry_run(options.dry_run);

    Ok(sort_media(records, &placer, operation, options, cancel))
}

/// Places every record, isolating failures per file.
///
/// The cancellation token is checked before each record; once it trips, the
/// remaining records are listed in [`RunReport::not_processed`].
pub fn sort_media(
    records: Vec<MediaRecord>,
    placer: &Placer,
    operation: Operation,
    options: &RunOptions,
    cancel: &CancellationToken,
) -> RunReport {
    let mut report = RunReport::new(operation.name(), options.dry_run);
    let verbose = options.verbose && !options.quiet;

    let pb = if options.quiet {
        ProgressBar::hidden()
    } else {
        OutputFormatter::create_progress_bar(records.len() as u64)
    };

    let mut records = records.into_iter();
    for record in records.by_ref() {
        if cancel.is_cancelled() {
            report.not_processed.push(record.source_path);
            break;
        }

        pb.set_message(record.name.clone());
        match placer.place(&record) {
            Ok(placement) => {
                if verbose {
                    let verb = if placement.moved { "Moved" } else { "Would move" };
                    OutputFormatter::verbose(
                        &pb,
                        &format!("{} {} to {}/", verb, record.name, placement.relative),
                    );
                }
                report.placed.push(placement);
            }
            Err(e) => {
                if verbose {
                    OutputFormatter::verbose(&pb, &format!("Skipped {}: {}", record.name, e));
                }
                report.record_error(record.source_path, &e);
            }
        }
        pb.inc(1);
    }
    report
        .not_processed
        .extend(records.map(|record| record.source_path));

    pb.finish_and_clear();
    report
}

/// Resolves the source folder to an absolute directory path.
fn validate_source(src_folder: &Path) -> SortResult<PathBuf> {
    let resolved = fs::canonicalize(src_folder).map_err(|e| SortError::InvalidSource {
        path: src_folder.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !resolved.is_dir() {
        return Err(SortError::InvalidSource {
            path: src_folder.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(resolved)
}

/// Resolves the destination root, creating it unless this is a dry run.
fn prepare_output(
    out_folder: Option<&Path>,
    src_folder: &Path,
    options: &RunOptions,
) -> SortResult<PathBuf> {
    let Some(out_folder) = out_folder else {
        return Ok(src_folder.to_path_buf());
    };

    if !out_folder.is_dir() {
        if options.dry_run {
            return std::path::absolute(out_folder).map_err(|e| SortError::io(out_folder, e));
        }
        if !options.quiet {
            OutputFormatter::info("Creating output directory...");
        }
        ensure_dir_chain(out_folder)?;
    }

    fs::canonicalize(out_folder).map_err(|e| SortError::io(out_folder, e))
}
