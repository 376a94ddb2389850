//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output,
//! progress tracking, and the end-of-run summary.

use crate::report::RunReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for sorting runs
/// - Summary tables with statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortphotos::output::OutputFormatter;
    /// OutputFormatter::success("All files sorted!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for a run over `total` candidates.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortphotos::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let template = "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Prints a per-candidate line above the progress bar.
    pub fn verbose(pb: &ProgressBar, message: &str) {
        pb.suspend(|| println!("  {}", message.dimmed()));
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints the end-of-run summary: files per destination folder, then every
    /// collision and failure with its reason.
    pub fn summary_table(report: &RunReport) {
        Self::header(if report.dry_run {
            "SUMMARY (dry run)"
        } else {
            "SUMMARY"
        });

        let counts = report.counts_by_folder();
        let width = counts.keys().map(String::len).max().unwrap_or(0).max(6);

        println!("{:<width$} | {}", "Folder".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));
        for (folder, count) in &counts {
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.placed.len().to_string().green().bold(),
            plural(report.placed.len()),
            width = width
        );

        if !report.collisions.is_empty() {
            Self::header("Skipped (destination already exists)");
            for failure in &report.collisions {
                println!("  {} {}", "⚠".yellow(), failure.reason);
            }
        }

        if !report.failures.is_empty() {
            Self::header("Failed");
            for failure in &report.failures {
                Self::error(&format!("{}: {}", failure.path.display(), failure.reason));
            }
        }

        if report.was_cancelled() {
            Self::warning(&format!(
                "Cancelled: {} {} not processed",
                report.not_processed.len(),
                plural(report.not_processed.len())
            ));
        }

        println!(
            "\n{} placed, {} skipped, {} failed",
            report.placed.len().to_string().green(),
            report.collisions.len().to_string().yellow(),
            report.failures.len().to_string().red()
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
