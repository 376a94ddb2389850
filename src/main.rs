use clap::Parser;
use sortphotos::cli::{RunOptions, run_cli};
use sortphotos::output::OutputFormatter;
use sortphotos::{CancellationToken, Operation};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sortphotos",
    version,
    about = "Sort media files into folders by creation date",
    after_help = operations_help()
)]
struct Cli {
    /// Sorting operation (case-insensitive), see the list below
    operation: String,

    /// Folder of media files to sort
    src_folder: PathBuf,

    /// Output folder (default: the input folder)
    #[arg(long = "out_folder", visible_alias = "out-folder")]
    out_folder: Option<PathBuf>,

    /// Print one line per file
    #[arg(long)]
    verbose: bool,

    /// Show where files would go without moving anything
    #[arg(long)]
    dry_run: bool,

    /// Configuration file (default: ./.sortphotosrc.toml or ~/.config/sortphotos/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn operations_help() -> String {
    let mut help = String::from("Operations:\n");
    for op in Operation::ALL {
        help.push_str(&format!("  {:<27} {}\n", op.name(), op.description()));
    }
    help
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        OutputFormatter::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    let options = RunOptions {
        operation: cli.operation,
        src_folder: cli.src_folder,
        out_folder: cli.out_folder,
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        quiet: cli.json,
        config_path: cli.config,
    };

    let report = match run_cli(&options, &cancel) {
        Ok(report) => report,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                OutputFormatter::error(&format!("Could not serialize report: {}", e));
                return ExitCode::FAILURE;
            }
        }
    } else {
        OutputFormatter::summary_table(&report);
        if report.is_complete_success() {
            OutputFormatter::success(if report.dry_run {
                "Dry run complete. No files were modified."
            } else {
                "All files sorted."
            });
        }
    }

    if report.is_complete_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
