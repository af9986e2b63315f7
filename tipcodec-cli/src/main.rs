use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tipcodec::{ExportOptions, JsonObjectStore, export_tooltips, import_tooltips};
use tipcodec_cli::validation::{ValidationContext, split_source, validate_context};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the tooltips of all matching object files to an exchange file.
    Export {
        /// Directory and file pattern of the object files, e.g. `objects/*.json`
        source: String,
        /// The exchange file to write
        output: String,
        /// Propose tooltips from captions and source expressions where none exist
        #[arg(short, long)]
        generate_tooltips: bool,
    },

    /// Merge the tooltips of an exchange file back into the object files.
    Import {
        /// Directory the exchange file's file names are relative to
        directory: PathBuf,
        /// The exchange file to read
        exchange: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let result = match args.commands {
        Commands::Export {
            source,
            output,
            generate_tooltips,
        } => run_export(&source, &output, generate_tooltips),
        Commands::Import {
            directory,
            exchange,
        } => run_import(directory, &exchange),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_export(source: &str, output: &str, generate_tooltips: bool) -> Result<(), String> {
    let (dir, pattern) = split_source(source)?;
    debug!("exporting {} from {}", pattern, dir.display());
    validate_context(
        &ValidationContext::new()
            .with_source_dir(&dir)
            .with_pattern(pattern.clone())
            .with_output_file(output.to_string()),
    )?;

    let options = ExportOptions::new()
        .with_pattern(pattern)
        .with_generate_tooltips(generate_tooltips);
    let summary = export_tooltips(&JsonObjectStore::new(), &dir, output, &options)
        .map_err(|e| e.to_string())?;

    println!(
        "{} object(s) with {} tooltip(s) processed.",
        summary.objects, summary.tooltips
    );
    if !summary.files_failed.is_empty() {
        warn!("{} file(s) could not be read", summary.files_failed.len());
    }
    Ok(())
}

fn run_import(directory: PathBuf, exchange: &str) -> Result<(), String> {
    validate_context(
        &ValidationContext::new()
            .with_source_dir(&directory)
            .with_input_file(exchange.to_string()),
    )?;

    let summary = import_tooltips(&JsonObjectStore::new(), &directory, exchange)
        .map_err(|e| e.to_string())?;

    println!(
        "{} object(s) with {} tooltip(s) processed.",
        summary.objects, summary.tooltips
    );
    if summary.skipped_records > 0 {
        warn!("{} line(s) skipped", summary.skipped_records);
    }
    if !summary.failed_files.is_empty() {
        return Err(format!(
            "{} file(s) could not be updated",
            summary.failed_files.len()
        ));
    }
    Ok(())
}
