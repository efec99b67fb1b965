//! qescope - inspect MT quality-estimation predictions
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use qescope::cli::{Cli, Commands};
use qescope::error::QescopeResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> QescopeResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("qescope=warn"),
        1 => EnvFilter::new("qescope=info"),
        _ => EnvFilter::new("qescope=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let models_path = cli.models.as_deref();
    let data_path = cli.data.as_deref();

    match cli.command {
        Commands::Models(args) => qescope::cli::commands::models(args, models_path),
        Commands::Datasets(args) => qescope::cli::commands::datasets(args, data_path),
        Commands::Show(args) => qescope::cli::commands::show(args, data_path),
        Commands::Predict(args) => qescope::cli::commands::predict(args, models_path, data_path),
        Commands::Fetch(args) => qescope::cli::commands::fetch(args),
        Commands::Cache(args) => qescope::cli::commands::cache(args),
        Commands::Config => qescope::cli::commands::config(models_path, data_path),
    }
}
