//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// qescope - inspect machine-translation quality-estimation predictions
///
/// Browses parallel sentence pairs, resolves model artifacts through a
/// local download cache, and renders per-token OK/BAD quality tags as
/// colored text.
#[derive(Parser, Debug)]
#[command(name = "qescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Model registry file
    #[arg(long, global = true, env = "QESCOPE_MODELS")]
    pub models: Option<PathBuf>,

    /// Dataset registry file
    #[arg(long, global = true, env = "QESCOPE_DATA")]
    pub data: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered models
    Models(ModelsArgs),

    /// List registered datasets
    Datasets(DatasetsArgs),

    /// Browse sentence pairs in a dataset
    Show(ShowArgs),

    /// Run quality estimation for a sentence pair
    Predict(PredictArgs),

    /// Resolve an artifact reference to a local path
    Fetch(FetchArgs),

    /// Show artifact cache contents
    Cache(CacheArgs),

    /// Show registry and cache locations
    Config,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the models command
#[derive(Parser, Debug)]
pub struct ModelsArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the datasets command
#[derive(Parser, Debug)]
pub struct DatasetsArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Dataset name (defaults to the built-in sample)
    pub dataset: Option<String>,

    /// Sentence pair to center on
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Rows of context shown around the current pair
    #[arg(short, long, default_value = "7")]
    pub context: usize,
}

/// Arguments for the predict command
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// Dataset name (defaults to the built-in sample)
    pub dataset: Option<String>,

    /// Sentence pair to predict
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Registered model whose artifact is resolved before predicting
    #[arg(short, long)]
    pub model: Option<String>,

    /// Edited source sentence, replacing the dataset row's
    #[arg(long)]
    pub source: Option<String>,

    /// Edited target sentence, replacing the dataset row's
    #[arg(long)]
    pub target: Option<String>,

    /// Also render source-side tags
    #[arg(long)]
    pub source_side: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Artifact reference: local path or http(s) URL
    pub reference: String,

    /// Re-download even if a cached copy exists
    #[arg(long)]
    pub force_refresh: bool,

    /// Continue an interrupted download from the bytes already on disk
    #[arg(long)]
    pub resume: bool,

    /// Never touch the network; use only cached entries
    #[arg(long)]
    pub offline: bool,

    /// Extract zip/tar archives and print the extraction directory
    #[arg(long)]
    pub extract: bool,

    /// Re-extract even into an already-populated directory
    #[arg(long, requires = "extract")]
    pub force_reextract: bool,

    /// Cache directory override
    #[arg(long, env = "QESCOPE_CACHE")]
    pub cache_root: Option<PathBuf>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Cache directory override
    #[arg(long, env = "QESCOPE_CACHE")]
    pub cache_root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_fetch() {
        let cli = Cli::parse_from([
            "qescope",
            "fetch",
            "https://example.org/model.zip",
            "--extract",
            "--resume",
        ]);
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.reference, "https://example.org/model.zip");
                assert!(args.extract);
                assert!(args.resume);
                assert!(!args.force_refresh);
            }
            _ => panic!("expected Fetch command"),
        }
    }

    #[test]
    fn force_reextract_requires_extract() {
        let result = Cli::try_parse_from([
            "qescope",
            "fetch",
            "https://example.org/model.zip",
            "--force-reextract",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_predict_overrides() {
        let cli = Cli::parse_from([
            "qescope",
            "predict",
            "--index",
            "3",
            "--target",
            "ein anderer Satz .",
        ]);
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.index, 3);
                assert_eq!(args.target.as_deref(), Some("ein anderer Satz ."));
                assert!(args.dataset.is_none());
            }
            _ => panic!("expected Predict command"),
        }
    }

    #[test]
    fn cli_parses_config() {
        let cli = Cli::parse_from(["qescope", "config"]);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::parse_from(["qescope", "cache", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
