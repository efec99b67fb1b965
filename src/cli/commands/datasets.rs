//! Datasets command - list registered datasets

use crate::cli::args::{DatasetsArgs, OutputFormat};
use crate::config::{self, DatasetRegistry};
use crate::data::{Dataset, BUILTIN_NAME};
use crate::error::QescopeResult;
use std::path::Path;

/// Load the dataset registry: an explicit path must exist, the default
/// path may be absent (empty registry).
pub(crate) fn load(registry_path: Option<&Path>) -> QescopeResult<DatasetRegistry> {
    match registry_path {
        Some(path) => DatasetRegistry::load(path),
        None => {
            let path = config::default_data_path();
            if path.exists() {
                DatasetRegistry::load(&path)
            } else {
                Ok(DatasetRegistry::default())
            }
        }
    }
}

/// Resolve a dataset name to loaded data. No name, or the built-in
/// sample's name, selects the embedded dataset.
pub(crate) fn resolve_dataset(
    name: Option<&str>,
    registry_path: Option<&Path>,
) -> QescopeResult<Dataset> {
    match name {
        None => Ok(Dataset::builtin()),
        Some(BUILTIN_NAME) => Ok(Dataset::builtin()),
        Some(name) => {
            let registry = load(registry_path)?;
            let entry = registry.get(name)?;
            Dataset::load(name, entry)
        }
    }
}

/// Execute the datasets command
pub fn execute(args: DatasetsArgs, registry_path: Option<&Path>) -> QescopeResult<()> {
    let registry = load(registry_path)?;

    match args.format {
        OutputFormat::Table => {
            println!("{:<20} SOURCE", "NAME");
            println!("{}", "-".repeat(72));
            println!("{:<20} (built-in sample, 10 pairs)", BUILTIN_NAME);
            for (name, entry) in &registry.datasets {
                println!("{:<20} {}", name, entry.source.display());
            }
            println!();
            println!("Total: {} dataset(s)", registry.datasets.len() + 1);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registry.datasets)?);
        }
        OutputFormat::Plain => {
            println!("{}", BUILTIN_NAME);
            for name in registry.datasets.keys() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
