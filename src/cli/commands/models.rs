//! Models command - list registered models

use crate::cli::args::{ModelsArgs, OutputFormat};
use crate::config::{self, ModelRegistry};
use crate::error::QescopeResult;
use std::path::Path;

/// Load the model registry: an explicit path must exist, the default
/// path may be absent (empty registry).
pub(crate) fn load(registry_path: Option<&Path>) -> QescopeResult<ModelRegistry> {
    match registry_path {
        Some(path) => ModelRegistry::load(path),
        None => {
            let path = config::default_models_path();
            if path.exists() {
                ModelRegistry::load(&path)
            } else {
                Ok(ModelRegistry::default())
            }
        }
    }
}

/// Execute the models command
pub fn execute(args: ModelsArgs, registry_path: Option<&Path>) -> QescopeResult<()> {
    let registry = load(registry_path)?;

    if registry.models.is_empty() {
        println!("No models registered.");
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            println!("{:<20} {:<8} URL", "NAME", "LP");
            println!("{}", "-".repeat(72));
            for (name, entry) in &registry.models {
                println!("{:<20} {:<8} {}", name, entry.lp, entry.url);
            }
            println!();
            println!("Total: {} model(s)", registry.models.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registry.models)?);
        }
        OutputFormat::Plain => {
            for name in registry.models.keys() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
