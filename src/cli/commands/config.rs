//! Config command - show registry and cache locations

use crate::config;
use crate::error::QescopeResult;
use console::style;
use std::path::Path;

fn presence(path: &Path) -> String {
    if path.exists() {
        String::new()
    } else {
        style(" (missing)").dim().to_string()
    }
}

/// Execute the config command
pub fn execute(models_path: Option<&Path>, data_path: Option<&Path>) -> QescopeResult<()> {
    let models = models_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_models_path);
    let data = data_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_data_path);
    let cache_root = config::default_cache_root();

    println!(
        "{:<18} {}{}",
        "Model registry:",
        models.display(),
        presence(&models)
    );
    println!(
        "{:<18} {}{}",
        "Dataset registry:",
        data.display(),
        presence(&data)
    );
    println!(
        "{:<18} {}{}",
        "Cache root:",
        cache_root.display(),
        presence(&cache_root)
    );

    Ok(())
}
