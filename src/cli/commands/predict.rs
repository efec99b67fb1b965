//! Predict command - run quality estimation for one sentence pair
//!
//! When a registered model is selected its artifact is resolved through
//! the cache first (downloading and extracting as needed). Prediction
//! itself replays gold annotations; plugging a real model runtime into
//! [`crate::model::QualityEstimator`] swaps that out.

use crate::cache::{self, ResolveOptions};
use crate::cli::args::{OutputFormat, PredictArgs};
use crate::cli::commands::{datasets::resolve_dataset, models};
use crate::error::QescopeResult;
use crate::model::{GoldEstimator, PredictionCache, Predictions};
use crate::ui::{annotate_tokens, format_hter, DownloadProgress, UiContext};
use console::style;
use std::path::Path;

/// Execute the predict command
pub fn execute(
    args: PredictArgs,
    models_path: Option<&Path>,
    data_path: Option<&Path>,
) -> QescopeResult<()> {
    let dataset = resolve_dataset(args.dataset.as_deref(), data_path)?;
    let index = args.index.min(dataset.len().saturating_sub(1));
    let source = args
        .source
        .or_else(|| dataset.source_sentences.get(index).cloned())
        .unwrap_or_default();
    let target = args
        .target
        .or_else(|| dataset.target_sentences.get(index).cloned())
        .unwrap_or_default();

    let ctx = UiContext::detect();

    if let Some(model_name) = &args.model {
        let registry = models::load(models_path)?;
        let entry = registry.get(model_name)?;

        let progress = DownloadProgress::new(&ctx, model_name);
        let options = ResolveOptions {
            resume_partial: true,
            extract_archive: true,
            ..ResolveOptions::default()
        };
        let local =
            cache::resolve_with_progress(&entry.url, &options, &mut |bytes| {
                progress.on_bytes(bytes)
            })?;
        progress.finish();

        println!(
            "{} {} ({}) at {}",
            style("Model:").bold(),
            model_name,
            entry.lp,
            local.display()
        );
    }

    let estimator = GoldEstimator::new(dataset);
    let mut prediction_cache = PredictionCache::new();
    let predictions = prediction_cache.predict_one(&estimator, &source, &target)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&predictions)?);
        }
        OutputFormat::Table | OutputFormat::Plain => {
            render(&ctx, &source, &target, &predictions, args.source_side);
        }
    }

    Ok(())
}

fn render(
    ctx: &UiContext,
    source: &str,
    target: &str,
    predictions: &Predictions,
    source_side: bool,
) {
    let color = ctx.use_fancy_output();

    if let Some(hter) = predictions.sentence_hter.first().copied().flatten() {
        println!("{}", format_hter(hter));
    }

    println!("{}", style("Target tags").bold());
    let target_row = predictions
        .target_tags
        .first()
        .zip(predictions.target_bad_probabilities.first());
    match target_row {
        Some((tags, probs)) if !tags.is_empty() => {
            let tokens: Vec<&str> = target.split_whitespace().collect();
            println!("{}", annotate_tokens(&tokens, tags, probs, color));
        }
        _ => println!("No target tags prediction"),
    }

    if source_side {
        println!("{}", style("Source tags").bold());
        let source_row = predictions
            .source_tags
            .as_ref()
            .and_then(|rows| rows.first())
            .zip(
                predictions
                    .source_bad_probabilities
                    .as_ref()
                    .and_then(|rows| rows.first()),
            );
        match source_row {
            Some((tags, probs)) if !tags.is_empty() => {
                let tokens: Vec<&str> = source.split_whitespace().collect();
                println!("{}", annotate_tokens(&tokens, tags, probs, color));
            }
            _ => println!("No source tags prediction"),
        }
    }
}
