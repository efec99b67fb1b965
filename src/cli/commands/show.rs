//! Show command - browse sentence pairs with their gold annotations

use crate::cli::args::ShowArgs;
use crate::cli::commands::datasets::resolve_dataset;
use crate::error::{QescopeError, QescopeResult};
use crate::model::Tag;
use crate::ui::{annotate_tokens, format_hter, UiContext};
use console::style;
use std::path::Path;

/// Execute the show command
pub fn execute(args: ShowArgs, registry_path: Option<&Path>) -> QescopeResult<()> {
    let dataset = resolve_dataset(args.dataset.as_deref(), registry_path)?;
    if dataset.is_empty() {
        println!("Dataset {} is empty.", dataset.name);
        return Ok(());
    }

    let ctx = UiContext::detect();
    let index = args.index.min(dataset.len() - 1);
    let first = index.saturating_sub(args.context);
    let last = (index + args.context + 1).min(dataset.len());

    println!(
        "{} ({} sentence pairs)",
        style(&dataset.name).bold(),
        dataset.len()
    );
    println!();

    for i in first..last {
        let marker = if i == index {
            style(">").cyan().bold().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {:>4}  {}", marker, i, dataset.source_sentences[i]);
        println!("        {}", dataset.target_sentences[i]);
    }
    println!();

    // Gold annotation for the selected pair
    let tags = dataset
        .aligned_target_tags(index)?
        .iter()
        .map(|field| {
            Tag::parse(field).ok_or_else(|| QescopeError::DatasetInvalid {
                name: dataset.name.clone(),
                reason: format!("unknown tag '{}'", field),
            })
        })
        .collect::<QescopeResult<Vec<Tag>>>()?;
    let probabilities: Vec<f32> = tags
        .iter()
        .map(|tag| if *tag == Tag::Bad { 1.0 } else { 0.0 })
        .collect();
    let tokens: Vec<&str> = dataset.target_sentences[index].split_whitespace().collect();

    println!("{}", style("Gold target tags").bold());
    println!(
        "{}",
        annotate_tokens(&tokens, &tags, &probabilities, ctx.use_fancy_output())
    );
    println!("{}", format_hter(dataset.sentence_scores[index]));

    Ok(())
}
