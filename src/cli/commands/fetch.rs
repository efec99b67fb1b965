//! Fetch command - resolve an artifact reference through the cache

use crate::cache::{self, ResolveOptions};
use crate::cli::args::FetchArgs;
use crate::error::QescopeResult;
use crate::ui::{DownloadProgress, UiContext};
use std::path::Path;

/// Execute the fetch command
pub fn execute(args: FetchArgs) -> QescopeResult<()> {
    let ctx = UiContext::detect();
    let label = Path::new(&args.reference)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.reference.clone());
    let progress = DownloadProgress::new(&ctx, &label);

    let options = ResolveOptions {
        cache_root: args.cache_root,
        force_refresh: args.force_refresh,
        resume_partial: args.resume,
        offline_only: args.offline,
        extract_archive: args.extract,
        force_reextract: args.force_reextract,
    };

    let resolved = cache::resolve_with_progress(&args.reference, &options, &mut |bytes| {
        progress.on_bytes(bytes)
    });
    progress.finish();

    println!("{}", resolved?.display());
    Ok(())
}
