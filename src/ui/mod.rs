//! Terminal presentation: colored tag annotation and download progress
//!
//! Falls back to plain output in CI and non-interactive environments.

mod annotate;
mod context;
mod progress;

pub use annotate::{annotate_tokens, format_hter, probability_to_rgb};
pub use context::UiContext;
pub use progress::DownloadProgress;
