//! qescope - terminal inspector for MT quality-estimation predictions
//!
//! Resolves model artifacts through a concurrent-safe download cache
//! and renders per-token OK/BAD quality tags for parallel sentence
//! pairs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod ui;

pub use error::{QescopeError, QescopeResult};
