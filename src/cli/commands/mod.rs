//! CLI command implementations

pub mod cache;
pub mod config;
pub mod datasets;
pub mod fetch;
pub mod models;
pub mod predict;
pub mod show;

pub use cache::execute as cache;
pub use config::execute as config;
pub use datasets::execute as datasets;
pub use fetch::execute as fetch;
pub use models::execute as models;
pub use predict::execute as predict;
pub use show::execute as show;
