pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemoryRepository, JsonDirectoryRepository};
pub use app::pipelines::insight_pipeline::InsightPipeline;
pub use config::{cli::LocalStorage, toml_config::InsightConfig};
pub use core::engine::InsightEngine;
pub use core::report::{build_report, AnalysisConfig, InsightReport};
pub use utils::error::{InsightError, Result};
