pub mod engine;
pub mod insights;
pub mod metrics;
pub mod report;
pub mod summary;
pub mod timeseries;

pub use crate::domain::model::{DerivedMetrics, RegionRecord, Unavailable};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RegionRepository, Storage};
pub use crate::utils::error::Result;
