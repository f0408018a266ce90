use crate::core::report::{AnalysisConfig, InsightReport};
use crate::domain::model::RegionRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of region records. The engine only depends on what it returns.
pub trait RegionRepository: Send + Sync {
    fn list_regions(&self) -> impl std::future::Future<Output = Result<Vec<RegionRecord>>> + Send;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings shared by every pipeline flavour.
pub trait ConfigProvider: Send + Sync {
    fn analysis(&self) -> &AnalysisConfig;
    fn output_path(&self) -> &str;
    fn archive_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RegionRecord>>;
    async fn transform(&self, regions: Vec<RegionRecord>) -> Result<InsightReport>;
    async fn load(&self, report: InsightReport) -> Result<String>;
}
