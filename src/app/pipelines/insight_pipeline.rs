use crate::app::pipelines::report_archive::write_archive;
use crate::core::report::{build_report, InsightReport};
use crate::core::{ConfigProvider, Pipeline, RegionRecord, RegionRepository, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Repository in, zip archive out.
pub struct InsightPipeline<R: RegionRepository, S: Storage, C: ConfigProvider> {
    pub(crate) repository: R,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<R: RegionRepository, S: Storage, C: ConfigProvider> InsightPipeline<R, S, C> {
    pub fn new(repository: R, storage: S, config: C) -> Self {
        Self {
            repository,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<R: RegionRepository, S: Storage, C: ConfigProvider> Pipeline for InsightPipeline<R, S, C> {
    async fn extract(&self) -> Result<Vec<RegionRecord>> {
        let regions = self.repository.list_regions().await?;
        tracing::debug!("Repository returned {} regions", regions.len());
        Ok(regions)
    }

    async fn transform(&self, regions: Vec<RegionRecord>) -> Result<InsightReport> {
        let analysis = self.config.analysis();
        analysis.validate()?;

        tracing::debug!(
            "Analysing {} regions for {}..{}",
            regions.len(),
            analysis.base_year,
            analysis.latest_year
        );
        Ok(build_report(&regions, analysis))
    }

    async fn load(&self, report: InsightReport) -> Result<String> {
        let archive_name = self.config.archive_name();
        let output_path = Path::new(self.config.output_path())
            .join(archive_name)
            .display()
            .to_string();

        let zip_data = write_archive(&report)?;

        // 保存ZIP文件
        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(archive_name, &zip_data).await?;

        tracing::debug!("ZIP file saved successfully");
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::toml_config::InsightConfig;
    use crate::core::insights::fixtures::{population_snapshot, region};
    use crate::utils::error::InsightError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                InsightError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn pipeline(
        config: InsightConfig,
    ) -> (InsightPipeline<InMemoryRepository, MockStorage, InsightConfig>, MockStorage) {
        let regions = vec![
            region(
                "AA",
                "Alpha",
                vec![population_snapshot(2000, 1_000_000), population_snapshot(2024, 1_200_000)],
            ),
            region(
                "BB",
                "Beta",
                vec![population_snapshot(2000, 1_000_000), population_snapshot(2024, 900_000)],
            ),
        ];
        let storage = MockStorage::new();
        let pipeline =
            InsightPipeline::new(InMemoryRepository::new(regions), storage.clone(), config);
        (pipeline, storage)
    }

    #[tokio::test]
    async fn test_extract_returns_repository_regions() {
        let (pipeline, _) = pipeline(InsightConfig::default());
        let regions = pipeline.extract().await.unwrap();
        assert_eq!(regions.len(), 2);
    }

    #[tokio::test]
    async fn test_transform_rejects_invalid_analysis() {
        let mut config = InsightConfig::default();
        config.analysis.sample_years = vec![2024];
        let (pipeline, _) = pipeline(config);

        let regions = pipeline.extract().await.unwrap();
        let err = pipeline.transform(regions).await.unwrap_err();
        assert!(matches!(err, InsightError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_load_writes_archive() {
        let mut config = InsightConfig::default();
        config.output.output_path = "reports".to_string();
        let (pipeline, storage) = pipeline(config);

        let regions = pipeline.extract().await.unwrap();
        let report = pipeline.transform(regions).await.unwrap();
        let path = pipeline.load(report).await.unwrap();

        assert_eq!(path, Path::new("reports").join("insights.zip").display().to_string());
        let data = storage.get_file("insights.zip").await.unwrap();
        assert!(data.starts_with(b"PK"));
        assert!(storage.read_file("missing.zip").await.is_err());
    }
}
