use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct InsightEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> InsightEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting insight run");

        // Extract
        let regions = self.pipeline.extract().await?;
        tracing::info!("Loaded {} regions", regions.len());

        // Transform
        let report = self.pipeline.transform(regions).await?;
        tracing::info!(
            "Built report: {} summaries, {} growth patterns, {} milestones",
            report.summaries.len(),
            report.growth_patterns.len(),
            report.milestones.len()
        );

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📁 Report saved to: {}", output_path);

        Ok(output_path)
    }
}
