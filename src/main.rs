use clap::Parser;
use pop_insights::core::insights::extremes::{extreme_for, ExtremeMetric};
use pop_insights::core::Pipeline;
use pop_insights::utils::error::{ErrorSeverity, InsightError};
use pop_insights::utils::{logger, validation::Validate};
use pop_insights::{
    CliConfig, InsightConfig, InsightEngine, InsightPipeline, InsightReport,
    JsonDirectoryRepository, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置（設定檔可能決定日誌格式，所以先載入再初始化日誌）
    let loaded = cli.load();
    let (verbose, json_logs) = match &loaded {
        Ok(config) => (cli.verbose_logging(config), cli.json_logging(config)),
        Err(_) => (cli.verbose, cli.json_logs),
    };

    // 初始化日誌
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting pop-insights");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loading configuration from: {}", path);
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Effective config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &cli);

    // 創建資料來源、存儲和管道
    let repository = JsonDirectoryRepository::new(config.data_dir());
    let storage = LocalStorage::new(config.output.output_path.clone());
    let pipeline = InsightPipeline::new(repository, storage, config);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - report will not be written");
        return match perform_dry_run(&pipeline).await {
            Ok(()) => Ok(()),
            Err(e) => exit_with(e),
        };
    }

    let engine = InsightEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Insight report completed successfully!");
            println!("✅ Insight report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn display_config_summary(config: &InsightConfig, cli: &CliConfig) {
    let analysis = &config.analysis;

    println!("📋 Configuration Summary:");
    println!("  Data: {}", config.data_dir());
    println!("  Output: {}/{}", config.output.output_path, config.output.archive_name);
    println!("  Window: {} -> {}", analysis.base_year, analysis.latest_year);
    println!("  Sample years: {:?}", analysis.sample_years);
    println!("  Neighbor pairs: {}", analysis.neighbors.len());
    println!("  Milestone unit: {}", analysis.milestone_unit);

    if cli.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> pop_insights::Result<()> {
    let regions = pipeline.extract().await?;
    let report = pipeline.transform(regions).await?;
    print_headlines(&report);
    Ok(())
}

fn print_headlines(report: &InsightReport) {
    println!("🔍 Dry Run Analysis:");
    println!("  Regions loaded: {}", report.region_count);
    println!("  Regions with both endpoints: {}", report.summaries.len());

    if let Some(growth) = extreme_for(&report.extremes, ExtremeMetric::GrowthRate) {
        println!("  📈 Fastest growth: {} ({:+.2}%)", growth.max.name, growth.max.value);
        println!("  📉 Slowest growth: {} ({:+.2}%)", growth.min.name, growth.min.value);
    }
    if let Some(age) = extreme_for(&report.extremes, ExtremeMetric::AgeChange) {
        println!("  👴 Steepest aging: {} ({:+.1} years)", age.max.name, age.max.value);
    }

    println!("  Milestone crossings: {}", report.milestones.len());
    println!("  Neighbor contrasts: {}", report.neighbor_contrasts.len());
    println!("  Growth gaps: {}", report.growth_gaps.len());
}

fn exit_with(e: InsightError) -> anyhow::Result<()> {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Insight run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 重試錯誤
        ErrorSeverity::High => 1,     // 處理錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
