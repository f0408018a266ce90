pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::InsightConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pop-insights")]
#[command(about = "Ranks regions by demographic growth, aging and gender patterns")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding one JSON file per region
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub base_year: Option<i32>,

    #[arg(long)]
    pub latest_year: Option<i32>,

    #[arg(long, value_delimiter = ',')]
    pub sample_years: Vec<i32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Load and analyse without writing the report
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取設定檔（若有）並套用命令列覆蓋
    pub fn load(&self) -> Result<InsightConfig> {
        let mut config = match &self.config {
            Some(path) => InsightConfig::from_file(path)?,
            None => InsightConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut InsightConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.input.data_dir = data_dir.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output.output_path = output_path.clone();
        }
        if let Some(base_year) = self.base_year {
            config.analysis.base_year = base_year;
        }
        if let Some(latest_year) = self.latest_year {
            config.analysis.latest_year = latest_year;
        }
        if !self.sample_years.is_empty() {
            config.analysis.sample_years = self.sample_years.clone();
        }
    }

    pub fn verbose_logging(&self, config: &InsightConfig) -> bool {
        self.verbose || config.verbose_logging()
    }

    pub fn json_logging(&self, config: &InsightConfig) -> bool {
        self.json_logs || config.json_logging()
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_defaults_without_config_file() {
        let cli = CliConfig::try_parse_from(["pop-insights"]).unwrap();
        let config = cli.load().unwrap();

        assert_eq!(config, InsightConfig::default());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_overrides() {
        let cli = CliConfig::try_parse_from([
            "pop-insights",
            "--data-dir",
            "/data/countries",
            "--output-path",
            "/tmp/out",
            "--base-year",
            "1990",
            "--sample-years",
            "1990,2000,2010",
            "--json-logs",
        ])
        .unwrap();
        let config = cli.load().unwrap();

        assert_eq!(config.data_dir(), "/data/countries");
        assert_eq!(config.output_path(), "/tmp/out");
        assert_eq!(config.analysis.base_year, 1990);
        assert_eq!(config.analysis.latest_year, 2024);
        assert_eq!(config.analysis.sample_years, vec![1990, 2000, 2010]);
        assert!(cli.json_logging(&config));
        assert!(!cli.verbose_logging(&config));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let cli = CliConfig::try_parse_from(["pop-insights", "--config", "/nonexistent/pop.toml"])
            .unwrap();
        assert!(matches!(
            cli.load(),
            Err(crate::utils::error::InsightError::IoError(_))
        ));
    }
}
