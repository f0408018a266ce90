use crate::core::report::AnalysisConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{InsightError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InsightConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub data_dir: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub archive_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            archive_name: "insights.zip".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl InsightConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightError::ProcessingError {
            message: format!("Invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn data_dir(&self) -> &str {
        &self.input.data_dir
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for InsightConfig {
    fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn archive_name(&self) -> &str {
        &self.output.archive_name
    }
}

impl Validate for InsightConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_path("input.data_dir", &self.input.data_dir)?;
        crate::utils::validation::validate_path("output.output_path", &self.output.output_path)?;
        crate::utils::validation::validate_non_empty_string(
            "output.archive_name",
            &self.output.archive_name,
        )?;

        if !self.output.archive_name.ends_with(".zip") {
            return Err(InsightError::InvalidConfigValueError {
                field: "output.archive_name".to_string(),
                value: self.output.archive_name.clone(),
                reason: "Archive name must end with .zip".to_string(),
            });
        }

        self.analysis.validate()
    }
}
