use crate::core::budget::{BudgetRange, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP};
use crate::domain::model::ToolTable;
use crate::domain::ports::{CatalogLocation, ConfigProvider};
use crate::utils::error::{CompareError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_unique,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/plans";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub tools: ToolTable,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub step: Option<u32>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CompareError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CompareError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CompareError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Points the source at `raw`, replacing whatever the file configured.
    pub fn override_source(&mut self, raw: &str) {
        match CatalogLocation::parse(raw) {
            CatalogLocation::Http(endpoint) => {
                self.source.endpoint = Some(endpoint);
                self.source.path = None;
            }
            CatalogLocation::File(path) => {
                self.source.endpoint = None;
                self.source.path = Some(path.display().to_string());
            }
        }
    }

    /// Builds the slider range from the `[budget]` section, falling back to
    /// the defaults for missing keys.
    pub fn checked_budget_range(&self) -> Result<BudgetRange> {
        BudgetRange::new(
            self.budget.min.unwrap_or(DEFAULT_MIN),
            self.budget.max.unwrap_or(DEFAULT_MAX),
            self.budget.step.unwrap_or(DEFAULT_STEP),
        )
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.source.endpoint, &self.source.path) {
            (Some(_), Some(_)) => {
                return Err(CompareError::ConfigError {
                    message: "source.endpoint and source.path are mutually exclusive".to_string(),
                })
            }
            (Some(endpoint), None) => validate_url("source.endpoint", endpoint)?,
            (None, Some(path)) => validate_path("source.path", path)?,
            (None, None) => {}
        }

        if let Some(timeout) = self.source.timeout_seconds {
            if timeout == 0 {
                return Err(CompareError::InvalidConfigValueError {
                    field: "source.timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        if let Some(step) = self.budget.step {
            validate_positive_number("budget.step", step, 1)?;
        }
        self.checked_budget_range()?;

        if self.tools.is_empty() {
            return Err(CompareError::MissingConfigError {
                field: "tools".to_string(),
            });
        }
        for tool in self.tools.iter() {
            validate_non_empty_string("tools.id", &tool.id)?;
            validate_non_empty_string("tools.name", &tool.name)?;
        }
        validate_unique("tools.id", self.tools.iter().map(|t| t.id.as_str()))?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_location(&self) -> CatalogLocation {
        if let Some(path) = &self.source.path {
            return CatalogLocation::File(PathBuf::from(path));
        }
        CatalogLocation::Http(
            self.source
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        )
    }

    fn budget_range(&self) -> BudgetRange {
        self.checked_budget_range().unwrap_or_else(|e| {
            tracing::warn!("⚠️  Invalid budget range, using defaults: {}", e);
            BudgetRange::default()
        })
    }

    fn tools(&self) -> &ToolTable {
        &self.tools
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
