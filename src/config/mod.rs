pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::{CompareError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "plan-compare")]
#[command(about = "Compare AI coding-assistant plans that fit a monthly budget")]
pub struct CliConfig {
    /// Catalog location: an http(s) endpoint or a local JSON file
    #[arg(long, env = "PLAN_COMPARE_SOURCE")]
    pub source: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Monthly budget in whole dollars (defaults to the range minimum)
    #[arg(short, long, allow_negative_numbers = true)]
    pub budget: Option<i64>,

    #[arg(long)]
    pub min: Option<u32>,

    #[arg(long)]
    pub max: Option<u32>,

    #[arg(long)]
    pub step: Option<u32>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the rendered comparison to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Read budget commands from stdin and re-render after each one
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the configuration file (if any), applies command-line
    /// overrides on top, and validates the result.
    pub fn resolve(&self) -> Result<TomlConfig> {
        if self.interactive && self.output.is_some() {
            return Err(CompareError::ConfigError {
                message: "--output cannot be combined with --interactive".to_string(),
            });
        }

        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(source) = &self.source {
            config.override_source(source);
        }
        if let Some(min) = self.min {
            config.budget.min = Some(min);
        }
        if let Some(max) = self.max {
            config.budget.max = Some(max);
        }
        if let Some(step) = self.step {
            config.budget.step = Some(step);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::budget::BudgetRange;
    use crate::domain::ports::{CatalogLocation, ConfigProvider};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_defaults() {
        let cli = CliConfig::try_parse_from(["plan-compare"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.interactive);

        let config = cli.resolve().unwrap();
        assert_eq!(config.budget_range(), BudgetRange::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[source]\nendpoint = \"http://localhost:3000/api/plans\"\n[budget]\nmax = 100\n")
            .unwrap();
        let path = file.path().display().to_string();

        let cli = CliConfig::try_parse_from([
            "plan-compare",
            "--config",
            path.as_str(),
            "--source",
            "data/plans.json",
            "--step",
            "20",
            "--format",
            "csv",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();

        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(
            config.catalog_location(),
            CatalogLocation::File("data/plans.json".into())
        );
        assert_eq!(config.budget_range(), BudgetRange::new(0, 100, 20).unwrap());
    }

    #[test]
    fn test_cli_accepts_negative_budget_for_later_rejection() {
        let cli = CliConfig::try_parse_from(["plan-compare", "--budget", "-10"]).unwrap();
        assert_eq!(cli.budget, Some(-10));
    }

    #[test]
    fn test_cli_rejects_output_file_in_interactive_mode() {
        let cli = CliConfig::try_parse_from(["plan-compare", "-i", "--output", "plans.txt"]).unwrap();
        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, CompareError::ConfigError { .. }));
        assert!(err.to_string().contains("--interactive"));

        let cli = CliConfig::try_parse_from(["plan-compare", "--output", "plans.txt"]).unwrap();
        assert!(cli.resolve().is_ok());
    }

    #[test]
    fn test_cli_invalid_range_fails_resolution() {
        let cli = CliConfig::try_parse_from(["plan-compare", "--min", "50", "--max", "10"]).unwrap();
        assert!(cli.resolve().is_err());
    }
}
