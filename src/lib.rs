pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{source_from_config, FileCatalogSource, HttpCatalogSource};
pub use app::render::{render, OutputFormat};
pub use config::{cli::LocalOutput, toml_config::TomlConfig};
pub use crate::core::budget::{BudgetInput, BudgetRange};
pub use crate::core::controller::{ComparisonController, ComparisonView, LoadStatus, ToolColumn};
pub use crate::core::selection::{partition_by_tool, select_affordable};
pub use domain::model::{Budget, Plan, ToolEntry, ToolTable};
pub use utils::error::{CompareError, Result};
