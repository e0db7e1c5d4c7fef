pub mod budget;
pub mod controller;
pub mod selection;

pub use crate::domain::model::{Budget, Plan, ToolEntry, ToolTable};
pub use crate::domain::ports::{CatalogLocation, CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
