use crate::core::budget::BudgetRange;
use crate::domain::model::{Plan, ToolTable};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Read-only access to the full plan catalog.
///
/// Implementations fail on transport errors, non-success statuses and
/// payloads that are not a plan array. A partial catalog is never returned.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Plan>>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Box<S> {
    async fn fetch_all(&self) -> Result<Vec<Plan>> {
        (**self).fetch_all().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Http(String),
    File(PathBuf),
}

impl CatalogLocation {
    /// `http://` and `https://` locations are endpoints, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogLocation::Http(raw.trim().to_string())
        } else {
            CatalogLocation::File(PathBuf::from(raw.trim()))
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_location(&self) -> CatalogLocation;
    fn budget_range(&self) -> BudgetRange;
    fn tools(&self) -> &ToolTable;
    fn request_timeout(&self) -> Option<Duration>;
}
