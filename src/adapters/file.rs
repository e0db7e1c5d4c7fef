use crate::domain::model::Plan;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Catalog read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads and parses a catalog file. Shared with the catalog server, which
/// re-reads the file on every request.
pub async fn read_catalog(path: &Path) -> Result<Vec<Plan>> {
    let data = tokio::fs::read(path).await?;
    let plans: Vec<Plan> = serde_json::from_slice(&data)?;
    Ok(plans)
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_all(&self) -> Result<Vec<Plan>> {
        tracing::debug!("Reading catalog file: {}", self.path.display());
        read_catalog(&self.path).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CompareError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_plan_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"tool":"windsurf","planName":"Pro","priceUsdMonthly":15,"billing":"monthly",
                 "bullets":["500 credits"],"url":"https://windsurf.com/pricing","tags":["best value"]}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let plans = source.fetch_all().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].plan_name, "Pro");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("nope.json"));
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, CompareError::IoError(_)));
    }

    #[tokio::test]
    async fn test_object_instead_of_array_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"plans": []}}"#).unwrap();

        let err = FileCatalogSource::new(file.path()).fetch_all().await.unwrap_err();
        assert!(matches!(err, CompareError::SerializationError(_)));
    }
}
