use crate::utils::error::Result;
use std::path::PathBuf;

/// Where a rendered comparison goes: a local file, or stdout when no path
/// is configured.
#[derive(Debug, Clone, Default)]
pub struct LocalOutput {
    path: Option<PathBuf>,
}

impl LocalOutput {
    pub fn new(path: Option<String>) -> Self {
        Self {
            path: path.map(PathBuf::from),
        }
    }

    pub fn stdout() -> Self {
        Self { path: None }
    }

    /// Writes `content` and returns a description of the destination.
    pub async fn write(&self, content: &str) -> Result<String> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::write(path, content).await?;
                tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
                Ok(path.display().to_string())
            }
            None => {
                use std::io::Write;
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
                Ok("stdout".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("plans.csv");

        let output = LocalOutput::new(Some(path.display().to_string()));
        let destination = output.write("tool,planName\n").await.unwrap();

        assert_eq!(destination, path.display().to_string());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "tool,planName\n");
    }

    #[tokio::test]
    async fn test_write_to_stdout() {
        let destination = LocalOutput::stdout().write("").await.unwrap();
        assert_eq!(destination, "stdout");
    }
}
