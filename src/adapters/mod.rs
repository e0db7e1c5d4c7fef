// Adapters layer: concrete catalog sources and the catalog HTTP server.

pub mod file;
pub mod http;

#[cfg(feature = "server")]
pub mod catalog_server;

use crate::domain::ports::{CatalogLocation, CatalogSource, ConfigProvider};
use crate::utils::error::Result;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

/// Picks the source implementation for the configured location.
pub fn source_from_config<C: ConfigProvider>(config: &C) -> Result<Box<dyn CatalogSource>> {
    let source: Box<dyn CatalogSource> = match config.catalog_location() {
        CatalogLocation::Http(endpoint) => match config.request_timeout() {
            Some(timeout) => Box::new(HttpCatalogSource::with_timeout(endpoint, timeout)?),
            None => Box::new(HttpCatalogSource::new(endpoint)),
        },
        CatalogLocation::File(path) => Box::new(FileCatalogSource::new(path)),
    };
    tracing::debug!("Using catalog source: {}", source.describe());
    Ok(source)
}
