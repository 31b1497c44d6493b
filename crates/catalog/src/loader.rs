//! Catalog document loading.
//!
//! Loads the capability configuration document from an inline value, a local
//! JSON file, or a remote URL. Loading is idempotent; a failed load is retried
//! by simply calling it again.

use std::path::PathBuf;

use launchpad_core::{AppConfig, AppError, AppResult};

use crate::types::CapabilityDocument;

/// Where the capability document comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A document supplied directly by the caller
    Inline(CapabilityDocument),

    /// A local JSON file
    File(PathBuf),

    /// A JSON document fetched over HTTP
    Url(String),
}

impl CatalogSource {
    /// Derive the catalog source from the application configuration.
    ///
    /// A configured file takes precedence over a URL. Returns `None` when
    /// neither is configured — the explicit "no configuration" state.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        if let Some(ref file) = config.catalog_file {
            if config.catalog_url.is_some() {
                tracing::debug!("Both catalog file and URL configured; using the file");
            }
            return Some(Self::File(file.clone()));
        }

        config.catalog_url.as_ref().map(|url| Self::Url(url.clone()))
    }
}

/// Load and parse the capability document from a source.
pub async fn load_document(source: &CatalogSource) -> AppResult<CapabilityDocument> {
    let document = match source {
        CatalogSource::Inline(document) => document.clone(),

        CatalogSource::File(path) => {
            tracing::debug!("Loading catalog from file: {:?}", path);

            let contents = std::fs::read_to_string(path).map_err(|e| {
                AppError::Catalog(format!("Failed to read catalog file {:?}: {}", path, e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                AppError::Catalog(format!("Failed to parse catalog JSON {:?}: {}", path, e))
            })?
        }

        CatalogSource::Url(url) => {
            tracing::debug!("Fetching catalog from URL: {}", url);

            let response = reqwest::get(url)
                .await
                .map_err(|e| AppError::Catalog(format!("Failed to fetch catalog {}: {}", url, e)))?;

            if !response.status().is_success() {
                return Err(AppError::Catalog(format!(
                    "Catalog fetch returned status {} for {}",
                    response.status(),
                    url
                )));
            }

            response.json::<CapabilityDocument>().await.map_err(|e| {
                AppError::Catalog(format!("Failed to parse catalog JSON from {}: {}", url, e))
            })?
        }
    };

    check_document(&document);

    tracing::info!(
        "Loaded catalog: {} categories, {} capabilities",
        document.categories.len(),
        document.capabilities.len()
    );

    Ok(document)
}

/// Warn about document oddities without failing the load.
fn check_document(document: &CapabilityDocument) {
    let mut seen = std::collections::HashSet::new();

    for capability in &document.capabilities {
        if capability.id.is_empty() {
            tracing::warn!("Capability with empty id: '{}'", capability.title);
        }
        if !seen.insert(capability.id.as_str()) {
            tracing::warn!("Duplicate capability id: '{}'", capability.id);
        }
    }
}
