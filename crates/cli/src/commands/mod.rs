//! Command handlers for the Launchpad CLI.
//!
//! This module organizes all CLI commands into separate submodules and holds
//! the shared catalog/preference plumbing.

pub mod categories;
pub mod list;
pub mod select;
pub mod star;

// Re-export command types for convenience
pub use categories::CategoriesCommand;
pub use list::ListCommand;
pub use select::SelectCommand;
pub use star::{DismissCommand, StarCommand};

use launchpad_catalog::{
    load_document, CapabilityDocument, CatalogSource, FilePreferenceStore, UserPreferences,
};
use launchpad_core::{AppConfig, AppResult};

/// Load the capability document from the configured source.
///
/// With neither a file nor a URL configured, falls back to the explicit
/// empty document so commands still run.
pub(crate) async fn load_catalog(config: &AppConfig) -> AppResult<CapabilityDocument> {
    match CatalogSource::from_config(config) {
        Some(source) => load_document(&source).await,
        None => {
            tracing::warn!("No catalog configured; using the empty fallback document");
            Ok(CapabilityDocument::fallback())
        }
    }
}

/// Open the user's preferences from the data directory.
pub(crate) fn open_preferences(config: &AppConfig) -> UserPreferences {
    UserPreferences::load(Box::new(FilePreferenceStore::new(config.data_dir.clone())))
}
