//! Capability catalog for the Launchpad engine.
//!
//! This crate provides the capability grid's data side:
//! - JSON configuration document types and loading (inline, file, URL)
//! - The filter/sort pipeline deriving visible tiles and categories
//! - Tile row layout
//! - Starred/dismissed preference persistence

pub mod filter;
pub mod layout;
pub mod loader;
pub mod prefs;
pub mod types;

// Re-export main types
pub use filter::{
    default_category, show_featured_tile, visible_categories, visible_tiles, FilterInput, Tile,
    WorkflowHit,
};
pub use layout::{layout_rows, DISPLAY_ROWS};
pub use loader::{load_document, CatalogSource};
pub use prefs::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, UserPreferences, DISMISSED_KEY,
    STARRED_KEY,
};
pub use types::{
    Capability, CapabilityAction, CapabilityDocument, CapabilityKind, Category, DocumentMeta,
    FeatureFlags, FeaturedTile, FileUploadSpec, StagePrompt, Visibility, WorkflowStage,
    ALL_CATEGORY_ID, AZ_CATEGORY_ID, STARRED_CATEGORY_ID,
};
