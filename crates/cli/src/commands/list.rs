//! List command handler.
//!
//! Prints the visible tile grid for a category and search query.

use clap::Args;
use launchpad_catalog::{
    default_category, layout_rows, show_featured_tile, visible_tiles, FilterInput,
};
use launchpad_core::{AppConfig, AppResult};

use super::{load_catalog, open_preferences};

/// List the visible capability tiles
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Category to filter by (configured id, "all", "a-z" or "starred")
    #[arg(long)]
    pub category: Option<String>,

    /// Search query
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Tiles per row in the grid preview
    #[arg(long, default_value = "4")]
    pub per_row: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let document = load_catalog(config).await?;
        let prefs = open_preferences(config);

        let selected = self
            .category
            .clone()
            .unwrap_or_else(|| default_category(&document));

        let input = FilterInput {
            selected_category: &selected,
            query: &self.search,
            starred: prefs.starred(),
            member_groups: &config.groups,
        };

        let tiles = visible_tiles(&document, &input);
        tracing::debug!("{} tiles visible in category '{}'", tiles.len(), selected);

        if self.json {
            let items: Vec<serde_json::Value> = tiles
                .iter()
                .map(|tile| {
                    serde_json::json!({
                        "id": tile.capability.id,
                        "title": tile.capability.title,
                        "subtitle": tile.capability.subtitle,
                        "kind": tile.capability.kind,
                        "starred": prefs.is_starred(&tile.capability.id),
                        "matchedStage": tile.workflow_hit.as_ref().map(|hit| hit.stage_index),
                        "matchedPrompt": tile.workflow_hit.as_ref().and_then(|hit| hit.prompt_index),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        if let Some(featured) = &document.featured_tile {
            if show_featured_tile(featured, prefs.dismissed(), &input) {
                println!("Featured: {} [{}]", featured.title, featured.id);
                println!();
            }
        }

        if tiles.is_empty() {
            println!("No capabilities match.");
            return Ok(());
        }

        for row in layout_rows(tiles, self.per_row) {
            if row.is_empty() {
                continue;
            }

            let line = row
                .iter()
                .map(|tile| {
                    let star = if prefs.is_starred(&tile.capability.id) {
                        "* "
                    } else {
                        ""
                    };
                    format!("[{}{}]", star, tile.capability.title)
                })
                .collect::<Vec<_>>()
                .join(" ");

            println!("{}", line);
        }

        Ok(())
    }
}
