//! Categories command handler.
//!
//! Prints the synthesized category list for the current user.

use clap::Args;
use launchpad_catalog::{default_category, visible_categories, FilterInput};
use launchpad_core::{AppConfig, AppResult};

use super::{load_catalog, open_preferences};

/// List the visible categories
#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Output as JSON, including document metadata
    #[arg(long)]
    pub json: bool,
}

impl CategoriesCommand {
    /// Execute the categories command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let document = load_catalog(config).await?;
        let prefs = open_preferences(config);

        let selected = default_category(&document);
        let input = FilterInput {
            selected_category: &selected,
            query: "",
            starred: prefs.starred(),
            member_groups: &config.groups,
        };

        let categories = visible_categories(&document, &input);

        if self.json {
            let output = serde_json::json!({
                "defaultCategory": selected,
                "categories": categories,
                "meta": document.meta,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        for category in &categories {
            let marker = if category.id == selected { " (default)" } else { "" };
            println!("{}\t{}{}", category.id, category.label, marker);
        }

        Ok(())
    }
}
