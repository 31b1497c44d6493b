//! Star and dismiss command handlers.
//!
//! Mutate the persisted user preferences: the starred capability set and the
//! dismissed featured tile set.

use clap::Args;
use launchpad_core::{AppConfig, AppResult};

use super::open_preferences;

/// Star or unstar a capability
#[derive(Args, Debug)]
pub struct StarCommand {
    /// Capability id to toggle
    pub id: String,
}

impl StarCommand {
    /// Execute the star command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut prefs = open_preferences(config);

        if prefs.toggle_star(&self.id) {
            println!("Starred {}", self.id);
        } else {
            println!("Unstarred {}", self.id);
        }

        Ok(())
    }
}

/// Dismiss the featured tile
#[derive(Args, Debug)]
pub struct DismissCommand {
    /// Featured tile id to dismiss
    pub id: String,
}

impl DismissCommand {
    /// Execute the dismiss command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut prefs = open_preferences(config);
        prefs.dismiss_featured(&self.id);

        println!("Dismissed {}", self.id);
        Ok(())
    }
}
