//! Capability filter/sort pipeline.
//!
//! Derives the visible tile set and category list from the loaded document,
//! the selected category, the search query, and the caller's starred set and
//! group memberships. Pure functions, recomputed on demand after any input
//! changes.

use std::collections::HashSet;

use crate::types::{
    Capability, CapabilityDocument, Category, FeaturedTile, ALL_CATEGORY_ID, AZ_CATEGORY_ID,
    STARRED_CATEGORY_ID,
};

/// Inputs the pipeline reacts to.
#[derive(Debug, Clone)]
pub struct FilterInput<'a> {
    /// Selected category id (configured or synthetic)
    pub selected_category: &'a str,

    /// Free-text search query
    pub query: &'a str,

    /// Starred capability ids
    pub starred: &'a HashSet<String>,

    /// Group identifiers the caller belongs to
    pub member_groups: &'a [String],
}

/// Location of a search match inside a workflow capability.
///
/// Recorded so that opening the capability can pre-select the matched stage
/// and, when a prompt title matched, jump straight to that prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowHit {
    pub stage_index: usize,
    pub prompt_index: Option<usize>,
}

/// One visible tile.
#[derive(Debug, Clone)]
pub struct Tile<'a> {
    pub capability: &'a Capability,

    /// Present when the search query matched inside a workflow body
    pub workflow_hit: Option<WorkflowHit>,
}

enum SearchMatch {
    Miss,
    Direct,
    Workflow(WorkflowHit),
}

/// Compute the ordered set of tiles to display.
pub fn visible_tiles<'a>(
    document: &'a CapabilityDocument,
    input: &FilterInput<'_>,
) -> Vec<Tile<'a>> {
    let enabled: Vec<&Capability> = document
        .capabilities
        .iter()
        .filter(|capability| capability.enabled && capability.is_visible_to(input.member_groups))
        .collect();

    // Starred takes precedence as the full rendering when selected: the
    // starred subset of the enabled set in original order, ignoring search.
    if input.selected_category == STARRED_CATEGORY_ID {
        return enabled
            .into_iter()
            .filter(|capability| input.starred.contains(&capability.id))
            .map(|capability| Tile {
                capability,
                workflow_hit: None,
            })
            .collect();
    }

    let query = input.query.trim().to_lowercase();
    let mut tiles = Vec::new();

    for capability in enabled {
        if !matches_category(capability, input) {
            continue;
        }

        if query.is_empty() {
            tiles.push(Tile {
                capability,
                workflow_hit: None,
            });
            continue;
        }

        match search_match(capability, &query) {
            SearchMatch::Miss => {}
            SearchMatch::Direct => tiles.push(Tile {
                capability,
                workflow_hit: None,
            }),
            SearchMatch::Workflow(hit) => tiles.push(Tile {
                capability,
                workflow_hit: Some(hit),
            }),
        }
    }

    if input.selected_category == AZ_CATEGORY_ID {
        // Approximates the host UI's locale-aware comparison
        tiles.sort_by_key(|tile| tile.capability.title.to_lowercase());
    }

    tiles
}

/// Category membership: synthetic all/a-z match unconditionally; otherwise the
/// tag set must contain the selected category id.
fn matches_category(capability: &Capability, input: &FilterInput<'_>) -> bool {
    match input.selected_category {
        ALL_CATEGORY_ID | AZ_CATEGORY_ID => true,
        STARRED_CATEGORY_ID => input.starred.contains(&capability.id),
        category => capability.tags.iter().any(|tag| tag == category),
    }
}

/// Case-insensitive substring search over a capability.
///
/// Display text is checked first; workflow bodies are scanned in declaration
/// order and the first stage/prompt match wins, short-circuiting the rest of
/// the capability.
fn search_match(capability: &Capability, query: &str) -> SearchMatch {
    let direct = [
        Some(capability.title.as_str()),
        capability.subtitle.as_deref(),
        capability.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|text| text.to_lowercase().contains(query));

    if direct {
        return SearchMatch::Direct;
    }

    for (stage_index, stage) in capability.stages().iter().enumerate() {
        if stage.name.to_lowercase().contains(query) {
            return SearchMatch::Workflow(WorkflowHit {
                stage_index,
                prompt_index: None,
            });
        }

        for (prompt_index, prompt) in stage.prompts.iter().enumerate() {
            if prompt.title.to_lowercase().contains(query) {
                return SearchMatch::Workflow(WorkflowHit {
                    stage_index,
                    prompt_index: Some(prompt_index),
                });
            }
        }
    }

    SearchMatch::Miss
}

/// Synthesize the category list shown to the user.
///
/// Trending/all first, then A-Z, then every configured category that currently
/// has at least one enabled capability, then Starred last (only when at least
/// one starred capability exists).
pub fn visible_categories(document: &CapabilityDocument, input: &FilterInput<'_>) -> Vec<Category> {
    let enabled: Vec<&Capability> = document
        .capabilities
        .iter()
        .filter(|capability| capability.enabled && capability.is_visible_to(input.member_groups))
        .collect();

    let mut categories = vec![
        Category::synthetic(ALL_CATEGORY_ID, "Trending"),
        Category::synthetic(AZ_CATEGORY_ID, "A-Z"),
    ];

    for category in &document.categories {
        if categories.iter().any(|existing| existing.id == category.id) {
            continue;
        }
        if enabled
            .iter()
            .any(|capability| capability.tags.iter().any(|tag| *tag == category.id))
        {
            categories.push(category.clone());
        }
    }

    if enabled
        .iter()
        .any(|capability| input.starred.contains(&capability.id))
    {
        categories.push(Category::synthetic(STARRED_CATEGORY_ID, "Starred"));
    }

    categories
}

/// Category selected when the grid first renders: the first configured
/// category flagged as default, else the synthetic all category.
pub fn default_category(document: &CapabilityDocument) -> String {
    document
        .categories
        .iter()
        .find(|category| category.default)
        .map(|category| category.id.clone())
        .unwrap_or_else(|| ALL_CATEGORY_ID.to_string())
}

/// Whether the featured tile should be shown for the current view.
pub fn show_featured_tile(
    tile: &FeaturedTile,
    dismissed: &HashSet<String>,
    input: &FilterInput<'_>,
) -> bool {
    !dismissed.contains(&tile.id)
        && input.selected_category == ALL_CATEGORY_ID
        && input.query.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CapabilityAction, CapabilityKind, StagePrompt, Visibility, WorkflowStage};

    fn prompt_capability(id: &str, title: &str, tags: &[&str]) -> Capability {
        Capability {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            description: None,
            help_text: None,
            icon: None,
            color: None,
            kind: CapabilityKind::Prompt,
            action: CapabilityAction::Prompt {
                template: "Do {{thing}}".to_string(),
                model_id: None,
                auto_submit: false,
            },
            features: None,
            file_upload: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            visibility: None,
            examples: Vec::new(),
            enabled: true,
        }
    }

    fn workflow_capability(id: &str, title: &str) -> Capability {
        let mut capability = prompt_capability(id, title, &[]);
        capability.kind = CapabilityKind::Workflow;
        capability.action = CapabilityAction::Workflow {
            stages: vec![
                WorkflowStage {
                    id: "intake".to_string(),
                    name: "Intake".to_string(),
                    icon: None,
                    color: None,
                    prompts: vec![StagePrompt {
                        title: "Collect Details".to_string(),
                        template: "Collect {{details}}".to_string(),
                        features: None,
                        auto_submit: false,
                        model_id: None,
                        file_upload: None,
                    }],
                },
                WorkflowStage {
                    id: "invoicing".to_string(),
                    name: "Invoicing".to_string(),
                    icon: None,
                    color: None,
                    prompts: vec![StagePrompt {
                        title: "Generate Invoice".to_string(),
                        template: "Invoice {{client}}".to_string(),
                        features: None,
                        auto_submit: false,
                        model_id: None,
                        file_upload: None,
                    }],
                },
            ],
        };
        capability
    }

    fn document(capabilities: Vec<Capability>) -> CapabilityDocument {
        CapabilityDocument {
            categories: vec![
                Category {
                    id: "x".to_string(),
                    label: "X".to_string(),
                    default: false,
                },
                Category {
                    id: "y".to_string(),
                    label: "Y".to_string(),
                    default: false,
                },
            ],
            capabilities,
            featured_tile: None,
            meta: None,
        }
    }

    fn input<'a>(
        selected_category: &'a str,
        query: &'a str,
        starred: &'a HashSet<String>,
    ) -> FilterInput<'a> {
        FilterInput {
            selected_category,
            query,
            starred,
            member_groups: &[],
        }
    }

    #[test]
    fn test_category_membership() {
        let doc = document(vec![
            prompt_capability("a", "Alpha", &["x"]),
            prompt_capability("b", "Beta", &["y"]),
        ]);
        let starred = HashSet::new();

        let tiles = visible_tiles(&doc, &input("x", "", &starred));

        let ids: Vec<&str> = tiles.iter().map(|t| t.capability.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_disabled_and_restricted_capabilities_dropped() {
        let mut hidden = prompt_capability("h", "Hidden", &["x"]);
        hidden.enabled = false;

        let mut restricted = prompt_capability("r", "Restricted", &["x"]);
        restricted.visibility = Some(Visibility::Groups(vec!["finance".to_string()]));

        let mut open = prompt_capability("o", "Open", &["x"]);
        open.visibility = Some(Visibility::Everyone("all".to_string()));

        let doc = document(vec![hidden, restricted, open]);
        let starred = HashSet::new();

        let tiles = visible_tiles(&doc, &input(ALL_CATEGORY_ID, "", &starred));
        let ids: Vec<&str> = tiles.iter().map(|t| t.capability.id.as_str()).collect();
        assert_eq!(ids, vec!["o"]);

        let groups = vec!["finance".to_string()];
        let member = FilterInput {
            selected_category: ALL_CATEGORY_ID,
            query: "",
            starred: &starred,
            member_groups: &groups,
        };
        let tiles = visible_tiles(&doc, &member);
        let ids: Vec<&str> = tiles.iter().map(|t| t.capability.id.as_str()).collect();
        assert_eq!(ids, vec!["r", "o"]);
    }

    #[test]
    fn test_starred_category_ignores_search() {
        let doc = document(vec![
            prompt_capability("a", "Alpha", &["x"]),
            prompt_capability("b", "Beta", &["y"]),
        ]);
        let starred: HashSet<String> = ["a".to_string()].into_iter().collect();

        let tiles = visible_tiles(&doc, &input(STARRED_CATEGORY_ID, "beta", &starred));

        let ids: Vec<&str> = tiles.iter().map(|t| t.capability.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_search_matches_display_text() {
        let doc = document(vec![
            prompt_capability("a", "Draft email", &["x"]),
            prompt_capability("b", "Review code", &["x"]),
        ]);
        let starred = HashSet::new();

        let tiles = visible_tiles(&doc, &input(ALL_CATEGORY_ID, "EMAIL", &starred));

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].capability.id, "a");
        assert!(tiles[0].workflow_hit.is_none());
    }

    #[test]
    fn test_search_matches_workflow_stage_and_prompt() {
        let doc = document(vec![workflow_capability("billing", "Billing")]);
        let starred = HashSet::new();

        // Stage name match
        let tiles = visible_tiles(&doc, &input(ALL_CATEGORY_ID, "invoicing", &starred));
        assert_eq!(tiles.len(), 1);
        assert_eq!(
            tiles[0].workflow_hit,
            Some(WorkflowHit {
                stage_index: 1,
                prompt_index: None
            })
        );

        // Prompt title match records stage and prompt
        let tiles = visible_tiles(&doc, &input(ALL_CATEGORY_ID, "generate invoice", &starred));
        assert_eq!(
            tiles[0].workflow_hit,
            Some(WorkflowHit {
                stage_index: 1,
                prompt_index: Some(0)
            })
        );

        // First match in declaration order wins
        let tiles = visible_tiles(&doc, &input(ALL_CATEGORY_ID, "i", &starred));
        assert_eq!(
            tiles[0].workflow_hit,
            Some(WorkflowHit {
                stage_index: 0,
                prompt_index: None
            })
        );
    }

    #[test]
    fn test_search_and_category_combine_with_and() {
        let doc = document(vec![
            prompt_capability("a", "Draft email", &["x"]),
            prompt_capability("b", "Draft email", &["y"]),
        ]);
        let starred = HashSet::new();

        let tiles = visible_tiles(&doc, &input("y", "draft", &starred));

        let ids: Vec<&str> = tiles.iter().map(|t| t.capability.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_az_category_sorts_by_title() {
        let doc = document(vec![
            prompt_capability("z", "zeta", &["x"]),
            prompt_capability("a", "Alpha", &["y"]),
            prompt_capability("m", "midway", &[]),
        ]);
        let starred = HashSet::new();

        let tiles = visible_tiles(&doc, &input(AZ_CATEGORY_ID, "", &starred));

        let titles: Vec<&str> = tiles.iter().map(|t| t.capability.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "midway", "zeta"]);
    }

    #[test]
    fn test_category_synthesis() {
        let mut unused_tag = prompt_capability("u", "Unused", &["y"]);
        unused_tag.enabled = false;

        let doc = document(vec![prompt_capability("a", "Alpha", &["x"]), unused_tag]);
        let starred: HashSet<String> = ["a".to_string()].into_iter().collect();

        let categories = visible_categories(&doc, &input(ALL_CATEGORY_ID, "", &starred));

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        // "y" is absent: its only capability is disabled
        assert_eq!(ids, vec!["all", "a-z", "x", "starred"]);
    }

    #[test]
    fn test_starred_category_absent_without_stars() {
        let doc = document(vec![prompt_capability("a", "Alpha", &["x"])]);
        let starred = HashSet::new();

        let categories = visible_categories(&doc, &input(ALL_CATEGORY_ID, "", &starred));

        assert!(!categories.iter().any(|c| c.id == STARRED_CATEGORY_ID));
    }

    #[test]
    fn test_default_category() {
        let mut doc = document(vec![]);
        assert_eq!(default_category(&doc), ALL_CATEGORY_ID);

        doc.categories[1].default = true;
        assert_eq!(default_category(&doc), "y");
    }

    #[test]
    fn test_show_featured_tile() {
        let tile = FeaturedTile {
            id: "promo-1".to_string(),
            title: "New".to_string(),
            subtitle: None,
            description: None,
            icon: None,
            color: None,
            url: None,
        };
        let mut dismissed = HashSet::new();
        let starred = HashSet::new();

        assert!(show_featured_tile(
            &tile,
            &dismissed,
            &input(ALL_CATEGORY_ID, "", &starred)
        ));
        assert!(!show_featured_tile(
            &tile,
            &dismissed,
            &input(ALL_CATEGORY_ID, "query", &starred)
        ));
        assert!(!show_featured_tile(
            &tile,
            &dismissed,
            &input("x", "", &starred)
        ));

        dismissed.insert("promo-1".to_string());
        assert!(!show_featured_tile(
            &tile,
            &dismissed,
            &input(ALL_CATEGORY_ID, "", &starred)
        ));
    }
}
