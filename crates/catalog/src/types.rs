//! Capability catalog types.
//!
//! This module defines the domain entities for the capability grid, loaded
//! wholesale from a JSON configuration document and immutable for the rest of
//! the session.

use serde::{Deserialize, Serialize};

/// Identifier of the synthetic "Trending"/all category.
pub const ALL_CATEGORY_ID: &str = "all";

/// Identifier of the synthetic alphabetical category.
pub const AZ_CATEGORY_ID: &str = "a-z";

/// Identifier of the synthetic starred category.
pub const STARRED_CATEGORY_ID: &str = "starred";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityDocument {
    /// Configured categories, in display order
    #[serde(default)]
    pub categories: Vec<Category>,

    /// All capability tiles
    #[serde(default)]
    pub capabilities: Vec<Capability>,

    /// Optional promotional tile
    #[serde(rename = "featuredTile", default, skip_serializing_if = "Option::is_none")]
    pub featured_tile: Option<FeaturedTile>,

    /// Document metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

impl CapabilityDocument {
    /// Fallback document for the "no configuration" state.
    ///
    /// Carries zero capabilities; the synthetic Trending category is injected
    /// by the category synthesis step like for any other document.
    pub fn fallback() -> Self {
        Self::default()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

/// A selectable capability category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Selected by default when the grid first renders
    #[serde(default)]
    pub default: bool,
}

impl Category {
    /// Create a runtime-injected synthetic category (never persisted).
    pub fn synthetic(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            default: false,
        }
    }
}

/// Kind of a capability tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Prompt,
    Form,
    Link,
    App,
    Agent,
    Model,
    Workflow,
}

/// What selecting a capability does.
///
/// Exactly one variant is carried per capability; route/url payloads are
/// optional and selection is a no-op when they are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CapabilityAction {
    /// Start a chat pinned to a specific model
    Model {
        #[serde(rename = "modelId")]
        model_id: String,
    },

    /// Send or collect a templated prompt
    Prompt {
        template: String,

        #[serde(rename = "modelId", default, skip_serializing_if = "Option::is_none")]
        model_id: Option<String>,

        #[serde(rename = "autoSubmit", default)]
        auto_submit: bool,
    },

    /// Navigate to an in-app route
    Route {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        route: Option<String>,
    },

    /// Open an external URL
    Url {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },

    /// Open a multi-stage workflow
    Workflow {
        #[serde(default)]
        stages: Vec<WorkflowStage>,
    },
}

/// Feature toggles attached to a capability or stage prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(rename = "webSearch", default)]
    pub web_search: bool,

    #[serde(rename = "imageGeneration", default)]
    pub image_generation: bool,

    #[serde(rename = "codeExecution", default)]
    pub code_execution: bool,

    /// Knowledge collections tagged onto emitted prompts
    #[serde(rename = "knowledgeCollections", default)]
    pub knowledge_collections: Vec<String>,
}

/// File upload requirements for a capability or stage prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileUploadSpec {
    /// Submission is blocked until at least one file is attached
    #[serde(default)]
    pub required: bool,

    /// Accepted file extensions or MIME types
    #[serde(default)]
    pub accept: Vec<String>,
}

/// Who can see a capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    /// The sentinel string `all`
    Everyone(String),

    /// Restricted to members of at least one listed group
    Groups(Vec<String>),
}

impl Visibility {
    /// Check whether a caller with the given group memberships passes.
    pub fn allows(&self, member_groups: &[String]) -> bool {
        match self {
            Self::Everyone(_) => true,
            Self::Groups(groups) => groups.iter().any(|group| member_groups.contains(group)),
        }
    }
}

/// A single promotional tile, independently dismissible by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedTile {
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One stage of a workflow capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Selectable prompts in this stage, in declaration order
    #[serde(default)]
    pub prompts: Vec<StagePrompt>,
}

/// A selectable prompt inside a workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagePrompt {
    pub title: String,

    /// Prompt template with `{{...}}` placeholders
    pub template: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureFlags>,

    #[serde(rename = "autoSubmit", default)]
    pub auto_submit: bool,

    #[serde(rename = "modelId", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    #[serde(rename = "fileUpload", default, skip_serializing_if = "Option::is_none")]
    pub file_upload: Option<FileUploadSpec>,
}

/// A single user-selectable capability tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    /// Unique capability identifier
    pub id: String,

    /// Tile title
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "helpText", default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Tile kind
    #[serde(rename = "capabilityType")]
    pub kind: CapabilityKind,

    /// What selecting the tile does
    pub action: CapabilityAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureFlags>,

    #[serde(rename = "fileUpload", default, skip_serializing_if = "Option::is_none")]
    pub file_upload: Option<FileUploadSpec>,

    /// Category memberships
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Rotating example strings shown with the input form
    #[serde(default)]
    pub examples: Vec<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Capability {
    /// Check whether the capability is visible to a caller with the given
    /// group memberships. Absence of a visibility rule means visible to all.
    pub fn is_visible_to(&self, member_groups: &[String]) -> bool {
        match &self.visibility {
            None => true,
            Some(visibility) => visibility.allows(member_groups),
        }
    }

    /// Workflow stages, when the action carries a workflow body.
    pub fn stages(&self) -> &[WorkflowStage] {
        match &self.action {
            CapabilityAction::Workflow { stages } => stages,
            _ => &[],
        }
    }

    /// Knowledge collection references declared on the capability.
    pub fn knowledge_collections(&self) -> &[String] {
        match &self.features {
            Some(features) => &features.knowledge_collections,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_deserialization() {
        let json = r#"
{
    "id": "summarize",
    "title": "Summarize",
    "subtitle": "Condense any text",
    "capabilityType": "prompt",
    "action": {
        "type": "prompt",
        "template": "Summarize: {{text|textarea:required}}",
        "modelId": "fast-1"
    },
    "tags": ["writing"],
    "features": {
        "webSearch": true,
        "knowledgeCollections": ["styleguide"]
    }
}
"#;

        let capability: Capability = serde_json::from_str(json).unwrap();
        assert_eq!(capability.id, "summarize");
        assert_eq!(capability.kind, CapabilityKind::Prompt);
        assert!(capability.enabled);
        assert_eq!(capability.knowledge_collections(), ["styleguide"]);

        match &capability.action {
            CapabilityAction::Prompt {
                model_id,
                auto_submit,
                ..
            } => {
                assert_eq!(model_id.as_deref(), Some("fast-1"));
                assert!(!auto_submit);
            }
            other => panic!("Expected prompt action, got {:?}", other),
        }
    }

    #[test]
    fn test_visibility_deserialization() {
        let everyone: Visibility = serde_json::from_str(r#""all""#).unwrap();
        assert!(everyone.allows(&[]));

        let groups: Visibility = serde_json::from_str(r#"["finance", "legal"]"#).unwrap();
        assert!(!groups.allows(&[]));
        assert!(groups.allows(&["legal".to_string()]));
        assert!(!groups.allows(&["engineering".to_string()]));
    }

    #[test]
    fn test_workflow_action_deserialization() {
        let json = r#"
{
    "id": "billing",
    "title": "Billing",
    "capabilityType": "workflow",
    "action": {
        "type": "workflow",
        "stages": [
            {
                "id": "invoicing",
                "name": "Invoicing",
                "prompts": [
                    {"title": "Generate Invoice", "template": "Invoice for {{client}}"}
                ]
            }
        ]
    }
}
"#;

        let capability: Capability = serde_json::from_str(json).unwrap();
        assert_eq!(capability.stages().len(), 1);
        assert_eq!(capability.stages()[0].prompts[0].title, "Generate Invoice");
    }

    #[test]
    fn test_document_fallback_is_empty() {
        let document = CapabilityDocument::fallback();
        assert!(document.categories.is_empty());
        assert!(document.capabilities.is_empty());
        assert!(document.featured_tile.is_none());
    }
}
