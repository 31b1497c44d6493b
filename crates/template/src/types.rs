//! Input variable types for the prompt template system.
//!
//! This module defines the transient form model built from a template: field
//! kinds, current values, and the reserved system variable names.

/// Reserved system variable names.
///
/// Placeholders with these names (matched case-insensitively) are resolved
/// from runtime context and are never surfaced as user-fillable fields.
pub const SYSTEM_VARIABLES: &[&str] = &[
    "date",
    "datetime",
    "time",
    "timezone",
    "weekday",
    "user_name",
    "user_locale",
    "clipboard",
];

/// Check whether a placeholder name is a reserved system variable.
pub fn is_system_variable(name: &str) -> bool {
    SYSTEM_VARIABLES
        .iter()
        .any(|sys| sys.eq_ignore_ascii_case(name))
}

/// Kind of input field a variable renders as.
///
/// Unknown type annotations are preserved verbatim; rendering falls back to a
/// plain text field for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Checkbox,
    Date,
    Other(String),
}

impl FieldKind {
    /// Parse a type annotation into a field kind.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the annotation string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Other(raw) => raw,
        }
    }
}

/// Current value of an input variable.
///
/// Checkbox fields carry an explicit boolean; every other kind carries text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    Text(String),
    Flag(bool),
}

impl VariableValue {
    /// Render the value as the text substituted into the template.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Flag(true) => "Yes".to_string(),
            Self::Flag(false) => "No".to_string(),
        }
    }

    /// Whether this value satisfies a `required` constraint.
    ///
    /// An explicit boolean always passes (unchecked checkboxes are a valid
    /// answer); text passes only when non-empty.
    pub fn satisfies_required(&self) -> bool {
        match self {
            Self::Flag(_) => true,
            Self::Text(text) => !text.is_empty(),
        }
    }
}

/// A user-fillable variable parsed from a prompt template.
///
/// Built fresh each time a template is opened and discarded on close/submit.
#[derive(Debug, Clone, PartialEq)]
pub struct InputVariable {
    /// Placeholder name as written in the template
    pub name: String,

    /// Field kind from the type annotation (default: text)
    pub kind: FieldKind,

    /// Placeholder/hint text shown in the empty field
    pub placeholder: String,

    /// Whether the field must be filled before submission
    pub required: bool,

    /// Option list for select fields
    pub options: Vec<String>,

    /// Declared default value, if any
    pub default: Option<String>,

    /// Current value, seeded from the default
    pub value: VariableValue,
}

impl InputVariable {
    /// Set a text value on this variable.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = VariableValue::Text(text.into());
    }

    /// Set a boolean value on this variable.
    pub fn set_flag(&mut self, flag: bool) {
        self.value = VariableValue::Flag(flag);
    }
}
