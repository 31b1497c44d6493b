//! Placeholder parser for prompt templates.
//!
//! Extracts `{{name|type:prop:prop}}` variable declarations from free text and
//! builds the input form model. The template itself is never modified here.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{is_system_variable, FieldKind, InputVariable, VariableValue};

static TOKEN: OnceLock<Regex> = OnceLock::new();

/// Regex matching a single `{{...}}` placeholder token.
pub(crate) fn token_regex() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("token pattern is valid"))
}

/// Parse all user-fillable variable declarations out of a template.
///
/// The returned list preserves first-appearance order and contains no
/// duplicate names; later declarations of an already-seen name are ignored.
/// Reserved system variables are skipped entirely, regardless of casing or
/// type annotations.
pub fn parse_variables(template: &str) -> Vec<InputVariable> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut variables = Vec::new();

    for caps in token_regex().captures_iter(template) {
        let content = caps[1].trim();
        let (name, annotation) = match content.split_once('|') {
            Some((name, annotation)) => (name.trim(), annotation.trim()),
            None => (content, ""),
        };

        if name.is_empty() || is_system_variable(name) {
            continue;
        }

        // First occurrence wins for form building
        if !seen.insert(name.to_string()) {
            continue;
        }

        variables.push(parse_declaration(name, annotation));
    }

    variables
}

/// Build one input variable from a name and its `TYPE:PROP:PROP` annotation.
fn parse_declaration(name: &str, annotation: &str) -> InputVariable {
    let mut kind = FieldKind::Text;
    let mut required = false;
    let mut placeholder: Option<String> = None;
    let mut default: Option<String> = None;
    let mut options: Vec<String> = Vec::new();

    if !annotation.is_empty() {
        let segments: Vec<&str> = annotation.split(':').collect();

        let type_part = segments[0].trim();
        if !type_part.is_empty() {
            kind = FieldKind::parse(type_part);
        }

        let mut index = 1;
        while index < segments.len() {
            let prop = segments[index].trim();

            if prop == "required" {
                required = true;
            } else if let Some(value) = prop.strip_prefix("placeholder=") {
                placeholder = Some(strip_quotes(value).to_string());
            } else if let Some(value) = prop.strip_prefix("default=") {
                default = Some(strip_quotes(value).to_string());
            } else if prop.starts_with("options=") {
                // The JSON payload may itself contain `:`, so everything from
                // `options=` to the end of the annotation belongs to it.
                let payload = segments[index..].join(":");
                let json = payload.trim().strip_prefix("options=").unwrap_or("");
                options = parse_options(name, json);
                break;
            }

            index += 1;
        }
    }

    let placeholder = placeholder.unwrap_or_else(|| name.replace('_', " "));

    let value = match kind {
        FieldKind::Checkbox => VariableValue::Flag(default.as_deref() == Some("true")),
        _ => VariableValue::Text(default.clone().unwrap_or_default()),
    };

    InputVariable {
        name: name.to_string(),
        kind,
        placeholder,
        required,
        options,
        default,
        value,
    }
}

/// Parse an `options=` JSON payload; malformed JSON degrades to no options.
fn parse_options(name: &str, json: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(json) {
        Ok(values) => values,
        Err(err) => {
            tracing::debug!("Ignoring malformed options for variable '{}': {}", name, err);
            Vec::new()
        }
    }
}

/// Strip one matching pair of surrounding single or double quotes.
fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    if trimmed.len() >= 2 {
        let first = bytes[0];
        let last = bytes[trimmed.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
