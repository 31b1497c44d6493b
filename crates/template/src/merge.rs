//! Form value merging.
//!
//! Substitutes the current value of each input variable back into the
//! template, replacing both the bare `{{name}}` form and any annotated
//! `{{name|...}}` form. Callers run this after system variable resolution so
//! reserved tokens are already gone.

use std::collections::HashMap;

use crate::parser::token_regex;
use crate::types::InputVariable;

/// Replace every occurrence of each variable's placeholder with its value.
pub fn merge_values(template: &str, variables: &[InputVariable]) -> String {
    if variables.is_empty() {
        return template.to_string();
    }

    let values: HashMap<&str, String> = variables
        .iter()
        .map(|var| (var.name.as_str(), var.value.render()))
        .collect();

    token_regex()
        .replace_all(template, |caps: &regex::Captures| {
            let content = caps[1].trim();
            let name = match content.split_once('|') {
                Some((name, _)) => name.trim(),
                None => content,
            };

            match values.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Prepend `#collection` tags to a merged prompt body.
///
/// Produces a space-joined tag line followed by a blank line, but only when at
/// least one collection reference exists.
pub fn with_knowledge_tags(collections: &[String], body: &str) -> String {
    if collections.is_empty() {
        return body.to_string();
    }

    let tags = collections
        .iter()
        .map(|collection| format!("#{}", collection))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}\n\n{}", tags, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_variables;

    #[test]
    fn test_replaces_bare_and_annotated_forms() {
        let template = "Age {{age|number:required}} again {{age}}";
        let mut vars = parse_variables(template);
        vars[0].set_text("30");

        let merged = merge_values(template, &vars);

        assert_eq!(merged, "Age 30 again 30");
    }

    #[test]
    fn test_checkbox_renders_yes_no() {
        let template = "Include sources: {{cite|checkbox}}";
        let mut vars = parse_variables(template);

        vars[0].set_flag(true);
        assert_eq!(merge_values(template, &vars), "Include sources: Yes");

        vars[0].set_flag(false);
        assert_eq!(merge_values(template, &vars), "Include sources: No");
    }

    #[test]
    fn test_unmatched_tokens_left_alone() {
        let template = "{{known}} and {{unknown}}";
        let mut vars = parse_variables("{{known}}");
        vars[0].set_text("value");

        let merged = merge_values(template, &vars);

        assert_eq!(merged, "value and {{unknown}}");
    }

    #[test]
    fn test_empty_value_renders_empty_string() {
        let template = "start {{gap}} end";
        let vars = parse_variables(template);

        assert_eq!(merge_values(template, &vars), "start  end");
    }

    #[test]
    fn test_knowledge_tags_prepended_only_when_present() {
        let collections = vec!["finance".to_string(), "policies".to_string()];

        assert_eq!(
            with_knowledge_tags(&collections, "body"),
            "#finance #policies\n\nbody"
        );
        assert_eq!(with_knowledge_tags(&[], "body"), "body");
    }
}
