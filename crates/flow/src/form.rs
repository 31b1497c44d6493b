//! Transient variable-collection forms.
//!
//! A form session holds the parsed input variables, attached files, and
//! emission settings for one prompt. Sessions are built fresh when a template
//! opens and discarded on close or submit; only one is ever active.

use std::path::PathBuf;

use launchpad_catalog::{FeatureFlags, FileUploadSpec};
use launchpad_template::{
    merge_values, parse_variables, with_knowledge_tags, InputVariable, SystemResolver,
    VariableValue,
};

/// A file attached to a form session.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub path: PathBuf,
}

/// A finished prompt handed to the output callback.
#[derive(Debug, Clone)]
pub struct PromptSubmission {
    /// Final prompt text (may be empty for model selections)
    pub text: String,

    /// Model the prompt is pinned to, if any
    pub model_id: Option<String>,

    /// Feature flags declared on the capability or stage prompt
    pub features: Option<FeatureFlags>,

    /// Whether the consumer should dispatch without further confirmation
    pub auto_submit: bool,

    /// Attached files, when any were collected
    pub files: Option<Vec<UploadedFile>>,
}

/// Variable-collection form for one prompt template.
pub struct FormSession {
    template: String,
    variables: Vec<InputVariable>,
    files: Vec<UploadedFile>,
    file_upload: Option<FileUploadSpec>,
    features: Option<FeatureFlags>,
    model_id: Option<String>,
    auto_submit: bool,
    examples: Vec<String>,
}

impl FormSession {
    /// Build a form session for a template, parsing its variables.
    pub fn new(
        template: String,
        model_id: Option<String>,
        auto_submit: bool,
        features: Option<FeatureFlags>,
        file_upload: Option<FileUploadSpec>,
        examples: Vec<String>,
    ) -> Self {
        let variables = parse_variables(&template);

        Self {
            template,
            variables,
            files: Vec::new(),
            file_upload,
            features,
            model_id,
            auto_submit,
            examples,
        }
    }

    /// Whether this prompt needs a form at all: it declares user-fillable
    /// variables or a file upload.
    pub fn is_needed(&self) -> bool {
        !self.variables.is_empty() || self.file_upload.is_some()
    }

    /// Parsed input variables, in first-appearance order.
    pub fn variables(&self) -> &[InputVariable] {
        &self.variables
    }

    /// File upload descriptor, if the prompt declares one.
    pub fn file_upload(&self) -> Option<&FileUploadSpec> {
        self.file_upload.as_ref()
    }

    /// Rotating example strings shown alongside the form.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Attached files.
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// Set a variable's value by name; returns false for unknown names.
    pub fn set_value(&mut self, name: &str, value: VariableValue) -> bool {
        match self.variables.iter_mut().find(|var| var.name == name) {
            Some(var) => {
                var.value = value;
                true
            }
            None => false,
        }
    }

    /// Set a text value by name.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> bool {
        self.set_value(name, VariableValue::Text(text.into()))
    }

    /// Set a checkbox value by name.
    pub fn set_flag(&mut self, name: &str, flag: bool) -> bool {
        self.set_value(name, VariableValue::Flag(flag))
    }

    /// Attach a file to the session.
    pub fn attach_file(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    /// Validate the session: every required variable must hold a satisfying
    /// value, and a required upload must have at least one file attached.
    pub fn is_valid(&self) -> bool {
        let variables_ok = self
            .variables
            .iter()
            .all(|var| !var.required || var.value.satisfies_required());

        let files_ok = match &self.file_upload {
            Some(spec) if spec.required => !self.files.is_empty(),
            _ => true,
        };

        variables_ok && files_ok
    }

    /// Build the submission: resolve system variables, merge values, and
    /// prepend knowledge tags.
    ///
    /// Returns `None` when validation fails; the form stays open and no state
    /// is consumed.
    pub async fn submit(&mut self, resolver: &SystemResolver) -> Option<PromptSubmission> {
        if !self.is_valid() {
            tracing::debug!("Form submission blocked by validation");
            return None;
        }

        let resolved = resolver.resolve(&self.template).await;
        let merged = merge_values(&resolved, &self.variables);

        let collections = self
            .features
            .as_ref()
            .map(|features| features.knowledge_collections.as_slice())
            .unwrap_or(&[]);
        let text = with_knowledge_tags(collections, &merged);

        let files = if self.files.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.files))
        };

        Some(PromptSubmission {
            text,
            model_id: self.model_id.clone(),
            features: self.features.clone(),
            auto_submit: self.auto_submit,
            files,
        })
    }
}
