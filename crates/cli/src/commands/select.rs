//! Select command handler.
//!
//! Runs a capability click through the full selection pipeline: filter match,
//! orchestrator dispatch, form filling from `--var`/`--file` inputs, and
//! workflow navigation.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use launchpad_catalog::{visible_tiles, Capability, FilterInput, ALL_CATEGORY_ID};
use launchpad_core::{AppConfig, AppError, AppResult};
use launchpad_flow::{
    Dispatch, ExampleRotation, FormSession, PromptSubmission, SelectionOrchestrator,
    SelectionSink, UploadedFile, WorkflowNavigator,
};
use launchpad_template::{FieldKind, SystemResolver, UserContext};

use super::{load_catalog, open_preferences};

/// Select a capability and emit its prompt
#[derive(Args, Debug)]
pub struct SelectCommand {
    /// Capability id to select
    pub id: String,

    /// Variable values as name=value pairs
    #[arg(long = "var")]
    pub vars: Vec<String>,

    /// Files to attach to the form
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,

    /// Search query that led to this selection (pre-navigates workflows)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Stage id to open inside a workflow
    #[arg(long)]
    pub stage: Option<String>,

    /// Prompt title to open inside the selected stage
    #[arg(long)]
    pub prompt: Option<String>,
}

/// Sink printing emitted prompts to stdout; the consumer side of the engine.
struct PrintSink;

impl SelectionSink for PrintSink {
    fn selected(&mut self, submission: PromptSubmission) {
        if let Some(model_id) = &submission.model_id {
            tracing::info!("Model: {}", model_id);
        }
        if submission.auto_submit {
            tracing::info!("Auto-submit requested");
        }
        if let Some(files) = &submission.files {
            tracing::info!("{} file(s) attached", files.len());
        }

        println!("{}", submission.text);
    }

    fn navigate(&mut self, route: &str) {
        println!("Navigate to: {}", route);
    }

    fn open_url(&mut self, url: &str) {
        println!("Open URL: {}", url);
    }

    fn capability_chosen(&mut self, capability: &Capability) {
        tracing::debug!("Selection observer notified for '{}'", capability.id);
    }
}

impl SelectCommand {
    /// Execute the select command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let document = load_catalog(config).await?;
        let prefs = open_preferences(config);

        // Run the click through the same pipeline the grid uses so search
        // matches drive workflow auto-navigation.
        let query = self.search.clone().unwrap_or_default();
        let input = FilterInput {
            selected_category: ALL_CATEGORY_ID,
            query: &query,
            starred: prefs.starred(),
            member_groups: &config.groups,
        };

        let found = visible_tiles(&document, &input)
            .into_iter()
            .find(|tile| tile.capability.id == self.id)
            .map(|tile| (tile.capability.clone(), tile.workflow_hit.clone()));

        // A search query that does not match the capability falls back to a
        // plain click without auto-navigation.
        let (capability, hit) = match found {
            Some(found) => found,
            None => {
                let plain = FilterInput {
                    selected_category: ALL_CATEGORY_ID,
                    query: "",
                    starred: prefs.starred(),
                    member_groups: &config.groups,
                };
                visible_tiles(&document, &plain)
                    .into_iter()
                    .find(|tile| tile.capability.id == self.id)
                    .map(|tile| (tile.capability.clone(), None))
                    .ok_or_else(|| {
                        AppError::Catalog(format!("Unknown capability: {}", self.id))
                    })?
            }
        };

        let resolver = SystemResolver::new(UserContext {
            display_name: config.user_name.clone(),
            locale: config.user_locale.clone(),
        });
        let mut orchestrator = SelectionOrchestrator::new(PrintSink, resolver);

        match orchestrator.select(&capability, hit.as_ref()).await {
            Dispatch::Emitted | Dispatch::Navigated | Dispatch::UrlOpened => Ok(()),
            Dispatch::Ignored => {
                tracing::info!("Nothing to do for '{}'", capability.id);
                Ok(())
            }
            Dispatch::FormOpened(form) => self.fill_and_submit(form, &mut orchestrator).await,
            Dispatch::WorkflowOpened(navigator) => {
                self.drive_workflow(navigator, &mut orchestrator).await
            }
        }
    }

    /// Apply CLI inputs to a standalone form and submit it.
    async fn fill_and_submit(
        &self,
        mut form: FormSession,
        orchestrator: &mut SelectionOrchestrator<PrintSink>,
    ) -> AppResult<()> {
        self.apply_inputs(&mut form)?;

        // The rotation timer lives as long as the form; dropping the guard on
        // return cancels it.
        let rotation = ExampleRotation::new(form.examples().to_vec());
        let _rotation_guard = rotation.spawn(Duration::from_secs(3));
        if let Some(example) = rotation.current() {
            tracing::info!("Example: {}", example);
        }

        if !orchestrator.submit_form(&mut form).await {
            tracing::warn!("Submission blocked: required inputs are missing");
            print_form_schema(&form);
        }

        Ok(())
    }

    /// Navigate an open workflow from `--stage`/`--prompt` and submit its form.
    async fn drive_workflow(
        &self,
        mut navigator: WorkflowNavigator,
        orchestrator: &mut SelectionOrchestrator<PrintSink>,
    ) -> AppResult<()> {
        // A search hit on a prompt title may already have opened its form
        if navigator.form_mut().is_none() {
            if let Some(stage) = &self.stage {
                match navigator
                    .stages()
                    .iter()
                    .position(|candidate| candidate.id == *stage)
                {
                    Some(index) => navigator.select_stage(index),
                    None => {
                        return Err(AppError::Catalog(format!("Unknown stage: {}", stage)));
                    }
                }
            }

            let Some(prompt) = &self.prompt else {
                print_workflow(&navigator);
                return Ok(());
            };

            let prompt_index = navigator
                .selected_stage()
                .and_then(|stage| {
                    stage
                        .prompts
                        .iter()
                        .position(|candidate| candidate.title.eq_ignore_ascii_case(prompt))
                })
                .ok_or_else(|| AppError::Catalog(format!("Unknown prompt: {}", prompt)))?;

            if orchestrator
                .select_workflow_prompt(&mut navigator, prompt_index)
                .await
            {
                // Emitted immediately; the workflow is closed
                return Ok(());
            }
        }

        let Some(form) = navigator.form_mut() else {
            return Ok(());
        };
        self.apply_inputs(form)?;

        if !orchestrator.submit_workflow(&mut navigator).await {
            tracing::warn!("Submission blocked: required inputs are missing");
            if let Some(form) = navigator.form_mut() {
                print_form_schema(form);
            }
        }

        Ok(())
    }

    /// Apply `--var` and `--file` inputs to a form.
    fn apply_inputs(&self, form: &mut FormSession) -> AppResult<()> {
        for pair in &self.vars {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                AppError::Config(format!("Invalid --var '{}'; expected name=value", pair))
            })?;

            let is_checkbox = form
                .variables()
                .iter()
                .any(|var| var.name == name && var.kind == FieldKind::Checkbox);

            let known = if is_checkbox {
                form.set_flag(name, value == "true")
            } else {
                form.set_text(name, value)
            };

            if !known {
                tracing::warn!("Ignoring unknown variable '{}'", name);
            }
        }

        for path in &self.files {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("attachment")
                .to_string();

            form.attach_file(UploadedFile {
                name,
                path: path.clone(),
            });
        }

        Ok(())
    }
}

/// Print the stage/prompt tree of an open workflow.
fn print_workflow(navigator: &WorkflowNavigator) {
    let selected = navigator.selected_stage().map(|stage| stage.id.clone());

    for stage in navigator.stages() {
        let marker = if selected.as_deref() == Some(stage.id.as_str()) {
            ">"
        } else {
            " "
        };
        println!("{} {} [{}]", marker, stage.name, stage.id);

        for prompt in &stage.prompts {
            println!("    - {}", prompt.title);
        }
    }
}

/// Print what a form still needs.
fn print_form_schema(form: &FormSession) {
    for var in form.variables() {
        let mut details = vec![var.kind.as_str().to_string()];
        if var.required {
            details.push("required".to_string());
        }
        if !var.options.is_empty() {
            details.push(format!("options: {}", var.options.join(", ")));
        }

        println!("  {} ({}) - {}", var.name, details.join(", "), var.placeholder);
    }

    if let Some(upload) = form.file_upload() {
        let requirement = if upload.required { "required" } else { "optional" };
        if upload.accept.is_empty() {
            println!("  files ({})", requirement);
        } else {
            println!("  files ({}, accept: {})", requirement, upload.accept.join(", "));
        }
    }
}
