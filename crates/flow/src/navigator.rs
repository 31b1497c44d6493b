//! Workflow navigation state machine.
//!
//! Tracks stage and prompt selection inside a multi-stage capability:
//! `Closed` → `StageSelected` → `PromptSelected` → back or closed. At most one
//! stage and one stage-prompt are active at a time.

use launchpad_catalog::{WorkflowHit, WorkflowStage};
use launchpad_template::SystemResolver;

use crate::form::{FormSession, PromptSubmission};

/// Navigator state.
pub enum NavigatorState {
    Closed,
    StageSelected {
        stage_index: usize,
    },
    PromptSelected {
        stage_index: usize,
        form: FormSession,
    },
}

/// State machine for one open workflow capability.
pub struct WorkflowNavigator {
    stages: Vec<WorkflowStage>,
    state: NavigatorState,
}

impl WorkflowNavigator {
    /// Open a workflow.
    ///
    /// The first declared stage is selected unless a search hit names another
    /// one. A hit that also matched a prompt proceeds directly to that prompt
    /// as though the user had clicked it, which may immediately emit and close
    /// when the prompt needs no input.
    pub async fn open(
        stages: Vec<WorkflowStage>,
        hit: Option<WorkflowHit>,
        resolver: &SystemResolver,
    ) -> (Self, Option<PromptSubmission>) {
        if stages.is_empty() {
            return (
                Self {
                    stages,
                    state: NavigatorState::Closed,
                },
                None,
            );
        }

        let stage_index = hit
            .as_ref()
            .map(|hit| hit.stage_index)
            .filter(|index| *index < stages.len())
            .unwrap_or(0);

        let mut navigator = Self {
            stages,
            state: NavigatorState::StageSelected { stage_index },
        };

        if let Some(prompt_index) = hit.and_then(|hit| hit.prompt_index) {
            let emitted = navigator.select_prompt(prompt_index, resolver).await;
            return (navigator, emitted);
        }

        (navigator, None)
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn stages(&self) -> &[WorkflowStage] {
        &self.stages
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, NavigatorState::Closed)
    }

    /// The currently selected stage, when open.
    pub fn selected_stage(&self) -> Option<&WorkflowStage> {
        match self.state {
            NavigatorState::Closed => None,
            NavigatorState::StageSelected { stage_index }
            | NavigatorState::PromptSelected { stage_index, .. } => self.stages.get(stage_index),
        }
    }

    /// The open form, when a prompt is selected.
    pub fn form_mut(&mut self) -> Option<&mut FormSession> {
        match &mut self.state {
            NavigatorState::PromptSelected { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Switch to a different stage tab. Keeps the modal open and discards any
    /// in-progress form.
    pub fn select_stage(&mut self, stage_index: usize) {
        if !self.is_open() || stage_index >= self.stages.len() {
            return;
        }

        self.state = NavigatorState::StageSelected { stage_index };
    }

    /// Choose a prompt in the active stage.
    ///
    /// Opens a form when the prompt declares variables or a file upload;
    /// otherwise resolves system variables immediately and returns the
    /// finished prompt, closing the workflow.
    pub async fn select_prompt(
        &mut self,
        prompt_index: usize,
        resolver: &SystemResolver,
    ) -> Option<PromptSubmission> {
        let stage_index = match self.state {
            NavigatorState::Closed => return None,
            NavigatorState::StageSelected { stage_index }
            | NavigatorState::PromptSelected { stage_index, .. } => stage_index,
        };

        let prompt = self.stages.get(stage_index)?.prompts.get(prompt_index)?.clone();

        let mut form = FormSession::new(
            prompt.template,
            prompt.model_id,
            prompt.auto_submit,
            prompt.features,
            prompt.file_upload,
            Vec::new(),
        );

        if form.is_needed() {
            self.state = NavigatorState::PromptSelected { stage_index, form };
            return None;
        }

        // Nothing to collect: emit the finished prompt and close
        let submission = form.submit(resolver).await;
        self.state = NavigatorState::Closed;
        submission
    }

    /// Return from the form to the stage view, discarding entered values and
    /// attached files.
    pub fn back(&mut self) {
        if let NavigatorState::PromptSelected { stage_index, .. } = self.state {
            self.state = NavigatorState::StageSelected { stage_index };
        }
    }

    /// Submit the open form.
    ///
    /// Returns the emission and closes the workflow on success; a failed
    /// validation leaves the form open and returns `None`.
    pub async fn submit(&mut self, resolver: &SystemResolver) -> Option<PromptSubmission> {
        let submission = match &mut self.state {
            NavigatorState::PromptSelected { form, .. } => form.submit(resolver).await,
            _ => None,
        }?;

        self.state = NavigatorState::Closed;
        Some(submission)
    }

    /// Close the workflow from any state, discarding in-progress form state
    /// without emitting.
    pub fn close(&mut self) {
        self.state = NavigatorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use launchpad_catalog::StagePrompt;
    use launchpad_core::AppResult;
    use launchpad_template::{Clock, ClipboardSource, SystemResolver, UserContext};

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> chrono::DateTime<chrono::Local> {
            chrono::Local.with_ymd_and_hms(2024, 3, 4, 9, 5, 0).unwrap()
        }

        fn timezone(&self) -> String {
            "UTC".to_string()
        }
    }

    struct NoClipboard;

    #[async_trait::async_trait]
    impl ClipboardSource for NoClipboard {
        async fn read_text(&self) -> AppResult<String> {
            Ok(String::new())
        }
    }

    fn resolver() -> SystemResolver {
        SystemResolver::with_parts(
            UserContext::default(),
            Box::new(FixedClock),
            Box::new(NoClipboard),
        )
    }

    fn prompt(title: &str, template: &str) -> StagePrompt {
        StagePrompt {
            title: title.to_string(),
            template: template.to_string(),
            features: None,
            auto_submit: false,
            model_id: None,
            file_upload: None,
        }
    }

    fn stages() -> Vec<WorkflowStage> {
        vec![
            WorkflowStage {
                id: "intake".to_string(),
                name: "Intake".to_string(),
                icon: None,
                color: None,
                prompts: vec![prompt("Collect", "Collect {{details|textarea:required}}")],
            },
            WorkflowStage {
                id: "invoicing".to_string(),
                name: "Invoicing".to_string(),
                icon: None,
                color: None,
                prompts: vec![
                    prompt("Remind", "Send a reminder for the open invoice"),
                    prompt("Generate", "Invoice {{client}}"),
                ],
            },
        ]
    }

    #[tokio::test]
    async fn test_open_selects_first_stage() {
        let (navigator, emitted) = WorkflowNavigator::open(stages(), None, &resolver()).await;

        assert!(emitted.is_none());
        assert_eq!(navigator.selected_stage().unwrap().id, "intake");
        assert!(matches!(
            navigator.state(),
            NavigatorState::StageSelected { stage_index: 0 }
        ));
    }

    #[tokio::test]
    async fn test_open_with_stage_hit() {
        let hit = WorkflowHit {
            stage_index: 1,
            prompt_index: None,
        };

        let (navigator, emitted) =
            WorkflowNavigator::open(stages(), Some(hit), &resolver()).await;

        assert!(emitted.is_none());
        assert_eq!(navigator.selected_stage().unwrap().id, "invoicing");
    }

    #[tokio::test]
    async fn test_open_with_prompt_hit_emits_when_no_input_needed() {
        let hit = WorkflowHit {
            stage_index: 1,
            prompt_index: Some(0),
        };

        let (navigator, emitted) =
            WorkflowNavigator::open(stages(), Some(hit), &resolver()).await;

        let submission = emitted.unwrap();
        assert_eq!(submission.text, "Send a reminder for the open invoice");
        assert!(!navigator.is_open());
    }

    #[tokio::test]
    async fn test_open_with_prompt_hit_opens_form_when_input_needed() {
        let hit = WorkflowHit {
            stage_index: 0,
            prompt_index: Some(0),
        };

        let (navigator, emitted) =
            WorkflowNavigator::open(stages(), Some(hit), &resolver()).await;

        assert!(emitted.is_none());
        assert!(matches!(
            navigator.state(),
            NavigatorState::PromptSelected { stage_index: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_select_stage_keeps_modal_open() {
        let (mut navigator, _) = WorkflowNavigator::open(stages(), None, &resolver()).await;

        navigator.select_stage(1);
        assert_eq!(navigator.selected_stage().unwrap().id, "invoicing");

        // Out-of-range selection is ignored
        navigator.select_stage(9);
        assert_eq!(navigator.selected_stage().unwrap().id, "invoicing");
    }

    #[tokio::test]
    async fn test_back_discards_form_state() {
        let (mut navigator, _) = WorkflowNavigator::open(stages(), None, &resolver()).await;

        navigator.select_prompt(0, &resolver()).await;
        navigator
            .form_mut()
            .unwrap()
            .set_text("details", "half-typed");

        navigator.back();
        assert!(matches!(
            navigator.state(),
            NavigatorState::StageSelected { stage_index: 0 }
        ));

        // Re-opening the prompt starts from a fresh form
        navigator.select_prompt(0, &resolver()).await;
        let form = navigator.form_mut().unwrap();
        assert_eq!(
            form.variables()[0].value,
            launchpad_template::VariableValue::Text(String::new())
        );
    }

    #[tokio::test]
    async fn test_submit_validates_and_closes() {
        let (mut navigator, _) = WorkflowNavigator::open(stages(), None, &resolver()).await;
        navigator.select_prompt(0, &resolver()).await;

        // Required field still empty: the form stays open
        assert!(navigator.submit(&resolver()).await.is_none());
        assert!(navigator.is_open());

        navigator.form_mut().unwrap().set_text("details", "the order");
        let submission = navigator.submit(&resolver()).await.unwrap();
        assert_eq!(submission.text, "Collect the order");
        assert!(!navigator.is_open());
    }

    #[tokio::test]
    async fn test_close_from_any_state() {
        let (mut navigator, _) = WorkflowNavigator::open(stages(), None, &resolver()).await;
        navigator.select_prompt(0, &resolver()).await;

        navigator.close();
        assert!(!navigator.is_open());
        assert!(navigator.selected_stage().is_none());
    }

    #[tokio::test]
    async fn test_empty_workflow_stays_closed() {
        let (navigator, emitted) =
            WorkflowNavigator::open(Vec::new(), None, &resolver()).await;

        assert!(emitted.is_none());
        assert!(!navigator.is_open());
    }
}
