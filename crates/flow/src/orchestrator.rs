//! Selection dispatch.
//!
//! Central entry point invoked when a tile is clicked: decides whether to emit
//! a prompt immediately, open a variable-collection form, open a workflow, or
//! hand off to the navigation/url callbacks.

use launchpad_catalog::{Capability, CapabilityAction, WorkflowHit};
use launchpad_template::SystemResolver;

use crate::form::{FormSession, PromptSubmission};
use crate::navigator::WorkflowNavigator;

/// Output callbacks owned by the host application.
pub trait SelectionSink {
    /// A finished prompt was produced; the consumer dispatches it.
    fn selected(&mut self, submission: PromptSubmission);

    /// Navigate to an in-app route.
    fn navigate(&mut self, route: &str);

    /// Open an external URL in a new browsing context.
    fn open_url(&mut self, url: &str);

    /// Generic observer fired for every tile click, regardless of which
    /// action branch executed.
    fn capability_chosen(&mut self, capability: &Capability);
}

/// What a tile click resulted in.
pub enum Dispatch {
    /// A prompt was emitted through the sink
    Emitted,

    /// A form needs to be filled before anything is emitted
    FormOpened(FormSession),

    /// A workflow modal was opened
    WorkflowOpened(WorkflowNavigator),

    /// The navigation callback was invoked
    Navigated,

    /// The url callback was invoked
    UrlOpened,

    /// Nothing to do (missing payload, empty workflow)
    Ignored,
}

/// Dispatches tile clicks and form submissions to the output callbacks.
pub struct SelectionOrchestrator<S: SelectionSink> {
    sink: S,
    resolver: SystemResolver,
}

impl<S: SelectionSink> SelectionOrchestrator<S> {
    pub fn new(sink: S, resolver: SystemResolver) -> Self {
        Self { sink, resolver }
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Handle a tile click.
    ///
    /// `hit` carries the search match location for workflow capabilities so
    /// the navigator can pre-select the matched stage and prompt.
    pub async fn select(&mut self, capability: &Capability, hit: Option<&WorkflowHit>) -> Dispatch {
        tracing::debug!("Capability selected: {}", capability.id);
        self.sink.capability_chosen(capability);

        match &capability.action {
            CapabilityAction::Workflow { stages } if !stages.is_empty() => {
                let (navigator, emitted) =
                    WorkflowNavigator::open(stages.clone(), hit.cloned(), &self.resolver).await;

                match emitted {
                    Some(submission) => {
                        self.sink.selected(submission);
                        Dispatch::Emitted
                    }
                    None if navigator.is_open() => Dispatch::WorkflowOpened(navigator),
                    None => Dispatch::Ignored,
                }
            }

            CapabilityAction::Workflow { .. } => Dispatch::Ignored,

            CapabilityAction::Model { model_id } => {
                self.sink.selected(PromptSubmission {
                    text: String::new(),
                    model_id: Some(model_id.clone()),
                    features: capability.features.clone(),
                    auto_submit: false,
                    files: None,
                });
                Dispatch::Emitted
            }

            CapabilityAction::Prompt {
                template,
                model_id,
                auto_submit,
            } => {
                let mut form = FormSession::new(
                    template.clone(),
                    model_id.clone(),
                    *auto_submit,
                    capability.features.clone(),
                    capability.file_upload.clone(),
                    capability.examples.clone(),
                );

                if form.is_needed() {
                    return Dispatch::FormOpened(form);
                }

                match form.submit(&self.resolver).await {
                    Some(submission) => {
                        self.sink.selected(submission);
                        Dispatch::Emitted
                    }
                    None => Dispatch::Ignored,
                }
            }

            CapabilityAction::Route { route } => match route {
                Some(route) => {
                    self.sink.navigate(route);
                    Dispatch::Navigated
                }
                None => Dispatch::Ignored,
            },

            CapabilityAction::Url { url } => match url {
                Some(url) => {
                    self.sink.open_url(url);
                    Dispatch::UrlOpened
                }
                None => Dispatch::Ignored,
            },
        }
    }

    /// Validate and submit a standalone form; returns whether a prompt was
    /// emitted. A blocked validation leaves the form open.
    pub async fn submit_form(&mut self, form: &mut FormSession) -> bool {
        match form.submit(&self.resolver).await {
            Some(submission) => {
                self.sink.selected(submission);
                true
            }
            None => false,
        }
    }

    /// Choose a prompt inside an open workflow; emits immediately when the
    /// prompt needs no input.
    pub async fn select_workflow_prompt(
        &mut self,
        navigator: &mut WorkflowNavigator,
        prompt_index: usize,
    ) -> bool {
        match navigator.select_prompt(prompt_index, &self.resolver).await {
            Some(submission) => {
                self.sink.selected(submission);
                true
            }
            None => false,
        }
    }

    /// Submit the workflow's open form; closes the workflow on success.
    pub async fn submit_workflow(&mut self, navigator: &mut WorkflowNavigator) -> bool {
        match navigator.submit(&self.resolver).await {
            Some(submission) => {
                self.sink.selected(submission);
                true
            }
            None => false,
        }
    }
}
