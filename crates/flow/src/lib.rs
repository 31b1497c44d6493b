//! Selection flows for the Launchpad engine.
//!
//! This crate ties the catalog and template layers together:
//! - Transient form sessions for variable collection
//! - The workflow navigation state machine
//! - The selection orchestrator dispatching tile clicks to output callbacks
//! - Example-string rotation for open forms

pub mod form;
pub mod navigator;
pub mod orchestrator;
pub mod rotation;

// Re-export main types
pub use form::{FormSession, PromptSubmission, UploadedFile};
pub use navigator::{NavigatorState, WorkflowNavigator};
pub use orchestrator::{Dispatch, SelectionOrchestrator, SelectionSink};
pub use rotation::{ExampleRotation, RotationGuard};
