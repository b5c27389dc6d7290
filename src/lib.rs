//! Guided, field-by-field transcription of specimen label images.
//!
//! The [`workflow`] module holds the transcription state machine: step and
//! record navigation, per-step answers and the [`WorkflowController`] that
//! ties them together. [`geometry`] turns pointer drags into selection
//! rectangles and places the magnifier. The remaining modules make up the
//! `transcriber` terminal front-end.
//!
//! [`WorkflowController`]: workflow::WorkflowController

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod session;
pub mod ui;
pub mod workflow;

pub use error::{TranscriberError, WorkflowError};
