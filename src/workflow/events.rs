//! State snapshots and the change notifications carrying them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rectangle;

use super::answers::Answer;
use super::guide::{InputKind, Placeholder};

/// Read-only view of the workflow handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_record: usize,
    /// `None` until the first region is confirmed.
    pub current_step: Option<usize>,
    pub step_count: usize,
    /// Rectangle of the selection being drawn, if any.
    pub selection: Option<Rectangle>,
    /// Confirmed region driving the magnifier.
    pub highlight: Option<Rectangle>,
    /// True while a selection session is open.
    pub selecting: bool,
    pub pending_answer_count: usize,
    pub field: Option<FieldView>,
}

/// What the input widget and helper show for the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldView {
    pub step: usize,
    pub counter: String,
    pub title: String,
    pub description: String,
    pub example_refs: Vec<String>,
    pub placeholder: Placeholder,
    pub input_kind: InputKind,
    pub input_width: u32,
    /// Previously stored value for this step, empty when none.
    pub value: String,
}

/// Answers of a finished record, handed out before the store is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedRecord {
    pub session_id: Uuid,
    pub record: usize,
    pub answers: Vec<Answer>,
    pub finished_at: DateTime<Utc>,
}

/// The kind of mutation behind a [`WorkflowEvent::StateChanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    SelectionStarted,
    SelectionUpdated,
    SelectionCancelled,
    RegionConfirmed,
    AnswerSubmitted,
    StepSkipped,
    StepMoved,
    RecordAdvanced,
    RecordRewound,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Change::SelectionStarted => "SELECTION_STARTED",
            Change::SelectionUpdated => "SELECTION_UPDATED",
            Change::SelectionCancelled => "SELECTION_CANCELLED",
            Change::RegionConfirmed => "REGION_CONFIRMED",
            Change::AnswerSubmitted => "ANSWER_SUBMITTED",
            Change::StepSkipped => "STEP_SKIPPED",
            Change::StepMoved => "STEP_MOVED",
            Change::RecordAdvanced => "RECORD_ADVANCED",
            Change::RecordRewound => "RECORD_REWOUND",
        };
        write!(f, "{name}")
    }
}

/// Notification delivered to every subscriber after a committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    StateChanged { change: Change, snapshot: Snapshot },
    /// Emitted by `finish_record` while the answers are still available.
    RecordFinished(FinishedRecord),
    /// Emitted by `skip_record`; the discarded answers are not handed out.
    RecordSkipped { record: usize },
}

impl WorkflowEvent {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            WorkflowEvent::StateChanged { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
