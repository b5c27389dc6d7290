use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::WorkflowError;
use crate::geometry::{self, MagnifierLayout, MagnifierSettings, Point, Rectangle, Size};

use super::answers::AnswerStore;
use super::events::{Change, FieldView, FinishedRecord, Snapshot, SubscriptionId, WorkflowEvent};
use super::guide::Guide;
use super::records::RecordSequencer;
use super::steps::StepSequencer;

type Observer = Box<dyn FnMut(&WorkflowEvent)>;

// An open pointer drag. Dropping it leaves no trace in the workflow.
#[derive(Debug, Clone, Copy)]
struct SelectionSession {
    rectangle: Option<Rectangle>,
}

/// Drives one transcription session from user actions.
///
/// Every committed mutation returns the resulting [`Snapshot`] and notifies
/// subscribers with [`WorkflowEvent::StateChanged`]. Rejected operations
/// return a [`WorkflowError`] and change nothing.
pub struct WorkflowController {
    session_id: Uuid,
    steps: StepSequencer,
    records: RecordSequencer,
    answers: AnswerStore,
    selection: Option<SelectionSession>,
    highlight: Option<Rectangle>,
    magnifier: MagnifierSettings,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl WorkflowController {
    pub fn new(guide: Guide) -> Self {
        Self::with_magnifier(guide, MagnifierSettings::default())
    }

    pub fn with_magnifier(guide: Guide, magnifier: MagnifierSettings) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            steps: StepSequencer::new(guide),
            records: RecordSequencer::new(),
            answers: AnswerStore::new(),
            selection: None,
            highlight: None,
            magnifier,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn guide(&self) -> &Guide {
        self.steps.guide()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn steps(&self) -> &StepSequencer {
        &self.steps
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&WorkflowEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_record: self.records.current(),
            current_step: self.steps.current_index(),
            step_count: self.steps.step_count(),
            selection: self.selection.and_then(|s| s.rectangle),
            highlight: self.highlight,
            selecting: self.selection.is_some(),
            pending_answer_count: self.answers.pending_count(self.steps.step_count()),
            field: self.field_view().ok(),
        }
    }

    /// Prompt data for the current step, including any value already stored.
    pub fn field_view(&self) -> Result<FieldView, WorkflowError> {
        let step = self.steps.current()?;
        let value = self
            .answers
            .get(step.index)
            .map(|a| a.value.clone())
            .unwrap_or_default();

        Ok(FieldView {
            step: step.index,
            counter: self.steps.counter_label(),
            title: step.title.clone(),
            description: step.description.clone(),
            example_refs: step.example_refs.clone(),
            placeholder: step.placeholder.clone(),
            input_kind: step.input_kind,
            input_width: step.input_width,
            value,
        })
    }

    /// Magnifier placement for the confirmed highlight, if there is one.
    pub fn magnifier_layout(&self, image_origin: Point, viewport: Size) -> Option<MagnifierLayout> {
        self.highlight
            .map(|h| MagnifierLayout::compute(&h, image_origin, viewport, &self.magnifier))
    }

    // ---- selection ----------------------------------------------------------

    /// Opens a selection session at the pointer-down position. Any previous
    /// open session is replaced; the confirmed highlight is untouched.
    pub fn begin_selection(&mut self, x: f64, y: f64) -> Snapshot {
        debug!(x, y, "selection started");
        self.selection = Some(SelectionSession { rectangle: None });
        self.commit(Change::SelectionStarted)
    }

    /// Recomputes the selection from the drag start and the current pointer.
    /// Ignored when no session is open.
    pub fn update_selection(
        &mut self,
        start_x: f64,
        start_y: f64,
        current_x: f64,
        current_y: f64,
    ) -> Snapshot {
        let Some(session) = self.selection.as_mut() else {
            return self.snapshot();
        };
        session.rectangle = Some(geometry::compute_rectangle(
            start_x, start_y, current_x, current_y,
        ));
        self.commit(Change::SelectionUpdated)
    }

    /// Abandons the open selection session, if any.
    pub fn cancel_selection(&mut self) -> Snapshot {
        if self.selection.take().is_none() {
            return self.snapshot();
        }
        debug!("selection cancelled");
        self.commit(Change::SelectionCancelled)
    }

    /// Locks the drawn rectangle in as the highlight and starts the step
    /// sequence. Does nothing while no rectangle has been drawn.
    pub fn confirm_selection(&mut self) -> Snapshot {
        let Some(rectangle) = self.selection.and_then(|s| s.rectangle) else {
            return self.snapshot();
        };
        self.selection = None;
        self.highlight = Some(rectangle);
        let started = self.steps.start();
        debug!(?rectangle, started, "region confirmed");
        self.commit(Change::RegionConfirmed)
    }

    // ---- steps --------------------------------------------------------------

    /// Stores `raw_value` for the current step and moves to the next one.
    pub fn submit_step(&mut self, raw_value: &str) -> Result<Snapshot, WorkflowError> {
        let step = self.steps.current_index().ok_or(WorkflowError::NotStarted)?;
        if raw_value.trim().is_empty() {
            return Err(WorkflowError::EmptyValue { step });
        }
        self.answers.upsert(step, raw_value);
        let next = self.steps.next()?;
        debug!(step, next, "answer submitted");
        Ok(self.commit(Change::AnswerSubmitted))
    }

    /// Moves to the next step without touching any stored answer.
    pub fn skip_step(&mut self) -> Result<Snapshot, WorkflowError> {
        let next = self.steps.next()?;
        debug!(next, "step skipped");
        Ok(self.commit(Change::StepSkipped))
    }

    pub fn previous_step(&mut self) -> Result<Snapshot, WorkflowError> {
        let previous = self.steps.previous()?;
        debug!(step = previous, "moved to previous step");
        Ok(self.commit(Change::StepMoved))
    }

    pub fn goto_step(&mut self, step: usize) -> Result<Snapshot, WorkflowError> {
        self.steps.goto(step)?;
        debug!(step, "jumped to step");
        Ok(self.commit(Change::StepMoved))
    }

    // ---- records ------------------------------------------------------------

    /// Completes the current record and moves on.
    ///
    /// Subscribers receive [`WorkflowEvent::RecordFinished`] with the record's
    /// answers first; the store is cleared right after.
    pub fn finish_record(&mut self) -> Snapshot {
        let finished = FinishedRecord {
            session_id: self.session_id,
            record: self.records.current(),
            answers: self.answers.to_sorted_vec(),
            finished_at: Utc::now(),
        };
        debug!(
            record = finished.record,
            answers = finished.answers.len(),
            "record finished"
        );
        self.emit(WorkflowEvent::RecordFinished(finished));
        self.advance_record()
    }

    /// Moves on without handing out the current answers, which are discarded.
    pub fn skip_record(&mut self) -> Snapshot {
        let record = self.records.current();
        debug!(record, "record skipped");
        self.emit(WorkflowEvent::RecordSkipped { record });
        self.advance_record()
    }

    /// Steps back one record (floored at 0). The answer store is kept.
    pub fn previous_record(&mut self) -> Snapshot {
        let record = self.records.previous();
        debug!(record, "moved to previous record");
        self.commit(Change::RecordRewound)
    }

    // A new record means a new image, so the region has to be drawn again.
    fn advance_record(&mut self) -> Snapshot {
        let record = self.records.next(&mut self.answers);
        self.selection = None;
        self.highlight = None;
        debug!(record, "advanced to record");
        self.commit(Change::RecordAdvanced)
    }

    fn commit(&mut self, change: Change) -> Snapshot {
        let snapshot = self.snapshot();
        self.emit(WorkflowEvent::StateChanged {
            change,
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    fn emit(&mut self, event: WorkflowEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}
