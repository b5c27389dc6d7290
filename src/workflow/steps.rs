use crate::error::WorkflowError;

use super::guide::{Guide, GuideStep};

/// Circular navigation over the steps of a [`Guide`].
///
/// Starts in the not-started state (`current_index() == None`). The only way
/// out of it is [`start`](StepSequencer::start) or a direct
/// [`goto`](StepSequencer::goto); from then on `next` and `previous` wrap
/// around the ends of the guide.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    guide: Guide,
    current: Option<usize>,
}

impl StepSequencer {
    pub fn new(guide: Guide) -> Self {
        Self {
            guide,
            current: None,
        }
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    pub fn step_count(&self) -> usize {
        self.guide.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Moves to the first step. Returns `false` (and does nothing) if already started.
    pub fn start(&mut self) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.current = Some(0);
        true
    }

    pub fn next(&mut self) -> Result<usize, WorkflowError> {
        let current = self.current.ok_or(WorkflowError::NotStarted)?;
        let next = (current + 1) % self.step_count();
        self.current = Some(next);
        Ok(next)
    }

    pub fn previous(&mut self) -> Result<usize, WorkflowError> {
        let current = self.current.ok_or(WorkflowError::NotStarted)?;
        let count = self.step_count();
        let previous = (current + count - 1) % count;
        self.current = Some(previous);
        Ok(previous)
    }

    pub fn goto(&mut self, step: usize) -> Result<usize, WorkflowError> {
        if step >= self.step_count() {
            return Err(WorkflowError::OutOfRange {
                step,
                step_count: self.step_count(),
            });
        }
        self.current = Some(step);
        Ok(step)
    }

    pub fn current(&self) -> Result<&GuideStep, WorkflowError> {
        let index = self.current.ok_or(WorkflowError::NotStarted)?;
        self.guide
            .get(index)
            .ok_or(WorkflowError::OutOfRange {
                step: index,
                step_count: self.step_count(),
            })
    }

    /// One-based progress label, e.g. `"3/9"`; `"0/9"` before the first step.
    pub fn counter_label(&self) -> String {
        let shown = self.current.map_or(0, |i| i + 1);
        format!("{shown}/{}", self.step_count())
    }
}
