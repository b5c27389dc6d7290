use super::answers::AnswerStore;

/// Index of the record (image) currently being transcribed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSequencer {
    current: usize,
}

impl RecordSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advances to the next record. Answers never carry over, so the store for
    /// the record being left is cleared.
    pub fn next(&mut self, answers: &mut AnswerStore) -> usize {
        self.current += 1;
        answers.reset();
        self.current
    }

    /// Steps back one record, stopping at 0. Answers are left alone.
    pub fn previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments_and_resets_answers() {
        let mut records = RecordSequencer::new();
        let mut answers = AnswerStore::new();
        answers.upsert(0, "Sacramento");

        assert_eq!(records.next(&mut answers), 1);
        assert!(answers.is_empty());
        assert_eq!(records.next(&mut answers), 2);
    }

    #[test]
    fn previous_is_floored_at_zero() {
        let mut records = RecordSequencer::new();
        assert_eq!(records.previous(), 0);

        let mut answers = AnswerStore::new();
        records.next(&mut answers);
        assert_eq!(records.previous(), 0);
        assert_eq!(records.previous(), 0);
    }
}
