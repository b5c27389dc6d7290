use serde::{Deserialize, Serialize};

/// The value entered for one guide step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub step: usize,
    pub value: String,
}

/// Answers for the record being transcribed, at most one per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: Vec<Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the answer for `step` if one exists, otherwise appends it.
    pub fn upsert(&mut self, step: usize, value: impl Into<String>) {
        let value = value.into();
        match self.answers.iter_mut().find(|a| a.step == step) {
            Some(existing) => existing.value = value,
            None => self.answers.push(Answer { step, value }),
        }
    }

    pub fn get(&self, step: usize) -> Option<&Answer> {
        self.answers.iter().find(|a| a.step == step)
    }

    pub fn count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Fields still without an answer out of `total_steps`.
    pub fn pending_count(&self, total_steps: usize) -> usize {
        total_steps.saturating_sub(self.count())
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn to_sorted_vec(&self) -> Vec<Answer> {
        let mut answers = self.answers.clone();
        answers.sort_by_key(|a| a.step);
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_is_idempotent_by_step() {
        let mut store = AnswerStore::new();
        store.upsert(2, "a");
        store.upsert(2, "b");
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(2).unwrap().value, "b");
    }

    #[test]
    fn get_missing_step_is_none() {
        let mut store = AnswerStore::new();
        store.upsert(0, "Sacramento");
        assert!(store.get(1).is_none());
    }

    #[test]
    fn pending_plus_count_equals_total() {
        let mut store = AnswerStore::new();
        let total = 9;
        for (step, value) in [(0, "a"), (4, "b"), (4, "c"), (8, "d")] {
            store.upsert(step, value);
            assert_eq!(store.pending_count(total) + store.count(), total);
        }
        assert_eq!(store.pending_count(total), 6);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = AnswerStore::new();
        store.upsert(0, "x");
        store.upsert(1, "y");
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.pending_count(9), 9);
    }

    #[test]
    fn sorted_vec_orders_by_step() {
        let mut store = AnswerStore::new();
        store.upsert(5, "five");
        store.upsert(1, "one");
        store.upsert(3, "three");
        let steps: Vec<usize> = store.to_sorted_vec().iter().map(|a| a.step).collect();
        assert_eq!(steps, vec![1, 3, 5]);
        // Insertion order is kept internally.
        assert_eq!(store.iter().next().unwrap().step, 5);
    }
}
