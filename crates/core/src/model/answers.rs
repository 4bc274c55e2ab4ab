use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {0} is not part of the loaded set")]
    UnknownQuestion(QuestionId),

    #[error("option {option} is out of range for question {question_id} ({len} options)")]
    OptionOutOfRange {
        question_id: QuestionId,
        option: usize,
        len: usize,
    },
}

/// Per-session answer record plus the flag and save sets.
///
/// Flags and saves are presentational: scoring only reads `answers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTracker {
    answers: HashMap<QuestionId, usize>,
    flagged: HashSet<QuestionId>,
    saved: HashSet<QuestionId>,
}

impl AnswerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the selected option for `question`.
    ///
    /// Returns `false` when the same option was already selected.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` if `option` does not address one
    /// of the question's options.
    pub fn select_option(&mut self, question: &Question, option: usize) -> Result<bool, AnswerError> {
        if option >= question.option_count() {
            return Err(AnswerError::OptionOutOfRange {
                question_id: question.id().clone(),
                option,
                len: question.option_count(),
            });
        }
        let previous = self.answers.insert(question.id().clone(), option);
        Ok(previous != Some(option))
    }

    /// Flip flag membership; returns whether the question is flagged afterwards.
    pub fn toggle_flag(&mut self, id: &QuestionId) -> bool {
        toggle(&mut self.flagged, id)
    }

    /// Flip save membership; returns whether the question is saved afterwards.
    pub fn toggle_save(&mut self, id: &QuestionId) -> bool {
        toggle(&mut self.saved, id)
    }

    #[must_use]
    pub fn selected(&self, id: &QuestionId) -> Option<usize> {
        self.answers.get(id).copied()
    }

    #[must_use]
    pub fn is_flagged(&self, id: &QuestionId) -> bool {
        self.flagged.contains(id)
    }

    #[must_use]
    pub fn is_saved(&self, id: &QuestionId) -> bool {
        self.saved.contains(id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn flagged(&self) -> &HashSet<QuestionId> {
        &self.flagged
    }

    #[must_use]
    pub fn saved(&self) -> &HashSet<QuestionId> {
        &self.saved
    }

    /// Drop every key that does not belong to `questions`.
    pub fn retain_known(&mut self, questions: &[Question]) {
        let known: HashSet<&QuestionId> = questions.iter().map(Question::id).collect();
        self.answers.retain(|id, _| known.contains(id));
        self.flagged.retain(|id| known.contains(id));
        self.saved.retain(|id| known.contains(id));
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.flagged.clear();
        self.saved.clear();
    }
}

fn toggle(set: &mut HashSet<QuestionId>, id: &QuestionId) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            "Pick one",
            vec!["a".into(), "b".into(), "c".into()],
            1,
        )
        .unwrap()
    }

    #[test]
    fn select_records_and_overwrites() {
        let q = question("q1");
        let mut tracker = AnswerTracker::new();
        assert!(tracker.select_option(&q, 0).unwrap());
        assert!(tracker.select_option(&q, 2).unwrap());
        assert_eq!(tracker.selected(q.id()), Some(2));
        assert_eq!(tracker.answered_count(), 1);
    }

    #[test]
    fn reselecting_same_option_is_a_noop() {
        let q = question("q1");
        let mut tracker = AnswerTracker::new();
        tracker.select_option(&q, 1).unwrap();
        let before = tracker.clone();
        assert!(!tracker.select_option(&q, 1).unwrap());
        assert_eq!(tracker, before);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let q = question("q1");
        let mut tracker = AnswerTracker::new();
        let err = tracker.select_option(&q, 3).unwrap_err();
        assert!(matches!(err, AnswerError::OptionOutOfRange { len: 3, .. }));
        assert_eq!(tracker.answered_count(), 0);
    }

    #[test]
    fn toggles_are_involutions() {
        let id = QuestionId::new("q1");
        let mut tracker = AnswerTracker::new();

        assert!(tracker.toggle_flag(&id));
        assert!(!tracker.toggle_flag(&id));
        assert!(!tracker.is_flagged(&id));

        tracker.toggle_save(&id);
        assert!(tracker.is_saved(&id));
        tracker.toggle_save(&id);
        tracker.toggle_save(&id);
        assert!(tracker.is_saved(&id));
        assert!(!tracker.is_flagged(&id));
    }

    #[test]
    fn retain_known_discards_stale_keys() {
        let q1 = question("q1");
        let q2 = question("q2");
        let mut tracker = AnswerTracker::new();
        tracker.select_option(&q1, 0).unwrap();
        tracker.select_option(&q2, 0).unwrap();
        tracker.toggle_flag(q2.id());

        tracker.retain_known(std::slice::from_ref(&q1));
        assert_eq!(tracker.answered_count(), 1);
        assert_eq!(tracker.selected(q2.id()), None);
        assert!(tracker.flagged().is_empty());
    }
}
