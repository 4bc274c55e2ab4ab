use serde::Serialize;
use thiserror::Error;

use crate::model::answers::AnswerTracker;
use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionSetKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("cannot score an empty question set")]
    EmptyQuestionSet,

    #[error("question set too large to score: {len}")]
    TooManyQuestions { len: usize },
}

/// Recorded for questions the user never answered.
pub const UNANSWERED: i32 = -1;

/// Per-question line of a session result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub question_id: QuestionId,
    /// Selected option index, or [`UNANSWERED`].
    pub user_answer: i32,
    pub is_correct: bool,
}

impl AnswerOutcome {
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        usize::try_from(self.user_answer).ok()
    }
}

/// How a session reached completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedBy {
    Submitted,
    TimeExpired,
}

/// Final, immutable result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    key: QuestionSetKey,
    total_questions: u32,
    correct_count: u32,
    score: u8,
    elapsed_secs: u32,
    answers: Vec<AnswerOutcome>,
    completed_by: CompletedBy,
}

impl SessionResult {
    /// Score `questions` against the tracker's answers.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuestionSet` when there is nothing to score.
    pub fn tally(
        key: QuestionSetKey,
        questions: &[Question],
        tracker: &AnswerTracker,
        elapsed_secs: u32,
        completed_by: CompletedBy,
    ) -> Result<Self, ScoreError> {
        let answers = grade(questions, tracker);
        let total_questions = u32::try_from(answers.len())
            .map_err(|_| ScoreError::TooManyQuestions { len: answers.len() })?;
        let correct_count = u32::try_from(answers.iter().filter(|a| a.is_correct).count())
            .map_err(|_| ScoreError::TooManyQuestions { len: answers.len() })?;
        let score = score_percent(correct_count, total_questions)?;

        Ok(Self {
            key,
            total_questions,
            correct_count,
            score,
            elapsed_secs,
            answers,
            completed_by,
        })
    }

    #[must_use]
    pub fn key(&self) -> &QuestionSetKey {
        &self.key
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerOutcome] {
        &self.answers
    }

    #[must_use]
    pub fn completed_by(&self) -> CompletedBy {
        self.completed_by
    }
}

/// Compare every question against the recorded answer.
#[must_use]
pub fn grade(questions: &[Question], tracker: &AnswerTracker) -> Vec<AnswerOutcome> {
    questions
        .iter()
        .map(|q| {
            let selected = tracker.selected(q.id());
            AnswerOutcome {
                question_id: q.id().clone(),
                user_answer: selected
                    .and_then(|s| i32::try_from(s).ok())
                    .unwrap_or(UNANSWERED),
                is_correct: selected.is_some_and(|s| q.is_correct(s)),
            }
        })
        .collect()
}

/// `round(100 * correct / total)`, rounding halves up.
///
/// # Errors
///
/// Returns `ScoreError::EmptyQuestionSet` if `total` is zero.
pub fn score_percent(correct: u32, total: u32) -> Result<u8, ScoreError> {
    if total == 0 {
        return Err(ScoreError::EmptyQuestionSet);
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    let pct = (200 * correct + total) / (2 * total);
    Ok(u8::try_from(pct).unwrap_or(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            "Which?",
            vec!["a".into(), "b".into(), "c".into()],
            correct,
        )
        .unwrap()
    }

    #[test]
    fn half_correct_scores_fifty() {
        let questions = vec![question("q1", 0), question("q2", 1)];
        let mut tracker = AnswerTracker::new();
        tracker.select_option(&questions[0], 0).unwrap();
        tracker.select_option(&questions[1], 2).unwrap();

        let result = SessionResult::tally(
            QuestionSetKey::mock("mathematics", "2024"),
            &questions,
            &tracker,
            120,
            CompletedBy::Submitted,
        )
        .unwrap();

        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.score(), 50);
        assert_eq!(result.total_questions(), 2);
        assert_eq!(result.elapsed_secs(), 120);
    }

    #[test]
    fn unanswered_is_incorrect_with_sentinel() {
        let questions = vec![question("q1", 0)];
        let tracker = AnswerTracker::new();
        let outcomes = grade(&questions, &tracker);
        assert_eq!(outcomes[0].user_answer, UNANSWERED);
        assert!(!outcomes[0].is_correct);
        assert_eq!(outcomes[0].selected(), None);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(score_percent(1, 3).unwrap(), 33);
        assert_eq!(score_percent(2, 3).unwrap(), 67);
        assert_eq!(score_percent(1, 8).unwrap(), 13);
        assert_eq!(score_percent(5, 5).unwrap(), 100);
        assert_eq!(score_percent(0, 4).unwrap(), 0);
    }

    #[test]
    fn empty_set_is_not_scored() {
        assert_eq!(score_percent(0, 0), Err(ScoreError::EmptyQuestionSet));
        let err = SessionResult::tally(
            QuestionSetKey::practice("mathematics", "nonexistent"),
            &[],
            &AnswerTracker::new(),
            0,
            CompletedBy::Submitted,
        )
        .unwrap_err();
        assert_eq!(err, ScoreError::EmptyQuestionSet);
    }

    #[test]
    fn outcomes_serialize_camel_case() {
        let outcome = AnswerOutcome {
            question_id: QuestionId::new("q1"),
            user_answer: UNANSWERED,
            is_correct: false,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"questionId":"q1","userAnswer":-1,"isCorrect":false}"#);
    }
}
