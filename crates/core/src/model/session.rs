use std::fmt;

use thiserror::Error;

use crate::model::answers::{AnswerError, AnswerTracker};
use crate::model::catalog::rounded_percent;
use crate::model::countdown::{Countdown, TickOutcome};
use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionSetKey, SessionKind};
use crate::model::scoring::{CompletedBy, ScoreError, SessionResult};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("no questions available for {0}")]
    NoQuestions(QuestionSetKey),

    #[error("session already started")]
    AlreadyStarted,

    #[error("session is not active")]
    NotActive,

    #[error("session duration must be > 0")]
    InvalidDuration,

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

//
// ─── CONFIGURATION ─────────────────────────────────────────────────────────────
//

/// Time limits per session kind, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDurations {
    mock_secs: u32,
    practice_secs: u32,
}

impl SessionDurations {
    pub const DEFAULT_MOCK_SECS: u32 = 60 * 60;
    pub const DEFAULT_PRACTICE_SECS: u32 = 30 * 60;

    /// # Errors
    ///
    /// Returns `SessionStateError::InvalidDuration` if either limit is zero.
    pub fn new(mock_secs: u32, practice_secs: u32) -> Result<Self, SessionStateError> {
        if mock_secs == 0 || practice_secs == 0 {
            return Err(SessionStateError::InvalidDuration);
        }
        Ok(Self {
            mock_secs,
            practice_secs,
        })
    }

    #[must_use]
    pub fn mock_secs(&self) -> u32 {
        self.mock_secs
    }

    #[must_use]
    pub fn practice_secs(&self) -> u32 {
        self.practice_secs
    }

    #[must_use]
    pub fn for_kind(&self, kind: &SessionKind) -> u32 {
        match kind {
            SessionKind::Mock { .. } => self.mock_secs,
            SessionKind::Practice { .. } => self.practice_secs,
        }
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            mock_secs: Self::DEFAULT_MOCK_SECS,
            practice_secs: Self::DEFAULT_PRACTICE_SECS,
        }
    }
}

//
// ─── PHASES AND EVENTS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Active,
    Complete,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::NotStarted => "not started",
            SessionPhase::Active => "active",
            SessionPhase::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    /// One second of wall time elapsed.
    Tick,
    SelectOption {
        question_id: QuestionId,
        option: usize,
    },
    /// Select an option on the question under the cursor.
    SelectCurrent(usize),
    ToggleFlag(QuestionId),
    ToggleSave(QuestionId),
    /// Flag or save the question under the cursor.
    ToggleFlagCurrent,
    ToggleSaveCurrent,
    Next,
    Previous,
    GoTo(usize),
    Submit,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Exam/practice session driven by [`SessionState::apply`].
///
/// Timer expiry and manual submission both funnel into the same completion
/// path, and completion only happens while `Active`, so a session is scored at
/// most once.
#[derive(Debug, Clone)]
pub struct SessionState {
    key: QuestionSetKey,
    questions: Vec<Question>,
    phase: SessionPhase,
    current: usize,
    countdown: Countdown,
    tracker: AnswerTracker,
    explanation_visible: bool,
    result: Option<SessionResult>,
}

impl SessionState {
    /// Create a session over `questions`. An empty set is allowed but can
    /// never be started.
    #[must_use]
    pub fn new(key: QuestionSetKey, questions: Vec<Question>, duration_secs: u32) -> Self {
        Self {
            key,
            questions,
            phase: SessionPhase::NotStarted,
            current: 0,
            countdown: Countdown::new(duration_secs),
            tracker: AnswerTracker::new(),
            explanation_visible: false,
            result: None,
        }
    }

    /// Swap in a new question set and reset all tracking state, including the
    /// countdown, which restarts at `duration_secs`.
    pub fn reload(&mut self, key: QuestionSetKey, questions: Vec<Question>, duration_secs: u32) {
        self.key = key;
        self.questions = questions;
        self.tracker.clear();
        self.phase = SessionPhase::NotStarted;
        self.current = 0;
        self.countdown = Countdown::new(duration_secs);
        self.explanation_visible = false;
        self.result = None;
    }

    /// Apply one event.
    ///
    /// Returns `Some(result)` exactly once: on the event that completes the
    /// session. Ticks outside `Active` and submits after completion are
    /// ignored.
    ///
    /// # Errors
    ///
    /// - `NoQuestions` when starting an empty set.
    /// - `AlreadyStarted` when starting twice.
    /// - `NotActive` for answer/flag/navigation events outside `Active`, or a
    ///   submit before start.
    /// - `Answer` for unknown questions or out-of-range options.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Option<SessionResult>, SessionStateError> {
        match event {
            SessionEvent::Start => {
                if self.questions.is_empty() {
                    return Err(SessionStateError::NoQuestions(self.key.clone()));
                }
                if self.phase != SessionPhase::NotStarted {
                    return Err(SessionStateError::AlreadyStarted);
                }
                self.phase = SessionPhase::Active;
                self.countdown.start();
                Ok(None)
            }
            SessionEvent::Tick => {
                if self.phase != SessionPhase::Active {
                    return Ok(None);
                }
                match self.countdown.tick() {
                    TickOutcome::Expired => self.complete(CompletedBy::TimeExpired).map(Some),
                    TickOutcome::Running(_) | TickOutcome::Idle => Ok(None),
                }
            }
            SessionEvent::Submit => match self.phase {
                SessionPhase::NotStarted => Err(SessionStateError::NotActive),
                SessionPhase::Complete => Ok(None),
                SessionPhase::Active => self.complete(CompletedBy::Submitted).map(Some),
            },
            SessionEvent::SelectOption { question_id, option } => {
                self.require_active()?;
                let index = self.index_of(&question_id)?;
                self.select(index, option)?;
                Ok(None)
            }
            SessionEvent::SelectCurrent(option) => {
                self.require_active()?;
                self.select(self.current, option)?;
                Ok(None)
            }
            SessionEvent::ToggleFlag(question_id) => {
                self.require_active()?;
                self.index_of(&question_id)?;
                self.tracker.toggle_flag(&question_id);
                Ok(None)
            }
            SessionEvent::ToggleSave(question_id) => {
                self.require_active()?;
                self.index_of(&question_id)?;
                self.tracker.toggle_save(&question_id);
                Ok(None)
            }
            SessionEvent::ToggleFlagCurrent => {
                self.require_active()?;
                let id = self.questions[self.current].id().clone();
                self.tracker.toggle_flag(&id);
                Ok(None)
            }
            SessionEvent::ToggleSaveCurrent => {
                self.require_active()?;
                let id = self.questions[self.current].id().clone();
                self.tracker.toggle_save(&id);
                Ok(None)
            }
            SessionEvent::Next => {
                self.require_active()?;
                if self.current + 1 < self.questions.len() {
                    self.move_to(self.current + 1);
                }
                Ok(None)
            }
            SessionEvent::Previous => {
                self.require_active()?;
                if self.current > 0 {
                    self.move_to(self.current - 1);
                }
                Ok(None)
            }
            SessionEvent::GoTo(index) => {
                self.require_active()?;
                if index < self.questions.len() {
                    self.move_to(index);
                }
                Ok(None)
            }
        }
    }

    fn require_active(&self) -> Result<(), SessionStateError> {
        if self.phase == SessionPhase::Active {
            Ok(())
        } else {
            Err(SessionStateError::NotActive)
        }
    }

    fn index_of(&self, id: &QuestionId) -> Result<usize, SessionStateError> {
        self.questions
            .iter()
            .position(|q| q.id() == id)
            .ok_or_else(|| AnswerError::UnknownQuestion(id.clone()).into())
    }

    fn select(&mut self, index: usize, option: usize) -> Result<(), SessionStateError> {
        let question = &self.questions[index];
        self.tracker.select_option(question, option)?;
        // Practice reveals the explanation right away; it does not affect scoring.
        if self.key.kind.is_practice() && index == self.current {
            self.explanation_visible = true;
        }
        Ok(())
    }

    fn move_to(&mut self, index: usize) {
        if index != self.current {
            self.current = index;
            self.explanation_visible = false;
        }
    }

    fn complete(&mut self, by: CompletedBy) -> Result<SessionResult, SessionStateError> {
        self.countdown.stop();
        let result = SessionResult::tally(
            self.key.clone(),
            &self.questions,
            &self.tracker,
            self.countdown.elapsed_secs(),
            by,
        )?;
        self.phase = SessionPhase::Complete;
        self.result = Some(result.clone());
        Ok(result)
    }

    // Accessors

    #[must_use]
    pub fn key(&self) -> &QuestionSetKey {
        &self.key
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_startable(&self) -> bool {
        self.phase == SessionPhase::NotStarted && !self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn tracker(&self) -> &AnswerTracker {
        &self.tracker
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Position of the cursor through the set, as a whole percentage rounded
    /// half up.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        rounded_percent(self.current as u64 + 1, self.questions.len() as u64)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scoring::UNANSWERED;

    fn question(id: &str, correct: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Question {id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
        )
        .unwrap()
        .with_explanation("because")
    }

    fn mock_session(duration: u32) -> SessionState {
        SessionState::new(
            QuestionSetKey::mock("mathematics", "2024"),
            vec![question("q1", 0), question("q2", 1)],
            duration,
        )
    }

    #[test]
    fn empty_set_cannot_start() {
        let key = QuestionSetKey::practice("mathematics", "nonexistent");
        let mut session = SessionState::new(key.clone(), Vec::new(), 1800);
        assert!(!session.is_startable());
        let err = session.apply(SessionEvent::Start).unwrap_err();
        assert_eq!(err, SessionStateError::NoQuestions(key));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn timer_does_not_advance_before_start() {
        let mut session = mock_session(10);
        for _ in 0..5 {
            assert_eq!(session.apply(SessionEvent::Tick).unwrap(), None);
        }
        assert_eq!(session.remaining_secs(), 10);
    }

    #[test]
    fn submit_scores_once() {
        let mut session = mock_session(60);
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::SelectCurrent(0)).unwrap();
        session.apply(SessionEvent::Next).unwrap();
        session.apply(SessionEvent::SelectCurrent(2)).unwrap();
        session.apply(SessionEvent::Tick).unwrap();

        let result = session.apply(SessionEvent::Submit).unwrap().unwrap();
        assert_eq!(result.score(), 50);
        assert_eq!(result.elapsed_secs(), 1);
        assert_eq!(result.completed_by(), CompletedBy::Submitted);

        assert_eq!(session.apply(SessionEvent::Submit).unwrap(), None);
        assert_eq!(session.apply(SessionEvent::Tick).unwrap(), None);
        assert_eq!(session.result(), Some(&result));
        assert_eq!(session.phase(), SessionPhase::Complete);
    }

    #[test]
    fn timer_expiry_then_submit_scores_once() {
        let mut session = mock_session(2);
        session.apply(SessionEvent::Start).unwrap();
        assert_eq!(session.apply(SessionEvent::Tick).unwrap(), None);
        let result = session.apply(SessionEvent::Tick).unwrap().unwrap();
        assert_eq!(result.completed_by(), CompletedBy::TimeExpired);
        assert_eq!(result.elapsed_secs(), 2);
        assert_eq!(result.answers()[0].user_answer, UNANSWERED);

        assert_eq!(session.apply(SessionEvent::Submit).unwrap(), None);
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn timer_stops_after_completion() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::Submit).unwrap();
        let remaining = session.remaining_secs();
        session.apply(SessionEvent::Tick).unwrap();
        assert_eq!(session.remaining_secs(), remaining);
    }

    #[test]
    fn answering_requires_active_session() {
        let mut session = mock_session(30);
        let err = session.apply(SessionEvent::SelectCurrent(0)).unwrap_err();
        assert_eq!(err, SessionStateError::NotActive);
        let err = session.apply(SessionEvent::Submit).unwrap_err();
        assert_eq!(err, SessionStateError::NotActive);
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        let err = session
            .apply(SessionEvent::ToggleFlag(QuestionId::new("other")))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionStateError::Answer(AnswerError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn navigation_clamps_at_edges() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::Previous).unwrap();
        assert_eq!(session.current_index(), 0);
        session.apply(SessionEvent::Next).unwrap();
        session.apply(SessionEvent::Next).unwrap();
        assert_eq!(session.current_index(), 1);
        session.apply(SessionEvent::GoTo(9)).unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn cursor_progress_rounds_half_up() {
        let mut session = SessionState::new(
            QuestionSetKey::mock("mathematics", "2024"),
            vec![question("q1", 0), question("q2", 1), question("q3", 2)],
            30,
        );
        session.apply(SessionEvent::Start).unwrap();
        assert_eq!(session.progress_percent(), 33);
        session.apply(SessionEvent::Next).unwrap();
        assert_eq!(session.progress_percent(), 67);
    }

    #[test]
    fn flags_do_not_affect_score() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        let id = QuestionId::new("q1");
        session.apply(SessionEvent::ToggleFlag(id.clone())).unwrap();
        session.apply(SessionEvent::ToggleSave(id.clone())).unwrap();
        assert!(session.tracker().is_flagged(&id));
        assert!(session.tracker().is_saved(&id));
        let result = session.apply(SessionEvent::Submit).unwrap().unwrap();
        assert_eq!(result.correct_count(), 0);
    }

    #[test]
    fn current_question_toggles_follow_the_cursor() {
        let mut session = mock_session(30);
        assert_eq!(
            session.apply(SessionEvent::ToggleFlagCurrent),
            Err(SessionStateError::NotActive)
        );
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::Next).unwrap();
        session.apply(SessionEvent::ToggleFlagCurrent).unwrap();
        session.apply(SessionEvent::ToggleSaveCurrent).unwrap();
        session.apply(SessionEvent::ToggleSaveCurrent).unwrap();

        let q2 = QuestionId::new("q2");
        assert!(session.tracker().is_flagged(&q2));
        assert!(!session.tracker().is_saved(&q2));
        assert!(!session.tracker().is_flagged(&QuestionId::new("q1")));
    }

    #[test]
    fn practice_reveals_explanation_until_navigation() {
        let mut session = SessionState::new(
            QuestionSetKey::practice("mathematics", "algebra"),
            vec![question("q1", 0), question("q2", 0)],
            1800,
        );
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::SelectCurrent(3)).unwrap();
        assert!(session.explanation_visible());
        session.apply(SessionEvent::Next).unwrap();
        assert!(!session.explanation_visible());
    }

    #[test]
    fn mock_never_reveals_explanation() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::SelectCurrent(0)).unwrap();
        assert!(!session.explanation_visible());
    }

    #[test]
    fn reload_resets_tracking() {
        let mut session = mock_session(30);
        session.apply(SessionEvent::Start).unwrap();
        session.apply(SessionEvent::SelectCurrent(0)).unwrap();
        session.apply(SessionEvent::Tick).unwrap();

        session.reload(
            QuestionSetKey::mock("mathematics", "2023"),
            vec![question("q9", 0)],
            45,
        );
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.tracker().answered_count(), 0);
        assert_eq!(session.remaining_secs(), 45);
        assert!(session.result().is_none());
    }

    #[test]
    fn durations_reject_zero() {
        assert_eq!(
            SessionDurations::new(0, 10),
            Err(SessionStateError::InvalidDuration)
        );
        let durations = SessionDurations::default();
        assert_eq!(
            durations.for_kind(&SessionKind::Mock { year: "2024".into() }),
            3600
        );
        assert_eq!(
            durations.for_kind(&SessionKind::Practice {
                topic: "algebra".into()
            }),
            1800
        );
    }
}
