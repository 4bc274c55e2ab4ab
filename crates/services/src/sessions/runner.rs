use prep_core::model::{
    CompletedBy, Question, QuestionSetKey, SessionEvent, SessionPhase, SessionResult, SessionState,
};
use tracing::{debug, info};

use super::results::ResultQuery;
use crate::error::SessionError;

/// Owns one [`SessionState`] and is its only writer.
#[derive(Debug, Clone)]
pub struct SessionRunner {
    state: SessionState,
}

impl SessionRunner {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply one event, logging lifecycle transitions.
    ///
    /// Returns the result on the event that completes the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` when the event is not valid in the
    /// current phase.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Option<SessionResult>, SessionError> {
        let before = self.state.phase();
        let label = event_label(&event);
        let outcome = self.state.apply(event);
        match &outcome {
            Ok(Some(result)) => {
                let by = match result.completed_by() {
                    CompletedBy::Submitted => "submitted",
                    CompletedBy::TimeExpired => "time_expired",
                };
                info!(
                    set = %self.state.key(),
                    score = result.score(),
                    correct = result.correct_count(),
                    total = result.total_questions(),
                    elapsed_secs = result.elapsed_secs(),
                    completed_by = by,
                    "session complete"
                );
            }
            Ok(None) if before == SessionPhase::NotStarted && self.state.phase() == SessionPhase::Active => {
                info!(
                    set = %self.state.key(),
                    questions = self.state.questions().len(),
                    duration_secs = self.state.countdown().total_secs(),
                    "session started"
                );
            }
            Ok(None) => {}
            Err(e) => debug!(event = label, error = %e, "event rejected"),
        }
        outcome.map_err(SessionError::from)
    }

    pub(crate) fn reload(
        &mut self,
        key: QuestionSetKey,
        questions: Vec<Question>,
        duration_secs: u32,
    ) {
        self.state.reload(key, questions, duration_secs);
    }

    /// Query parameters for the results page, once complete.
    #[must_use]
    pub fn result_query(&self) -> Option<ResultQuery> {
        self.state.result().map(ResultQuery::from_result)
    }

    /// Full results path (with query string), once complete.
    #[must_use]
    pub fn results_path(&self) -> Option<String> {
        self.result_query()
            .map(|q| q.results_path(&self.state.key().subject, &self.state.key().kind))
    }
}

fn event_label(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::Start => "start",
        SessionEvent::Tick => "tick",
        SessionEvent::SelectOption { .. } => "select_option",
        SessionEvent::SelectCurrent(_) => "select_current",
        SessionEvent::ToggleFlag(_) => "toggle_flag",
        SessionEvent::ToggleSave(_) => "toggle_save",
        SessionEvent::ToggleFlagCurrent => "toggle_flag_current",
        SessionEvent::ToggleSaveCurrent => "toggle_save_current",
        SessionEvent::Next => "next",
        SessionEvent::Previous => "previous",
        SessionEvent::GoTo(_) => "go_to",
        SessionEvent::Submit => "submit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::QuestionId;

    fn question(id: &str, correct: usize) -> Question {
        Question::new(
            QuestionId::from(id),
            format!("prompt {id}"),
            vec!["a".into(), "b".into(), "c".into()],
            correct,
        )
        .unwrap()
    }

    fn runner(key: QuestionSetKey) -> SessionRunner {
        SessionRunner::new(SessionState::new(
            key,
            vec![question("q1", 0), question("q2", 1)],
            60,
        ))
    }

    #[test]
    fn results_path_for_mock_exam() {
        let mut runner = runner(QuestionSetKey::mock("mathematics", "2024"));
        assert!(runner.results_path().is_none());

        runner.apply(SessionEvent::Start).unwrap();
        runner.apply(SessionEvent::SelectCurrent(0)).unwrap();
        runner.apply(SessionEvent::Tick).unwrap();
        let result = runner.apply(SessionEvent::Submit).unwrap().unwrap();
        assert_eq!(result.score(), 50);

        assert_eq!(
            runner.results_path().unwrap(),
            "/subjects/mathematics/exam/results?score=50&total=2&time=1"
        );
    }

    #[test]
    fn practice_results_carry_topic_name() {
        let mut runner = runner(QuestionSetKey::practice("physics", "mechanics"));
        runner.apply(SessionEvent::Start).unwrap();
        runner.apply(SessionEvent::Submit).unwrap();
        assert_eq!(
            runner.results_path().unwrap(),
            "/subjects/physics/practice/results?score=0&total=2&time=0&topic=Mechanics"
        );
    }

    #[test]
    fn rejected_events_surface_as_state_errors() {
        let mut runner = runner(QuestionSetKey::mock("mathematics", "2024"));
        let err = runner.apply(SessionEvent::Next).unwrap_err();
        assert!(matches!(err, SessionError::State(_)));
    }
}
