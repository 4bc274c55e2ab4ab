use std::sync::Arc;

use prep_core::model::{Question, QuestionSetKey, SessionDurations, SessionState};
use rand::rng;
use rand::seq::SliceRandom;
use storage::repository::QuestionBank;
use tracing::{info, warn};

use super::runner::SessionRunner;
use crate::error::SessionError;

/// Loads question sets and builds runners for them.
#[derive(Clone)]
pub struct SessionLoader {
    questions: Arc<dyn QuestionBank>,
    durations: SessionDurations,
    shuffle: bool,
}

impl SessionLoader {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionBank>, durations: SessionDurations) -> Self {
        Self {
            questions,
            durations,
            shuffle: false,
        }
    }

    /// Shuffle question order on load. Off by default.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn durations(&self) -> SessionDurations {
        self.durations
    }

    /// Fetch the question set for `key`. Unknown sets come back empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question bank fails.
    pub async fn load_questions(&self, key: &QuestionSetKey) -> Result<Vec<Question>, SessionError> {
        let mut questions = self.questions.load_questions(key).await?;
        if questions.is_empty() {
            warn!(set = %key, "no questions available");
        } else {
            info!(set = %key, count = questions.len(), "loaded question set");
        }
        if self.shuffle {
            questions.shuffle(&mut rng());
        }
        Ok(questions)
    }

    /// Load `key` and wrap it in a not-yet-started runner.
    ///
    /// An empty set still yields a runner; it just cannot be started.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question bank fails.
    pub async fn open(&self, key: QuestionSetKey) -> Result<SessionRunner, SessionError> {
        let duration = self.durations.for_kind(&key.kind);
        self.open_with_duration(key, duration).await
    }

    /// Like [`SessionLoader::open`] with an explicit countdown length.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question bank fails.
    pub async fn open_with_duration(
        &self,
        key: QuestionSetKey,
        duration_secs: u32,
    ) -> Result<SessionRunner, SessionError> {
        let questions = self.load_questions(&key).await?;
        Ok(SessionRunner::new(SessionState::new(
            key,
            questions,
            duration_secs,
        )))
    }

    /// Swap a new question set into an existing runner, resetting its tracking
    /// state. The countdown restarts at the configured length for the new kind.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question bank fails.
    pub async fn reload(
        &self,
        runner: &mut SessionRunner,
        key: QuestionSetKey,
    ) -> Result<(), SessionError> {
        let questions = self.load_questions(&key).await?;
        let duration = self.durations.for_kind(&key.kind);
        runner.reload(key, questions, duration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::SessionPhase;
    use storage::repository::InMemoryRepository;

    fn loader() -> SessionLoader {
        let repo = InMemoryRepository::seeded().unwrap();
        SessionLoader::new(Arc::new(repo), SessionDurations::default())
    }

    #[tokio::test]
    async fn mock_and_practice_get_their_own_durations() {
        let loader = loader();
        let mock = loader
            .open(QuestionSetKey::mock("mathematics", "2024"))
            .await
            .unwrap();
        assert_eq!(mock.state().remaining_secs(), 3600);

        let practice = loader
            .open(QuestionSetKey::practice("physics", "mechanics"))
            .await
            .unwrap();
        assert_eq!(practice.state().remaining_secs(), 1800);
    }

    #[tokio::test]
    async fn unknown_set_opens_empty_and_cannot_start() {
        let mut runner = loader()
            .open(QuestionSetKey::mock("mathematics", "nonexistent"))
            .await
            .unwrap();
        assert!(runner.state().questions().is_empty());
        assert!(!runner.state().is_startable());
        assert!(runner.apply(prep_core::model::SessionEvent::Start).is_err());
        assert_eq!(runner.state().phase(), SessionPhase::NotStarted);
    }

    #[tokio::test]
    async fn shuffle_keeps_the_same_questions() {
        let key = QuestionSetKey::practice("mathematics", "trigonometry");
        let plain = loader().load_questions(&key).await.unwrap();
        let shuffled = loader().with_shuffle(true).load_questions(&key).await.unwrap();

        let mut a: Vec<_> = plain.iter().map(|q| q.id().to_string()).collect();
        let mut b: Vec<_> = shuffled.iter().map(|q| q.id().to_string()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn reload_resets_tracking() {
        let loader = loader();
        let mut runner = loader
            .open(QuestionSetKey::mock("mathematics", "2024"))
            .await
            .unwrap();
        runner.apply(prep_core::model::SessionEvent::Start).unwrap();
        runner
            .apply(prep_core::model::SessionEvent::SelectCurrent(1))
            .unwrap();

        loader
            .reload(&mut runner, QuestionSetKey::mock("mathematics", "2023"))
            .await
            .unwrap();
        assert_eq!(runner.state().questions().len(), 2);
        assert_eq!(runner.state().tracker().answered_count(), 0);
        assert_eq!(runner.state().phase(), SessionPhase::NotStarted);
    }

    #[tokio::test]
    async fn reload_across_kinds_takes_the_new_duration() {
        let loader = loader();
        let mut runner = loader
            .open(QuestionSetKey::mock("mathematics", "2024"))
            .await
            .unwrap();
        assert_eq!(runner.state().remaining_secs(), 3600);

        loader
            .reload(&mut runner, QuestionSetKey::practice("physics", "mechanics"))
            .await
            .unwrap();
        assert_eq!(runner.state().remaining_secs(), 1800);
        assert_eq!(runner.state().countdown().total_secs(), 1800);
    }
}
