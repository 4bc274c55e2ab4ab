use std::sync::Arc;

use prep_core::model::{
    ExamOrigin, Note, NoteDraft, NoteId, QuestionSetKey, SavedQuestion, SavedQuestionId,
    topic_display_name,
};
use serde::Serialize;
use storage::repository::{NewSavedQuestionRecord, NoteRepository, QuestionBank, SavedQuestionRepository};
use tracing::info;

use crate::Clock;
use crate::error::NoteServiceError;

/// Default file name for [`NotesService::export_json`] output.
pub const EXPORT_FILE_NAME: &str = "exam-prep-notes.json";

/// Subject filter for listings: everything, or one exact subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubjectFilter {
    #[default]
    All,
    Only(String),
}

impl SubjectFilter {
    /// `"all"` (any case) or empty means no filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            SubjectFilter::All
        } else {
            SubjectFilter::Only(raw.to_owned())
        }
    }

    fn accepts(&self, subject: &str) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::Only(wanted) => wanted == subject,
        }
    }
}

/// Search text plus subject filter, applied to both notes and saved questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub search: String,
    pub subject: SubjectFilter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotesExport<'a> {
    notes: &'a [Note],
    saved_questions: &'a [SavedQuestion],
}

/// Notes and saved-question management.
#[derive(Clone)]
pub struct NotesService {
    clock: Clock,
    notes: Arc<dyn NoteRepository>,
    saved: Arc<dyn SavedQuestionRepository>,
}

impl NotesService {
    #[must_use]
    pub fn new(
        clock: Clock,
        notes: Arc<dyn NoteRepository>,
        saved: Arc<dyn SavedQuestionRepository>,
    ) -> Self {
        Self {
            clock,
            notes,
            saved,
        }
    }

    /// Validate `draft` and store it as a new note.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Note` if a required field is missing; nothing
    /// is written in that case.
    pub async fn create_note(&self, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let note = self.notes.insert_note(validated).await?;
        info!(note_id = %note.id, subject = %note.subject, "note created");
        Ok(note)
    }

    /// Replace the fields of note `id` with `draft`.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Note` on validation failure and
    /// `NoteServiceError::Storage` if the note does not exist.
    pub async fn update_note(&self, id: NoteId, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let note = self.notes.update_note(id, validated).await?;
        info!(note_id = %id, "note updated");
        Ok(note)
    }

    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if the note does not exist.
    pub async fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.notes.delete_note(id).await?;
        info!(note_id = %id, "note deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if the note does not exist.
    pub async fn get_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        Ok(self.notes.get_note(id).await?)
    }

    /// Notes matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if the repository fails.
    pub async fn list_notes(&self, query: &NoteQuery) -> Result<Vec<Note>, NoteServiceError> {
        let needle = query.search.to_lowercase();
        let mut notes = self.notes.list_notes().await?;
        notes.retain(|n| query.subject.accepts(&n.subject) && n.matches(&needle));
        Ok(notes)
    }

    /// Saved questions matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if the repository fails.
    pub async fn list_saved_questions(
        &self,
        query: &NoteQuery,
    ) -> Result<Vec<SavedQuestion>, NoteServiceError> {
        let needle = query.search.to_lowercase();
        let mut saved = self.saved.list_saved_questions().await?;
        saved.retain(|q| query.subject.accepts(&q.subject) && q.matches(&needle));
        Ok(saved)
    }

    /// Bookmark question `question_id` from the set `key`.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::UnknownQuestion` if the set does not contain it.
    pub async fn save_question(
        &self,
        bank: &dyn QuestionBank,
        key: &QuestionSetKey,
        question_id: &str,
    ) -> Result<SavedQuestion, NoteServiceError> {
        let question = bank
            .load_questions(key)
            .await?
            .into_iter()
            .find(|q| q.id().as_str() == question_id)
            .ok_or_else(|| NoteServiceError::UnknownQuestion(question_id.to_owned()))?;
        let saved = self
            .saved
            .insert_saved_question(NewSavedQuestionRecord {
                question,
                subject: topic_display_name(&key.subject),
                origin: ExamOrigin::from_kind(&key.kind),
                saved_at: self.clock.now(),
            })
            .await?;
        info!(saved_id = %saved.id, set = %key, "question saved");
        Ok(saved)
    }

    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if the saved question does not exist.
    pub async fn delete_saved_question(&self, id: SavedQuestionId) -> Result<(), NoteServiceError> {
        self.saved.delete_saved_question(id).await?;
        info!(saved_id = %id, "saved question deleted");
        Ok(())
    }

    /// All notes and saved questions as pretty-printed JSON:
    /// `{ "notes": [...], "savedQuestions": [...] }`.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` if loading fails or
    /// `NoteServiceError::Export` if encoding fails.
    pub async fn export_json(&self) -> Result<String, NoteServiceError> {
        let notes = self.notes.list_notes().await?;
        let saved_questions = self.saved.list_saved_questions().await?;
        let json = serde_json::to_string_pretty(&NotesExport {
            notes: &notes,
            saved_questions: &saved_questions,
        })?;
        info!(
            notes = notes.len(),
            saved_questions = saved_questions.len(),
            "notes exported"
        );
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, StorageError};

    fn service(repo: &InMemoryRepository) -> NotesService {
        NotesService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    fn draft(title: &str, subject: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: "Remember the chain rule".into(),
            subject: subject.into(),
            tags: "derivatives, calculus".into(),
            ..NoteDraft::default()
        }
    }

    #[tokio::test]
    async fn empty_title_is_rejected_and_nothing_is_written() {
        let repo = InMemoryRepository::seeded().unwrap();
        let notes = service(&repo);
        let err = notes.create_note(draft("  ", "Mathematics")).await.unwrap_err();
        assert!(matches!(
            err,
            NoteServiceError::Note(prep_core::model::NoteError::EmptyTitle)
        ));
        assert_eq!(notes.list_notes(&NoteQuery::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn new_notes_come_first() {
        let repo = InMemoryRepository::seeded().unwrap();
        let notes = service(&repo);
        notes.create_note(draft("Chain rule", "Mathematics")).await.unwrap();
        let listed = notes.list_notes(&NoteQuery::default()).await.unwrap();
        assert_eq!(listed[0].title, "Chain rule");
        assert_eq!(listed[0].tags, vec!["derivatives", "calculus"]);
    }

    #[tokio::test]
    async fn search_and_subject_filter_combine() {
        let repo = InMemoryRepository::seeded().unwrap();
        let notes = service(&repo);

        let query = NoteQuery {
            search: "LAWS".into(),
            subject: SubjectFilter::All,
        };
        let hits = notes.list_notes(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].subject, "Physics");

        let query = NoteQuery {
            search: String::new(),
            subject: SubjectFilter::parse("Mathematics"),
        };
        assert_eq!(notes.list_notes(&query).await.unwrap().len(), 1);
        assert_eq!(notes.list_saved_questions(&query).await.unwrap().len(), 1);

        let query = NoteQuery {
            search: "ionizes".into(),
            subject: SubjectFilter::All,
        };
        let saved = notes.list_saved_questions(&query).await.unwrap();
        assert_eq!(saved[0].subject, "Chemistry");
    }

    #[tokio::test]
    async fn subject_match_is_exact() {
        let repo = InMemoryRepository::seeded().unwrap();
        let query = NoteQuery {
            search: String::new(),
            subject: SubjectFilter::parse("mathematics"),
        };
        assert!(service(&repo).list_notes(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = InMemoryRepository::seeded().unwrap();
        let notes = service(&repo);
        let id = NoteId::new(2);

        let mut edit = NoteDraft::from_note(&notes.get_note(id).await.unwrap());
        edit.title = "Newton".into();
        let updated = notes.update_note(id, edit).await.unwrap();
        assert_eq!(updated.title, "Newton");
        assert_eq!(updated.tags, vec!["fundamentals", "laws", "motion"]);

        notes.delete_note(id).await.unwrap();
        assert!(matches!(
            notes.delete_note(id).await,
            Err(NoteServiceError::Storage(StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn save_question_records_origin() {
        let repo = InMemoryRepository::seeded().unwrap();
        let notes = service(&repo);
        let key = QuestionSetKey::mock("mathematics", "2024");

        let saved = notes.save_question(&repo, &key, "math-2024-4").await.unwrap();
        assert_eq!(saved.origin, ExamOrigin::Mock { year: 2024 });
        assert_eq!(saved.subject, "Mathematics");
        assert_eq!(saved.topic.as_deref(), Some("Calculus"));

        assert!(matches!(
            notes.save_question(&repo, &key, "nope").await,
            Err(NoteServiceError::UnknownQuestion(_))
        ));
    }

    #[tokio::test]
    async fn export_has_both_collections() {
        let repo = InMemoryRepository::seeded().unwrap();
        let json = service(&repo).export_json().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["notes"].as_array().unwrap().len(), 3);
        let saved = value["savedQuestions"].as_array().unwrap();
        assert_eq!(saved[1]["examType"], "mock");
        assert_eq!(saved[1]["year"], 2023);
        assert_eq!(saved[0]["correctAnswer"], 1);
    }
}
