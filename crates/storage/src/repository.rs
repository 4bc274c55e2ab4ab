use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{
    ExamOrigin, Note, NoteId, Question, QuestionSetKey, SavedQuestion, SavedQuestionId,
    StudyChapter, Subject, ValidatedNote,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::seed;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

/// Insert shape for a bookmarked question; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewSavedQuestionRecord {
    pub question: Question,
    pub subject: String,
    pub origin: ExamOrigin,
    pub saved_at: DateTime<Utc>,
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Read-only source of question sets.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Load the questions for a subject and year/topic.
    ///
    /// Unknown subjects or sets yield an empty list, never an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the backend itself fails.
    async fn load_questions(&self, key: &QuestionSetKey) -> Result<Vec<Question>, StorageError>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a new note and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the note cannot be stored.
    async fn insert_note(&self, note: ValidatedNote) -> Result<Note, StorageError>;

    /// Replace the editable fields of an existing note.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no note has `id`.
    async fn update_note(&self, id: NoteId, note: ValidatedNote) -> Result<Note, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no note has `id`.
    async fn delete_note(&self, id: NoteId) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no note has `id`.
    async fn get_note(&self, id: NoteId) -> Result<Note, StorageError>;

    /// All notes, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn list_notes(&self) -> Result<Vec<Note>, StorageError>;
}

#[async_trait]
pub trait SavedQuestionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn insert_saved_question(
        &self,
        record: NewSavedQuestionRecord,
    ) -> Result<SavedQuestion, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no saved question has `id`.
    async fn delete_saved_question(&self, id: SavedQuestionId) -> Result<(), StorageError>;

    /// All saved questions, most recently saved first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn list_saved_questions(&self) -> Result<Vec<SavedQuestion>, StorageError>;
}

#[async_trait]
pub trait StudyRepository: Send + Sync {
    /// Decoded chapters for a topic; empty when nothing is authored for it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn load_chapters(
        &self,
        subject: &str,
        topic: &str,
    ) -> Result<Vec<StudyChapter>, StorageError>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown slug.
    async fn get_subject(&self, slug: &str) -> Result<Subject, StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn seeded(rows: Vec<T>, id_of: impl Fn(&T) -> u64) -> Self {
        let next_id = rows.iter().map(id_of).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory repository for every contract. Nothing outlives the process.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<HashMap<QuestionSetKey, Vec<Question>>>>,
    notes: Arc<Mutex<Table<Note>>>,
    saved: Arc<Mutex<Table<SavedQuestion>>>,
    study: Arc<Mutex<HashMap<(String, String), Vec<StudyChapter>>>>,
    subjects: Arc<Mutex<Vec<Subject>>>,
}

impl InMemoryRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository preloaded with the built-in datasets. Study material is
    /// decoded here, once.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a built-in record is malformed.
    pub fn seeded() -> Result<Self, StorageError> {
        let questions =
            seed::question_sets().map_err(|e| StorageError::Serialization(e.to_string()))?;
        let study = seed::study_material()
            .into_iter()
            .map(|(key, raw)| {
                let chapters = raw
                    .into_iter()
                    .map(|c| c.decode())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok((key, chapters))
            })
            .collect::<Result<HashMap<_, _>, StorageError>>()?;

        Ok(Self {
            questions: Arc::new(Mutex::new(questions)),
            notes: Arc::new(Mutex::new(Table::seeded(seed::notes(), |n| n.id.value()))),
            saved: Arc::new(Mutex::new(Table::seeded(seed::saved_questions(), |q| {
                q.id.value()
            }))),
            study: Arc::new(Mutex::new(study)),
            subjects: Arc::new(Mutex::new(seed::subjects())),
        })
    }

    /// Register (or replace) a question set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_question_set(
        &self,
        key: QuestionSetKey,
        questions: Vec<Question>,
    ) -> Result<(), StorageError> {
        lock(&self.questions)?.insert(key, questions);
        Ok(())
    }

    /// Register (or replace) decoded study chapters for a topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_chapters(
        &self,
        subject: &str,
        topic: &str,
        chapters: Vec<StudyChapter>,
    ) -> Result<(), StorageError> {
        lock(&self.study)?.insert((subject.to_owned(), topic.to_owned()), chapters);
        Ok(())
    }
}

#[async_trait]
impl QuestionBank for InMemoryRepository {
    async fn load_questions(&self, key: &QuestionSetKey) -> Result<Vec<Question>, StorageError> {
        let guard = lock(&self.questions)?;
        Ok(guard.get(key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn insert_note(&self, note: ValidatedNote) -> Result<Note, StorageError> {
        let mut guard = lock(&self.notes)?;
        let note = note.assign_id(NoteId::new(guard.allocate()));
        guard.rows.insert(0, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: NoteId, note: ValidatedNote) -> Result<Note, StorageError> {
        let mut guard = lock(&self.notes)?;
        let slot = guard
            .rows
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StorageError::NotFound)?;
        *slot = note.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StorageError> {
        let mut guard = lock(&self.notes)?;
        let before = guard.rows.len();
        guard.rows.retain(|n| n.id != id);
        if guard.rows.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn get_note(&self, id: NoteId) -> Result<Note, StorageError> {
        let guard = lock(&self.notes)?;
        guard
            .rows
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StorageError> {
        Ok(lock(&self.notes)?.rows.clone())
    }
}

#[async_trait]
impl SavedQuestionRepository for InMemoryRepository {
    async fn insert_saved_question(
        &self,
        record: NewSavedQuestionRecord,
    ) -> Result<SavedQuestion, StorageError> {
        let mut guard = lock(&self.saved)?;
        let saved = SavedQuestion::from_question(
            SavedQuestionId::new(guard.allocate()),
            &record.question,
            record.subject,
            record.origin,
            record.saved_at,
        );
        guard.rows.insert(0, saved.clone());
        Ok(saved)
    }

    async fn delete_saved_question(&self, id: SavedQuestionId) -> Result<(), StorageError> {
        let mut guard = lock(&self.saved)?;
        let before = guard.rows.len();
        guard.rows.retain(|q| q.id != id);
        if guard.rows.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_saved_questions(&self) -> Result<Vec<SavedQuestion>, StorageError> {
        Ok(lock(&self.saved)?.rows.clone())
    }
}

#[async_trait]
impl StudyRepository for InMemoryRepository {
    async fn load_chapters(
        &self,
        subject: &str,
        topic: &str,
    ) -> Result<Vec<StudyChapter>, StorageError> {
        let guard = lock(&self.study)?;
        Ok(guard
            .get(&(subject.to_owned(), topic.to_owned()))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        Ok(lock(&self.subjects)?.clone())
    }

    async fn get_subject(&self, slug: &str) -> Result<Subject, StorageError> {
        lock(&self.subjects)?
            .iter()
            .find(|s| s.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionBank>,
    pub notes: Arc<dyn NoteRepository>,
    pub saved_questions: Arc<dyn SavedQuestionRepository>,
    pub study: Arc<dyn StudyRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Storage {
    /// Empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// In-memory storage preloaded with the built-in datasets.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a built-in record is malformed.
    pub fn seeded() -> Result<Self, StorageError> {
        Ok(Self::from_repo(InMemoryRepository::seeded()?))
    }

    #[must_use]
    pub fn from_repo(repo: InMemoryRepository) -> Self {
        Self {
            questions: Arc::new(repo.clone()),
            notes: Arc::new(repo.clone()),
            saved_questions: Arc::new(repo.clone()),
            study: Arc::new(repo.clone()),
            catalog: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{NoteDraft, QuestionId};
    use prep_core::time::fixed_now;

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: "body".into(),
            subject: "Mathematics".into(),
            ..NoteDraft::default()
        }
    }

    #[tokio::test]
    async fn unknown_question_set_is_empty() {
        let repo = InMemoryRepository::seeded().unwrap();
        let key = QuestionSetKey::mock("mathematics", "nonexistent");
        assert!(repo.load_questions(&key).await.unwrap().is_empty());

        let key = QuestionSetKey::mock("mathematics", "2024");
        assert_eq!(repo.load_questions(&key).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn inserted_notes_are_listed_first_with_fresh_ids() {
        let repo = InMemoryRepository::seeded().unwrap();
        let note = repo
            .insert_note(draft("Vectors").validate(fixed_now()).unwrap())
            .await
            .unwrap();
        assert_eq!(note.id, NoteId::new(4));

        let listed = repo.list_notes().await.unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0].title, "Vectors");
    }

    #[tokio::test]
    async fn update_and_delete_missing_note_report_not_found() {
        let repo = InMemoryRepository::new();
        let validated = draft("x").validate(fixed_now()).unwrap();
        assert!(matches!(
            repo.update_note(NoteId::new(9), validated).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete_note(NoteId::new(9)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_keeps_identity_and_creation_time() {
        let repo = InMemoryRepository::new();
        let created = repo
            .insert_note(draft("Old").validate(fixed_now()).unwrap())
            .await
            .unwrap();
        let later = fixed_now() + chrono::Duration::hours(1);
        let updated = repo
            .update_note(created.id, draft("New").validate(later).unwrap())
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(repo.get_note(created.id).await.unwrap().title, "New");
    }

    #[tokio::test]
    async fn saved_questions_round_trip() {
        let repo = InMemoryRepository::new();
        let question = Question::new(QuestionId::from("q1"), "2 + 2?", vec!["4".into()], 0).unwrap();
        let saved = repo
            .insert_saved_question(NewSavedQuestionRecord {
                question,
                subject: "mathematics".into(),
                origin: ExamOrigin::Practice,
                saved_at: fixed_now(),
            })
            .await
            .unwrap();
        assert_eq!(saved.id, SavedQuestionId::new(1));
        repo.delete_saved_question(saved.id).await.unwrap();
        assert!(repo.list_saved_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn study_and_catalog_lookups() {
        let storage = Storage::seeded().unwrap();
        let chapters = storage.study.load_chapters("mathematics", "algebra").await.unwrap();
        assert_eq!(chapters.len(), 3);
        assert!(storage.study.load_chapters("biology", "genetics").await.unwrap().is_empty());

        assert_eq!(storage.catalog.get_subject("physics").await.unwrap().name, "Physics");
        assert!(matches!(
            storage.catalog.get_subject("astrology").await,
            Err(StorageError::NotFound)
        ));
    }
}
