use std::sync::Arc;

use prep_core::model::SessionDurations;
use storage::repository::{QuestionBank, Storage};

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::notes_service::NotesService;
use crate::sessions::SessionLoader;
use crate::study_service::StudyService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<dyn QuestionBank>,
    sessions: Arc<SessionLoader>,
    notes: Arc<NotesService>,
    study: Arc<StudyService>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Build services over the built-in in-memory datasets.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the datasets fail to load.
    pub fn new_in_memory(
        clock: Clock,
        durations: SessionDurations,
        shuffle: bool,
    ) -> Result<Self, AppServicesError> {
        Ok(Self::from_storage(&Storage::seeded()?, clock, durations, shuffle))
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        durations: SessionDurations,
        shuffle: bool,
    ) -> Self {
        let sessions = Arc::new(
            SessionLoader::new(Arc::clone(&storage.questions), durations).with_shuffle(shuffle),
        );
        let notes = Arc::new(NotesService::new(
            clock,
            Arc::clone(&storage.notes),
            Arc::clone(&storage.saved_questions),
        ));
        let study = Arc::new(StudyService::new(Arc::clone(&storage.study)));
        let catalog = Arc::new(CatalogService::new(Arc::clone(&storage.catalog)));

        Self {
            questions: Arc::clone(&storage.questions),
            sessions,
            notes,
            study,
            catalog,
        }
    }

    #[must_use]
    pub fn questions(&self) -> Arc<dyn QuestionBank> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionLoader> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn notes(&self) -> Arc<NotesService> {
        Arc::clone(&self.notes)
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
