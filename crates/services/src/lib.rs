#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod notes_service;
pub mod sessions;
pub mod study_service;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{
    AppServicesError, CatalogServiceError, NoteServiceError, SessionError, StudyServiceError,
};
pub use notes_service::{EXPORT_FILE_NAME, NoteQuery, NotesService, SubjectFilter};
pub use study_service::{StudyService, StudySession};

pub use sessions::{
    ResultQuery, ResultsView, SessionDriver, SessionInput, SessionLoader, SessionRunner, Step,
    TICK_PERIOD, format_duration,
};
