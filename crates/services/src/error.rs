//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{NoteError, SessionStateError, StudyError};
use storage::repository::StorageError;

/// Errors emitted by the session loader and runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `NotesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NoteServiceError {
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error("question {0} is not in the selected set")]
    UnknownQuestion(String),
    #[error("failed to encode export: {0}")]
    Export(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyServiceError {
    #[error("no study material for {subject}/{topic}")]
    NoMaterial { subject: String, topic: String },
    #[error(transparent)]
    Study(#[from] StudyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
    #[error("unknown topic {topic} in {subject}")]
    UnknownTopic { subject: String, topic: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
