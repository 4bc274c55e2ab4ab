#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use repository::{
    CatalogRepository, InMemoryRepository, NewSavedQuestionRecord, NoteRepository, QuestionBank,
    SavedQuestionRepository, Storage, StorageError, StudyRepository,
};
