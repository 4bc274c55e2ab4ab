use std::sync::Arc;

use prep_core::model::{CatalogOverview, Subject};
use storage::repository::{CatalogRepository, StorageError};

use crate::error::CatalogServiceError;

pub use prep_core::model::topic_display_name;

/// Read-only view over subjects, mock exam years and practice topics.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the repository fails.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, CatalogServiceError> {
        Ok(self.catalog.list_subjects().await?)
    }

    /// Totals across all subjects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the repository fails.
    pub async fn overview(&self) -> Result<CatalogOverview, CatalogServiceError> {
        let subjects = self.catalog.list_subjects().await?;
        Ok(CatalogOverview::from_subjects(&subjects))
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::UnknownSubject` for an unknown slug.
    pub async fn subject(&self, slug: &str) -> Result<Subject, CatalogServiceError> {
        match self.catalog.get_subject(slug).await {
            Ok(subject) => Ok(subject),
            Err(StorageError::NotFound) => Err(CatalogServiceError::UnknownSubject(slug.to_owned())),
            Err(e) => Err(e.into()),
        }
    }

    /// Completed share of a topic's questions, as a whole percentage.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::UnknownSubject` or
    /// `CatalogServiceError::UnknownTopic` when the lookup fails.
    pub async fn topic_progress(&self, subject: &str, topic: &str) -> Result<u8, CatalogServiceError> {
        let found = self.subject(subject).await?;
        found
            .topic(topic)
            .map(|t| t.progress_percent())
            .ok_or_else(|| CatalogServiceError::UnknownTopic {
                subject: subject.to_owned(),
                topic: topic.to_owned(),
            })
    }
}
