use std::sync::Arc;

use prep_core::model::{StudyBlock, StudyChapter, StudyReader};
use storage::repository::StudyRepository;
use tracing::info;

use crate::error::StudyServiceError;

/// Opens study material for a topic.
#[derive(Clone)]
pub struct StudyService {
    study: Arc<dyn StudyRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(study: Arc<dyn StudyRepository>) -> Self {
        Self { study }
    }

    /// Load the chapters for `subject`/`topic` and open a reader positioned
    /// on the first block.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::NoMaterial` when nothing is authored for
    /// the topic.
    pub async fn open(&self, subject: &str, topic: &str) -> Result<StudySession, StudyServiceError> {
        let chapters = self.study.load_chapters(subject, topic).await?;
        if chapters.is_empty() {
            return Err(StudyServiceError::NoMaterial {
                subject: subject.to_owned(),
                topic: topic.to_owned(),
            });
        }
        info!(subject, topic, chapters = chapters.len(), "study material opened");
        Ok(StudySession {
            subject: subject.to_owned(),
            topic: topic.to_owned(),
            reader: StudyReader::new(chapters),
        })
    }
}

/// A reader over one topic's chapters.
#[derive(Debug, Clone)]
pub struct StudySession {
    subject: String,
    topic: String,
    reader: StudyReader,
}

impl StudySession {
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn chapters(&self) -> &[StudyChapter] {
        self.reader.chapters()
    }

    #[must_use]
    pub fn current(&self) -> Option<(&StudyChapter, &StudyBlock)> {
        Some((self.reader.current_chapter()?, self.reader.current_block()?))
    }

    pub fn next(&mut self) -> bool {
        self.reader.next()
    }

    pub fn previous(&mut self) -> bool {
        self.reader.previous()
    }

    /// # Errors
    ///
    /// Returns `StudyServiceError::Study` for an unknown block.
    pub fn mark_complete(&mut self, block_id: &str) -> Result<bool, StudyServiceError> {
        Ok(self.reader.mark_complete(block_id)?)
    }

    #[must_use]
    pub fn is_complete(&self, block_id: &str) -> bool {
        self.reader.is_complete(block_id)
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.reader.overall_progress()
    }

    /// # Errors
    ///
    /// Returns `StudyServiceError::Study` if the block is not a quiz or an
    /// index is out of range.
    pub fn answer_quiz(
        &mut self,
        block_id: &str,
        question: usize,
        option: usize,
    ) -> Result<(), StudyServiceError> {
        Ok(self.reader.answer_quiz(block_id, question, option)?)
    }

    /// # Errors
    ///
    /// Returns `StudyServiceError::Study` if nothing was selected yet.
    pub fn reveal_quiz(&mut self, block_id: &str, question: usize) -> Result<bool, StudyServiceError> {
        Ok(self.reader.reveal_quiz(block_id, question)?)
    }
}
