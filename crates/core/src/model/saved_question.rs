use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::SavedQuestionId;
use crate::model::question::{Difficulty, Question, SessionKind};

/// Where a saved question was bookmarked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "examType", rename_all = "lowercase")]
pub enum ExamOrigin {
    Mock { year: u16 },
    Practice,
}

impl ExamOrigin {
    /// Derive the origin from a session kind. Mock years that are not numeric
    /// are recorded as year 0.
    #[must_use]
    pub fn from_kind(kind: &SessionKind) -> Self {
        match kind {
            SessionKind::Mock { year } => ExamOrigin::Mock {
                year: year.parse().unwrap_or(0),
            },
            SessionKind::Practice { .. } => ExamOrigin::Practice,
        }
    }
}

/// A question the user bookmarked for later review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuestion {
    pub id: SavedQuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub explanation: Option<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub difficulty: Option<Difficulty>,
    pub tags: Vec<String>,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub origin: ExamOrigin,
}

impl SavedQuestion {
    /// Snapshot a bank question into a saved-question record.
    #[must_use]
    pub fn from_question(
        id: SavedQuestionId,
        question: &Question,
        subject: impl Into<String>,
        origin: ExamOrigin,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question: question.prompt().to_owned(),
            options: question.options().to_vec(),
            correct_answer: question.correct_index(),
            explanation: question.explanation().map(str::to_owned),
            subject: subject.into(),
            topic: question.topic().map(str::to_owned),
            difficulty: question.difficulty(),
            tags: Vec::new(),
            saved_at,
            origin,
        }
    }

    /// Case-insensitive substring match over prompt, explanation and tags.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle)
            || self
                .explanation
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}
