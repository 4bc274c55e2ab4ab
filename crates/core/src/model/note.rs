use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::NoteId;

//
// ─── NOTE TYPES ────────────────────────────────────────────────────────────────
//

/// Raw form input for creating or editing a note.
///
/// `tags` is the comma-separated string the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub topic: String,
    pub tags: String,
}

impl NoteDraft {
    /// Check required fields and normalize optional ones.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field as a `NoteError`.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedNote, NoteError> {
        if self.title.trim().is_empty() {
            return Err(NoteError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }
        if self.subject.trim().is_empty() {
            return Err(NoteError::MissingSubject);
        }

        let topic = self.topic.trim();
        Ok(ValidatedNote {
            title: self.title,
            content: self.content,
            subject: self.subject.trim().to_owned(),
            topic: (!topic.is_empty()).then(|| topic.to_owned()),
            tags: parse_tags(&self.tags),
            validated_at: now,
        })
    }

    /// Prefill a draft from an existing note, as the edit form does.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            subject: note.subject.clone(),
            topic: note.topic.clone().unwrap_or_default(),
            tags: note.tags.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedNote {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub topic: Option<String>,
    pub tags: Vec<String>,
    pub validated_at: DateTime<Utc>,
}

impl ValidatedNote {
    #[must_use]
    pub fn assign_id(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            subject: self.subject,
            topic: self.topic,
            tags: self.tags,
            created_at: self.validated_at,
            updated_at: self.validated_at,
        }
    }

    /// Apply the edit to `note`, keeping its id and creation time.
    #[must_use]
    pub fn apply_to(self, note: &Note) -> Note {
        Note {
            id: note.id,
            title: self.title,
            content: self.content,
            subject: self.subject,
            topic: self.topic,
            tags: self.tags,
            created_at: note.created_at,
            updated_at: self.validated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub topic: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Case-insensitive substring match over title, content and tags.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NoteError {
    #[error("note title is required")]
    EmptyTitle,

    #[error("note content is required")]
    EmptyContent,

    #[error("note subject is required")]
    MissingSubject,
}

/// Split a comma-separated tag list, trimming and dropping blanks.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
