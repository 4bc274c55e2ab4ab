use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

//
// ─── RAW RECORDS ───────────────────────────────────────────────────────────────
//

/// Study block as authored: a kind tag, a string payload and free-form
/// metadata. Decoded once into [`StudyBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStudyBlock {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStudyChapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub blocks: Vec<RawStudyBlock>,
}

//
// ─── DECODED CONTENT ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyContent {
    Text {
        markdown: String,
    },
    Formula {
        markdown: String,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        url: String,
        alt: String,
        caption: Option<String>,
        click_url: Option<String>,
    },
    Video {
        video_id: String,
        duration: Option<String>,
        description: Option<String>,
    },
    Quiz {
        questions: Vec<QuizQuestion>,
    },
}

impl StudyContent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StudyContent::Text { .. } => "text",
            StudyContent::Formula { .. } => "formula",
            StudyContent::Table { .. } => "table",
            StudyContent::Image { .. } => "image",
            StudyContent::Video { .. } => "video",
            StudyContent::Quiz { .. } => "quiz",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyBlock {
    pub id: String,
    pub title: Option<String>,
    pub content: StudyContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyChapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub blocks: Vec<StudyBlock>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentDecodeError {
    #[error("block {id}: unknown content kind `{kind}`")]
    UnknownKind { id: String, kind: String },

    #[error("block {id}: malformed quiz payload: {reason}")]
    InvalidQuiz { id: String, reason: String },

    #[error("block {id}: table has no header row")]
    EmptyTable { id: String },

    #[error("block {id}: missing {field}")]
    MissingField { id: String, field: &'static str },
}

impl RawStudyBlock {
    /// Decode the string payload into its typed variant.
    ///
    /// # Errors
    ///
    /// Returns `ContentDecodeError` for unknown kinds or payloads that do not
    /// fit their kind.
    pub fn decode(self) -> Result<StudyBlock, ContentDecodeError> {
        let RawStudyBlock {
            id,
            kind,
            title,
            content,
            mut metadata,
        } = self;

        let decoded = match kind.as_str() {
            "text" => StudyContent::Text { markdown: content },
            "formula" => StudyContent::Formula { markdown: content },
            "table" => {
                let (header, rows) =
                    parse_table(&content).ok_or_else(|| ContentDecodeError::EmptyTable {
                        id: id.clone(),
                    })?;
                StudyContent::Table { header, rows }
            }
            "image" => {
                if content.trim().is_empty() {
                    return Err(ContentDecodeError::MissingField {
                        id,
                        field: "image url",
                    });
                }
                let alt = metadata
                    .remove("alt")
                    .or_else(|| title.clone())
                    .unwrap_or_else(|| "Study material".to_owned());
                StudyContent::Image {
                    url: content,
                    alt,
                    caption: metadata.remove("caption"),
                    click_url: metadata.remove("clickUrl"),
                }
            }
            "video" => {
                if content.trim().is_empty() {
                    return Err(ContentDecodeError::MissingField {
                        id,
                        field: "video id",
                    });
                }
                StudyContent::Video {
                    video_id: content,
                    duration: metadata.remove("duration"),
                    description: metadata.remove("description"),
                }
            }
            "quiz" => StudyContent::Quiz {
                questions: decode_quiz(&id, &content)?,
            },
            _ => return Err(ContentDecodeError::UnknownKind { id, kind }),
        };

        Ok(StudyBlock {
            id,
            title,
            content: decoded,
        })
    }
}

impl RawStudyChapter {
    /// Decode every block of the chapter.
    ///
    /// # Errors
    ///
    /// Fails on the first block that does not decode.
    pub fn decode(self) -> Result<StudyChapter, ContentDecodeError> {
        let blocks = self
            .blocks
            .into_iter()
            .map(RawStudyBlock::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StudyChapter {
            id: self.id,
            title: self.title,
            description: self.description,
            estimated_minutes: self.estimated_minutes,
            blocks,
        })
    }
}

fn decode_quiz(id: &str, payload: &str) -> Result<Vec<QuizQuestion>, ContentDecodeError> {
    let parsed: QuizPayload =
        serde_json::from_str(payload).map_err(|e| ContentDecodeError::InvalidQuiz {
            id: id.to_owned(),
            reason: e.to_string(),
        })?;
    if let Some(bad) = parsed
        .questions
        .iter()
        .find(|q| q.correct >= q.options.len())
    {
        return Err(ContentDecodeError::InvalidQuiz {
            id: id.to_owned(),
            reason: format!("correct option out of range in `{}`", bad.question),
        });
    }
    Ok(parsed.questions)
}

/// Parse a pipe table. The first row is the header and the second
/// (separator) row is skipped.
fn parse_table(raw: &str) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let mut lines = raw.lines().filter(|l| !l.trim().is_empty()).map(split_row);
    let header = lines.next()?;
    if header.is_empty() {
        return None;
    }
    let rows = lines.skip(1).collect();
    Some((header, rows))
}

fn split_row(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect()
}

//
// ─── READER STATE ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyError {
    #[error("unknown study block: {0}")]
    UnknownBlock(String),

    #[error("block {0} is not a quiz")]
    NotAQuiz(String),

    #[error("quiz question {index} out of range")]
    QuestionOutOfRange { index: usize },

    #[error("option {option} out of range")]
    OptionOutOfRange { option: usize },

    #[error("quiz question {index} has not been answered")]
    NotAnswered { index: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct QuizState {
    selected: HashMap<usize, usize>,
    revealed: HashSet<usize>,
}

/// Cursor, completion set and quiz answers for one topic's chapters.
#[derive(Debug, Clone)]
pub struct StudyReader {
    chapters: Vec<StudyChapter>,
    chapter: usize,
    block: usize,
    completed: HashSet<String>,
    quizzes: HashMap<String, QuizState>,
}

impl StudyReader {
    #[must_use]
    pub fn new(chapters: Vec<StudyChapter>) -> Self {
        Self {
            chapters,
            chapter: 0,
            block: 0,
            completed: HashSet::new(),
            quizzes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn chapters(&self) -> &[StudyChapter] {
        &self.chapters
    }

    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.chapter, self.block)
    }

    #[must_use]
    pub fn current_chapter(&self) -> Option<&StudyChapter> {
        self.chapters.get(self.chapter)
    }

    #[must_use]
    pub fn current_block(&self) -> Option<&StudyBlock> {
        self.current_chapter()?.blocks.get(self.block)
    }

    /// Advance one block, rolling into the next chapter. Returns `false` at the end.
    pub fn next(&mut self) -> bool {
        let Some(chapter) = self.chapters.get(self.chapter) else {
            return false;
        };
        if self.block + 1 < chapter.blocks.len() {
            self.block += 1;
            true
        } else if self.chapter + 1 < self.chapters.len() {
            self.chapter += 1;
            self.block = 0;
            true
        } else {
            false
        }
    }

    /// Step back one block, rolling into the previous chapter's last block.
    pub fn previous(&mut self) -> bool {
        if self.block > 0 {
            self.block -= 1;
            true
        } else if self.chapter > 0 {
            self.chapter -= 1;
            self.block = self.chapters[self.chapter].blocks.len().saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Mark a block complete. Returns `true` if it was not complete before.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::UnknownBlock` if no chapter contains `block_id`.
    pub fn mark_complete(&mut self, block_id: &str) -> Result<bool, StudyError> {
        self.find_block(block_id)?;
        Ok(self.completed.insert(block_id.to_owned()))
    }

    #[must_use]
    pub fn is_complete(&self, block_id: &str) -> bool {
        self.completed.contains(block_id)
    }

    #[must_use]
    pub fn total_blocks(&self) -> usize {
        self.chapters.iter().map(|c| c.blocks.len()).sum()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Completed blocks over all blocks, as a whole percentage.
    #[must_use]
    pub fn overall_progress(&self) -> u8 {
        let total = self.total_blocks();
        if total == 0 {
            return 0;
        }
        u8::try_from(self.completed.len() * 100 / total).unwrap_or(100)
    }

    /// Record an answer for one quiz question.
    ///
    /// # Errors
    ///
    /// Returns `StudyError` if the block is missing or not a quiz, or the
    /// question/option index is out of range.
    pub fn answer_quiz(
        &mut self,
        block_id: &str,
        question: usize,
        option: usize,
    ) -> Result<(), StudyError> {
        let quiz = self.quiz_question(block_id, question)?;
        if option >= quiz.options.len() {
            return Err(StudyError::OptionOutOfRange { option });
        }
        self.quizzes
            .entry(block_id.to_owned())
            .or_default()
            .selected
            .insert(question, option);
        Ok(())
    }

    /// Reveal the result for one quiz question; returns whether it was correct.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotAnswered` if nothing was selected yet.
    pub fn reveal_quiz(&mut self, block_id: &str, question: usize) -> Result<bool, StudyError> {
        let correct = self.quiz_question(block_id, question)?.correct;
        let state = self.quizzes.entry(block_id.to_owned()).or_default();
        let selected = *state
            .selected
            .get(&question)
            .ok_or(StudyError::NotAnswered { index: question })?;
        state.revealed.insert(question);
        Ok(selected == correct)
    }

    #[must_use]
    pub fn is_revealed(&self, block_id: &str, question: usize) -> bool {
        self.quizzes
            .get(block_id)
            .is_some_and(|s| s.revealed.contains(&question))
    }

    fn find_block(&self, block_id: &str) -> Result<&StudyBlock, StudyError> {
        self.chapters
            .iter()
            .flat_map(|c| c.blocks.iter())
            .find(|b| b.id == block_id)
            .ok_or_else(|| StudyError::UnknownBlock(block_id.to_owned()))
    }

    fn quiz_question(&self, block_id: &str, index: usize) -> Result<&QuizQuestion, StudyError> {
        match &self.find_block(block_id)?.content {
            StudyContent::Quiz { questions } => questions
                .get(index)
                .ok_or(StudyError::QuestionOutOfRange { index }),
            _ => Err(StudyError::NotAQuiz(block_id.to_owned())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
