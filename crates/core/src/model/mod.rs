mod answers;
mod catalog;
mod countdown;
mod ids;
mod note;
mod question;
mod saved_question;
mod scoring;
mod session;
pub mod study;

pub use ids::{NoteId, ParseIdError, QuestionId, SavedQuestionId};

pub use answers::{AnswerError, AnswerTracker};
pub use catalog::{CatalogOverview, MockExamInfo, Subject, TopicInfo, TopicLevel, slugify, topic_display_name};
pub use countdown::{Countdown, TickOutcome, format_clock};
pub use note::{Note, NoteDraft, NoteError, ValidatedNote, parse_tags};
pub use question::{Difficulty, Question, QuestionError, QuestionSetKey, SessionKind};
pub use saved_question::{ExamOrigin, SavedQuestion};
pub use scoring::{
    AnswerOutcome, CompletedBy, ScoreError, SessionResult, UNANSWERED, grade, score_percent,
};
pub use session::{
    SessionDurations, SessionEvent, SessionPhase, SessionState, SessionStateError,
};
pub use study::{
    ContentDecodeError, QuizQuestion, RawStudyBlock, RawStudyChapter, StudyBlock, StudyChapter,
    StudyContent, StudyError, StudyReader,
};
