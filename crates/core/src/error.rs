use thiserror::Error;

use crate::model::{
    AnswerError, ContentDecodeError, NoteError, QuestionError, ScoreError, SessionStateError,
    StudyError,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error(transparent)]
    ContentDecode(#[from] ContentDecodeError),
    #[error(transparent)]
    Study(#[from] StudyError),
}
