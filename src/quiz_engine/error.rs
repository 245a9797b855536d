use std::path::PathBuf;

use thiserror::Error;

use crate::quiz_engine::models::Language;

/// Everything that can go wrong while loading a catalog or rendering a quiz.
///
/// Running out of content is not an error: the selector reports it through
/// [`ShortageNotice`](crate::quiz_engine::models::ShortageNotice) instead.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The belt rank code is not one of the 13 curriculum levels.
    #[error("invalid belt rank: {0}")]
    InvalidRank(String),

    /// A catalog entry has neither `translations` nor `question`.
    #[error("unknown question type (id: {})", .id.as_deref().unwrap_or("<missing>"))]
    UnknownQuestionType { id: Option<String> },

    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    /// The item has no text for a language the question needs.
    #[error("question {id} has no {language} text")]
    MissingTranslation { id: String, language: Language },

    #[error("malformed catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
