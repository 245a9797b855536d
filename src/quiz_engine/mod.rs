//! Core quiz engine: catalog, question selection, and answer generation.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `models`       | Shared types: ranks, categories, languages, items, requests, results |
//! | `catalog`      | Loads, validates and indexes the read-only question catalog |
//! | `distribution` | Table of per-rank shares by number of lower ranks |
//! | `selector`     | Weighted draw across ranks, top-up, shortage notice |
//! | `answers`      | Renders an item into a multiple-choice question with distractors |
//! | `random`       | `RandomSource` seam and the Fisher-Yates copy-shuffle |
//! | `helpers`      | Language-specific prompt and message wording |
//! | `generator`    | `build_quiz()`: select + render in one call |
//! | `session`      | Caller-side playback: answer, advance, score |
//! | `config`       | Defaults, environment overrides, JSON config files |
//! | `error`        | `QuizError` |

pub mod answers;
pub mod catalog;
pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod random;
pub mod selector;
pub mod session;

// Re-export the public API surface so callers can use
// `quiz_engine::build_quiz` without reaching into sub-modules.
pub use answers::generate;
pub use catalog::{Catalog, CatalogMetadata, RankOverview};
pub use config::QuizConfig;
pub use error::QuizError;
pub use generator::{build_quiz, build_quiz_with};
pub use models::{
    BeltRank, CatalogItem, Category, Language, PromptDirection, QuestionKind, Quiz,
    QuizRequest, RenderedQuestion, SelectionRequest, SelectionResult, ShortageNotice,
    TheoryItem, VocabularyItem,
};
pub use random::{RandomSource, SequenceRandom};
pub use selector::select;
pub use session::{AnswerOutcome, Progress, QuizResults, QuizSession, SessionPhase};
