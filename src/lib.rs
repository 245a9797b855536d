//! # belt_quiz
//!
//! An offline quiz engine for a Taekwondo belt curriculum.
//!
//! The catalog holds two kinds of items, each tagged with the belt rank it
//! is taught at: **vocabulary** (a Korean term with its Danish/English
//! translations) and **theory** (a question with one correct and several
//! wrong answers). The engine picks items for a learner's rank and turns each
//! one into a four-option multiple-choice question.
//!
//! ## How it works
//!
//! 1. Load a [`Catalog`] from `questions.json`.
//! 2. [`select`] draws items: most from the learner's own rank, a shrinking
//!    share from each rank below it, topped up from the own rank if short.
//! 3. [`generate`] renders each item. Vocabulary prompts go Korean → native
//!    or native → Korean at random; wrong answers come from curated lists or
//!    are borrowed from related terms (same category, then same rank, then
//!    lower ranks).
//! 4. A [`QuizSession`] plays the questions back and keeps score.
//!
//! [`build_quiz`] does steps 2 and 3 in one call.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use belt_quiz::{build_quiz, BeltRank, Catalog, QuizRequest, QuizSession};
//!
//! let catalog = Catalog::from_path("data/questions.json")?;
//!
//! let mut request = QuizRequest::new(BeltRank::Kup5, 25);
//! request.rng_seed = Some(42);
//! let quiz = build_quiz(&catalog, &request)?;
//!
//! if let Some(notice) = &quiz.shortage {
//!     println!("warning: {notice}");
//! }
//!
//! let mut session = QuizSession::from_quiz(quiz);
//! while let Some(q) = session.current() {
//!     println!("{}  {:?}", q.prompt_text, q.answer_options);
//!     let pick = q.answer_options[0].clone();
//!     session.select_answer(&pick);
//!     session.advance();
//! }
//! println!("{:?}", session.results(request.language));
//! # Ok::<(), belt_quiz::QuizError>(())
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `belt_quiz::build_quiz`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    build_quiz, build_quiz_with, generate, select, AnswerOutcome, BeltRank, Catalog,
    CatalogItem, CatalogMetadata, Category, Language, Progress, PromptDirection, QuestionKind,
    Quiz, QuizConfig, QuizError, QuizRequest, QuizResults, QuizSession, RandomSource,
    RankOverview, RenderedQuestion, SelectionRequest, SelectionResult, SequenceRandom,
    SessionPhase, ShortageNotice, TheoryItem, VocabularyItem,
};
