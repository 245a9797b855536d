use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::QuizError,
    models::{BeltRank, Language, QuizRequest},
};

/// Front-end settings for starting quizzes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizConfig {
    /// Where `questions.json` lives.
    pub catalog_path: PathBuf,
    pub language: Language,
    /// Quiz lengths offered to the learner.
    pub question_counts: Vec<usize>,
    /// Fixed seed for reproducible quizzes (demos, screenshots).
    pub rng_seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/questions.json"),
            language: Language::Danish,
            question_counts: vec![10, 25, 50, 100],
            rng_seed: None,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, QuizError> {
    value
        .trim()
        .parse()
        .map_err(|_| QuizError::InvalidConfig(format!("{key}={value:?} is not valid")))
}

impl QuizConfig {
    /// Defaults overridden by `QUIZ_CATALOG_PATH`, `QUIZ_LANGUAGE`,
    /// `QUIZ_QUESTION_COUNTS` (comma separated) and `QUIZ_RNG_SEED`.
    pub fn from_env() -> Result<Self, QuizError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QuizError> {
        let mut config = Self::default();
        if let Some(path) = lookup("QUIZ_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(lang) = lookup("QUIZ_LANGUAGE") {
            config.language = lang.trim().parse()?;
        }
        if let Some(counts) = lookup("QUIZ_QUESTION_COUNTS") {
            config.question_counts = counts
                .split(',')
                .map(|c| parse_var("QUIZ_QUESTION_COUNTS", c))
                .collect::<Result<_, _>>()?;
        }
        if let Some(seed) = lookup("QUIZ_RNG_SEED") {
            config.rng_seed = Some(parse_var("QUIZ_RNG_SEED", &seed)?);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| QuizError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.question_counts.is_empty() {
            return Err(QuizError::InvalidConfig("no question counts configured".into()));
        }
        if self.question_counts.contains(&0) {
            return Err(QuizError::InvalidConfig("question counts must be positive".into()));
        }
        Ok(())
    }

    pub fn offers(&self, count: usize) -> bool {
        self.question_counts.contains(&count)
    }

    /// A quiz request in the configured language and seed.
    pub fn request(&self, belt_rank: BeltRank, question_count: usize) -> QuizRequest {
        QuizRequest {
            belt_rank,
            question_count,
            language: self.language,
            rng_seed: self.rng_seed,
        }
    }
}
