//! The read-only question catalog.
//!
//! Loaded once from the `questions.json` document:
//!
//! ```json
//! {
//!   "metadata": { "beltRanks": { "10_kup": { "da": "10. kup" } }, "categories": { ... } },
//!   "vocabularyQuestions": [ { "id": "...", "beltRank": "10_kup", "category": "stances",
//!                              "translations": { "ko": "...", "da": "...", "en": null } } ],
//!   "theoryQuestions":     [ { "id": "...", "beltRank": "1_dan", "question": { "da": "..." },
//!                              "correctAnswer": { "da": "..." }, "incorrectAnswers": { "da": [] } } ]
//! }
//! ```
//!
//! Every entry is tagged as vocabulary or theory by its shape while loading,
//! so the rest of the engine only ever matches on [`CatalogItem`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::quiz_engine::{
    error::QuizError,
    models::{BeltRank, CatalogItem, Category, Language, Localized, TheoryItem, VocabularyItem},
};

/// Display labels for ranks and categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetadata {
    #[serde(default)]
    pub belt_ranks: BTreeMap<BeltRank, Localized>,
    #[serde(default)]
    pub categories: BTreeMap<Category, Localized>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    #[serde(default)]
    metadata: CatalogMetadata,
    #[serde(default)]
    vocabulary_questions: Vec<Value>,
    #[serde(default)]
    theory_questions: Vec<Value>,
}

/// Tag one raw entry by the fields it carries.
fn classify(entry: Value) -> Result<CatalogItem, QuizError> {
    if entry.get("translations").is_some() {
        Ok(CatalogItem::Vocabulary(serde_json::from_value(entry)?))
    } else if entry.get("question").is_some() {
        Ok(CatalogItem::Theory(serde_json::from_value(entry)?))
    } else {
        let id = entry.get("id").and_then(Value::as_str).map(str::to_string);
        Err(QuizError::UnknownQuestionType { id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    metadata: CatalogMetadata,
    items: Vec<CatalogItem>,
    by_rank: BTreeMap<BeltRank, Vec<usize>>,
    by_category: BTreeMap<Category, Vec<usize>>,
}

impl Catalog {
    /// Index `items`, rejecting duplicate ids.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        let mut by_rank: BTreeMap<BeltRank, Vec<usize>> = BTreeMap::new();
        let mut by_category: BTreeMap<Category, Vec<usize>> = BTreeMap::new();

        for (idx, item) in items.iter().enumerate() {
            if !seen.insert(item.id()) {
                return Err(QuizError::DuplicateId(item.id().to_string()));
            }
            by_rank.entry(item.belt_rank()).or_default().push(idx);
            if let CatalogItem::Vocabulary(v) = item {
                by_category.entry(v.category).or_default().push(idx);
            }
        }

        Ok(Catalog { metadata: CatalogMetadata::default(), items, by_rank, by_category })
    }

    pub fn with_metadata(mut self, metadata: CatalogMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let items = raw
            .vocabulary_questions
            .into_iter()
            .chain(raw.theory_questions)
            .map(classify)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::new(items)?.with_metadata(raw.metadata);
        catalog.log_summary();
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| QuizError::Io { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "loading catalog");
        Self::from_json_str(&json)
    }

    fn log_summary(&self) {
        let vocabulary = self.vocabulary().count();
        let theory = self.theory().count();
        info!(vocabulary, theory, total = self.items.len(), "catalog loaded");

        let missing_english = self
            .vocabulary()
            .filter(|v| v.term(Language::English).is_none())
            .count();
        if missing_english > 0 {
            warn!(count = missing_english, "vocabulary terms missing English translations");
        }
        for language in Language::ALL {
            let unusable = self.unusable_theory(language);
            if unusable > 0 {
                debug!(count = unusable, language = %language, "theory questions not usable in this language");
            }
        }
    }

    /// Theory items that selection skips for `language`.
    pub fn unusable_theory(&self, language: Language) -> usize {
        self.theory().filter(|t| !t.is_eligible(language)).count()
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &VocabularyItem> + '_ {
        self.items.iter().filter_map(|item| match item {
            CatalogItem::Vocabulary(v) => Some(v),
            CatalogItem::Theory(_)     => None,
        })
    }

    pub fn theory(&self) -> impl Iterator<Item = &TheoryItem> + '_ {
        self.items.iter().filter_map(|item| match item {
            CatalogItem::Theory(t)     => Some(t),
            CatalogItem::Vocabulary(_) => None,
        })
    }

    /// All items of one rank, in catalog order.
    pub fn items_at(&self, rank: BeltRank) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.by_rank
            .get(&rank)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.items[idx])
    }

    pub fn vocabulary_at(&self, rank: BeltRank) -> impl Iterator<Item = &VocabularyItem> + '_ {
        self.items_at(rank).filter_map(|item| match item {
            CatalogItem::Vocabulary(v) => Some(v),
            CatalogItem::Theory(_)     => None,
        })
    }

    /// Vocabulary of one category across every rank.
    pub fn vocabulary_in_category(&self, category: Category) -> impl Iterator<Item = &VocabularyItem> + '_ {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(move |&idx| match &self.items[idx] {
                CatalogItem::Vocabulary(v) => Some(v),
                CatalogItem::Theory(_)     => None,
            })
    }

    /// Selectable items of one rank for `language`: vocabulary first, then theory.
    pub fn eligible_at(&self, rank: BeltRank, language: Language) -> Vec<&CatalogItem> {
        let (mut vocabulary, theory): (Vec<&CatalogItem>, Vec<&CatalogItem>) = self
            .items_at(rank)
            .filter(|item| item.is_eligible(language))
            .partition(|item| matches!(item, CatalogItem::Vocabulary(_)));
        vocabulary.extend(theory);
        vocabulary
    }

    /// Label from metadata, falling back to the rank code.
    pub fn rank_label(&self, rank: BeltRank, language: Language) -> &str {
        self.metadata
            .belt_ranks
            .get(&rank)
            .and_then(|labels| labels.get(&language))
            .map(String::as_str)
            .unwrap_or(rank.code())
    }

    pub fn category_label(&self, category: Category, language: Language) -> &str {
        self.metadata
            .categories
            .get(&category)
            .and_then(|labels| labels.get(&language))
            .map(String::as_str)
            .unwrap_or(category.code())
    }

    /// Everything taught at one rank, vocabulary grouped by category in
    /// display order. Empty categories are left out.
    pub fn rank_overview(&self, rank: BeltRank) -> RankOverview<'_> {
        let vocabulary = Category::ALL
            .iter()
            .map(|&category| {
                let terms: Vec<&VocabularyItem> = self
                    .vocabulary_at(rank)
                    .filter(|v| v.category == category)
                    .collect();
                (category, terms)
            })
            .filter(|(_, terms)| !terms.is_empty())
            .collect();

        let theory = self
            .items_at(rank)
            .filter_map(|item| match item {
                CatalogItem::Theory(t)     => Some(t),
                CatalogItem::Vocabulary(_) => None,
            })
            .collect();

        RankOverview { belt_rank: rank, vocabulary, theory }
    }
}

/// Study view of a single rank.
#[derive(Debug)]
pub struct RankOverview<'a> {
    pub belt_rank: BeltRank,
    pub vocabulary: Vec<(Category, Vec<&'a VocabularyItem>)>,
    pub theory: Vec<&'a TheoryItem>,
}
