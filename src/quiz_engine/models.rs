use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::quiz_engine::error::QuizError;

// ---------------------------------------------------------------------------
// Curriculum primitives
// ---------------------------------------------------------------------------

/// Belt rank, ordered from the first grade (10. kup) to 3. dan.
///
/// Declaration order is the progression order, so the derived `Ord` means
/// "lower rank compares less".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeltRank {
    #[serde(rename = "10_kup")] Kup10,
    #[serde(rename = "9_kup")]  Kup9,
    #[serde(rename = "8_kup")]  Kup8,
    #[serde(rename = "7_kup")]  Kup7,
    #[serde(rename = "6_kup")]  Kup6,
    #[serde(rename = "5_kup")]  Kup5,
    #[serde(rename = "4_kup")]  Kup4,
    #[serde(rename = "3_kup")]  Kup3,
    #[serde(rename = "2_kup")]  Kup2,
    #[serde(rename = "1_kup")]  Kup1,
    #[serde(rename = "1_dan")]  Dan1,
    #[serde(rename = "2_dan")]  Dan2,
    #[serde(rename = "3_dan")]  Dan3,
}

impl BeltRank {
    pub const ALL: [BeltRank; 13] = [
        BeltRank::Kup10, BeltRank::Kup9, BeltRank::Kup8, BeltRank::Kup7,
        BeltRank::Kup6,  BeltRank::Kup5, BeltRank::Kup4, BeltRank::Kup3,
        BeltRank::Kup2,  BeltRank::Kup1, BeltRank::Dan1, BeltRank::Dan2,
        BeltRank::Dan3,
    ];

    /// Catalog code, e.g. `"5_kup"`.
    pub fn code(self) -> &'static str {
        match self {
            BeltRank::Kup10 => "10_kup",
            BeltRank::Kup9  => "9_kup",
            BeltRank::Kup8  => "8_kup",
            BeltRank::Kup7  => "7_kup",
            BeltRank::Kup6  => "6_kup",
            BeltRank::Kup5  => "5_kup",
            BeltRank::Kup4  => "4_kup",
            BeltRank::Kup3  => "3_kup",
            BeltRank::Kup2  => "2_kup",
            BeltRank::Kup1  => "1_kup",
            BeltRank::Dan1  => "1_dan",
            BeltRank::Dan2  => "2_dan",
            BeltRank::Dan3  => "3_dan",
        }
    }

    /// Position in the progression, 0 = lowest.
    pub fn index(self) -> usize {
        self as usize
    }

    /// This rank followed by every lower rank, nearest first.
    pub fn with_lower(self) -> Vec<BeltRank> {
        BeltRank::ALL[..=self.index()].iter().rev().copied().collect()
    }

    /// Up to `count` ranks directly below this one, lowest first.
    pub fn below(self, count: usize) -> &'static [BeltRank] {
        let idx = self.index();
        &BeltRank::ALL[idx.saturating_sub(count)..idx]
    }
}

impl fmt::Display for BeltRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for BeltRank {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeltRank::ALL
            .iter()
            .copied()
            .find(|rank| rank.code() == s)
            .ok_or_else(|| QuizError::InvalidRank(s.to_string()))
    }
}

/// Topic tag for vocabulary items. Declaration order is the browsing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Stances,
    HandTechniques,
    LegTechniques,
    TheoryTerms,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Stances,
        Category::HandTechniques,
        Category::LegTechniques,
        Category::TheoryTerms,
        Category::Miscellaneous,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::Stances        => "stances",
            Category::HandTechniques => "hand_techniques",
            Category::LegTechniques  => "leg_techniques",
            Category::TheoryTerms    => "theory_terms",
            Category::Miscellaneous  => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "da")] Danish,
    #[serde(rename = "ko")] Korean,
    #[serde(rename = "en")] English,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Danish, Language::Korean, Language::English];

    /// Language the curriculum terms are taught in.
    pub const TERM: Language = Language::Korean;

    pub fn code(self) -> &'static str {
        match self {
            Language::Danish  => "da",
            Language::Korean  => "ko",
            Language::English => "en",
        }
    }

    /// The language paired with Korean terms in vocabulary questions.
    ///
    /// Korean cannot be paired with itself, so a Korean-language quiz falls
    /// back to Danish.
    pub fn vocabulary_native(self) -> Language {
        match self {
            Language::Korean => Language::Danish,
            other            => other,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Danish  => write!(f, "Danish"),
            Language::Korean  => write!(f, "Korean"),
            Language::English => write!(f, "English"),
        }
    }
}

impl FromStr for Language {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "da" => Ok(Language::Danish),
            "ko" => Ok(Language::Korean),
            "en" => Ok(Language::English),
            _    => Err(QuizError::InvalidConfig(format!("unknown language code '{s}'"))),
        }
    }
}

/// Per-language text. Languages without text are simply absent.
pub type Localized = BTreeMap<Language, String>;

/// Catalog files carry `null` for translations nobody has written yet.
fn present_only<'de, D>(deserializer: D) -> Result<Localized, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<Language, Option<String>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(lang, text)| text.filter(|t| !t.trim().is_empty()).map(|t| (lang, t)))
        .collect())
}

// ---------------------------------------------------------------------------
// Catalog items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub belt_rank: BeltRank,
    pub category: Category,
    #[serde(deserialize_with = "present_only")]
    pub translations: Localized,
    /// Curated wrong answers; empty for most items.
    #[serde(default)]
    pub incorrect_answers: BTreeMap<Language, Vec<String>>,
}

impl VocabularyItem {
    pub fn term(&self, language: Language) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    pub fn curated_incorrect(&self, language: Language) -> &[String] {
        self.incorrect_answers
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Both sides of the Korean/native prompt pair are present.
    pub fn is_eligible(&self, language: Language) -> bool {
        self.term(Language::TERM).is_some() && self.term(language.vocabulary_native()).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryItem {
    pub id: String,
    pub belt_rank: BeltRank,
    #[serde(deserialize_with = "present_only")]
    pub question: Localized,
    #[serde(deserialize_with = "present_only")]
    pub correct_answer: Localized,
    #[serde(default)]
    pub incorrect_answers: BTreeMap<Language, Vec<String>>,
}

impl TheoryItem {
    pub fn prompt(&self, language: Language) -> Option<&str> {
        self.question.get(&language).map(String::as_str)
    }

    pub fn correct(&self, language: Language) -> Option<&str> {
        self.correct_answer.get(&language).map(String::as_str)
    }

    pub fn incorrect(&self, language: Language) -> &[String] {
        self.incorrect_answers
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Selectable only with at least one wrong answer and renderable text.
    pub fn is_eligible(&self, language: Language) -> bool {
        !self.incorrect(language).is_empty()
            && self.prompt(language).is_some()
            && self.correct(language).is_some()
    }
}

/// One catalog entry, tagged by shape when the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Vocabulary(VocabularyItem),
    Theory(TheoryItem),
}

impl CatalogItem {
    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Vocabulary(v) => &v.id,
            CatalogItem::Theory(t)     => &t.id,
        }
    }

    pub fn belt_rank(&self) -> BeltRank {
        match self {
            CatalogItem::Vocabulary(v) => v.belt_rank,
            CatalogItem::Theory(t)     => t.belt_rank,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            CatalogItem::Vocabulary(_) => QuestionKind::Vocabulary,
            CatalogItem::Theory(_)     => QuestionKind::Theory,
        }
    }

    pub fn is_eligible(&self, language: Language) -> bool {
        match self {
            CatalogItem::Vocabulary(v) => v.is_eligible(language),
            CatalogItem::Theory(t)     => t.is_eligible(language),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Vocabulary,
    Theory,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Vocabulary => write!(f, "vocabulary"),
            QuestionKind::Theory     => write!(f, "theory"),
        }
    }
}

/// Which side of a vocabulary pair is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptDirection {
    /// Korean term shown, native translation expected.
    TermToNative,
    /// Native translation shown, Korean term expected.
    NativeToTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub target_rank: BeltRank,
    pub requested_count: usize,
    pub language: Language,
}

impl SelectionRequest {
    /// Danish is the default quiz language.
    pub fn new(target_rank: BeltRank, requested_count: usize) -> Self {
        Self { target_rank, requested_count, language: Language::Danish }
    }

    /// Build a request from a rank code such as `"5_kup"`.
    pub fn parse(target_rank: &str, requested_count: usize) -> Result<Self, QuizError> {
        Ok(Self::new(target_rank.parse()?, requested_count))
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Fewer eligible questions existed than were asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageNotice {
    pub available: usize,
    pub requested: usize,
}

impl fmt::Display for ShortageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "only {} questions available for this level (requested {})",
            self.available, self.requested
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub questions: Vec<CatalogItem>,
    pub shortage: Option<ShortageNotice>,
}

/// A question ready to display. `answer_options` is shuffled once, here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedQuestion {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt_text: String,
    pub answer_options: Vec<String>,
    pub correct_answer: String,
    pub belt_rank: BeltRank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<PromptDirection>,
}

// ---------------------------------------------------------------------------
// Whole-quiz request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub belt_rank: BeltRank,
    pub question_count: usize,
    pub language: Language,
    /// `Some` makes the quiz reproducible; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl QuizRequest {
    /// Danish, unseeded.
    pub fn new(belt_rank: BeltRank, question_count: usize) -> Self {
        Self { belt_rank, question_count, language: Language::Danish, rng_seed: None }
    }

    pub fn selection(&self) -> SelectionRequest {
        SelectionRequest::new(self.belt_rank, self.question_count).with_language(self.language)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<RenderedQuestion>,
    pub shortage: Option<ShortageNotice>,
}
