//! Turns a catalog item into a multiple-choice question.
//!
//! Theory items carry their own wrong answers. Vocabulary items usually do
//! not, so their distractors are borrowed from other terms, widening the
//! search one tier at a time until three are found:
//!
//! 1. same category, any rank
//! 2. same rank
//! 3. up to four ranks directly below
//!
//! Whatever the tiers collected is shuffled and the first three kept. A thin
//! catalog can leave fewer than three; the question is still returned.

use tracing::debug;

use crate::quiz_engine::{
    catalog::Catalog,
    error::QuizError,
    helpers,
    models::{
        CatalogItem, Language, PromptDirection, QuestionKind, RenderedQuestion, TheoryItem,
        VocabularyItem,
    },
    random::{choose_distinct, shuffled, RandomSource},
};

/// Wrong answers shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// How many ranks below an item the last tier reaches.
const LOWER_RANK_REACH: usize = 4;

/// Render `item` in `language`.
pub fn generate<R: RandomSource + ?Sized>(
    item: &CatalogItem,
    catalog: &Catalog,
    language: Language,
    rng: &mut R,
) -> Result<RenderedQuestion, QuizError> {
    match item {
        CatalogItem::Vocabulary(v) => vocabulary_question(v, catalog, language, rng),
        CatalogItem::Theory(t)     => theory_question(t, language, rng),
    }
}

fn missing(id: &str, language: Language) -> QuizError {
    QuizError::MissingTranslation { id: id.to_string(), language }
}

/// Correct answer plus distractors, shuffled once.
fn answer_options<R: RandomSource + ?Sized>(correct: &str, distractors: Vec<String>, rng: &mut R) -> Vec<String> {
    let mut all = Vec::with_capacity(distractors.len() + 1);
    all.push(correct.to_string());
    all.extend(distractors);
    shuffled(&all, rng)
}

fn vocabulary_question<R: RandomSource + ?Sized>(
    item: &VocabularyItem,
    catalog: &Catalog,
    language: Language,
    rng: &mut R,
) -> Result<RenderedQuestion, QuizError> {
    let native = language.vocabulary_native();
    let direction = if rng.coin_flip() {
        PromptDirection::TermToNative
    } else {
        PromptDirection::NativeToTerm
    };
    let (source_lang, target_lang) = match direction {
        PromptDirection::TermToNative => (Language::TERM, native),
        PromptDirection::NativeToTerm => (native, Language::TERM),
    };

    let source_term = item.term(source_lang).ok_or_else(|| missing(&item.id, source_lang))?;
    let correct = item.term(target_lang).ok_or_else(|| missing(&item.id, target_lang))?;

    let curated = item.curated_incorrect(target_lang);
    let distractors: Vec<String> = if curated.is_empty() {
        synthesize_distractors(item, catalog, target_lang, correct, rng)
    } else {
        curated.iter().take(DISTRACTOR_COUNT).cloned().collect()
    };
    if distractors.len() < DISTRACTOR_COUNT {
        debug!(id = %item.id, found = distractors.len(), language = %target_lang, "short on distractors");
    }

    Ok(RenderedQuestion {
        id: item.id.clone(),
        kind: QuestionKind::Vocabulary,
        prompt_text: helpers::vocabulary_prompt(native, direction, source_term),
        answer_options: answer_options(correct, distractors, rng),
        correct_answer: correct.to_string(),
        belt_rank: item.belt_rank,
        category: Some(item.category),
        direction: Some(direction),
    })
}

/// Unique candidates other than the correct answer, in insertion order.
struct DistractorPool<'a> {
    correct: &'a str,
    candidates: Vec<String>,
}

impl<'a> DistractorPool<'a> {
    fn new(correct: &'a str) -> Self {
        DistractorPool { correct, candidates: Vec::new() }
    }

    fn offer(&mut self, candidate: Option<&str>) {
        let Some(candidate) = candidate else { return };
        if candidate != self.correct && !self.candidates.iter().any(|c| c == candidate) {
            self.candidates.push(candidate.to_string());
        }
    }

    fn offer_all<'v>(&mut self, terms: impl Iterator<Item = &'v VocabularyItem>, own_id: &str, language: Language) {
        for term in terms.filter(|v| v.id != own_id) {
            self.offer(term.term(language));
        }
    }

    fn is_full(&self) -> bool {
        self.candidates.len() >= DISTRACTOR_COUNT
    }
}

fn synthesize_distractors<R: RandomSource + ?Sized>(
    item: &VocabularyItem,
    catalog: &Catalog,
    language: Language,
    correct: &str,
    rng: &mut R,
) -> Vec<String> {
    let mut pool = DistractorPool::new(correct);

    pool.offer_all(catalog.vocabulary_in_category(item.category), &item.id, language);

    if !pool.is_full() {
        pool.offer_all(catalog.vocabulary_at(item.belt_rank), &item.id, language);
    }

    if !pool.is_full() {
        for &rank in item.belt_rank.below(LOWER_RANK_REACH) {
            pool.offer_all(catalog.vocabulary_at(rank), &item.id, language);
        }
    }

    choose_distinct(&pool.candidates, DISTRACTOR_COUNT, rng)
}

fn theory_question<R: RandomSource + ?Sized>(
    item: &TheoryItem,
    language: Language,
    rng: &mut R,
) -> Result<RenderedQuestion, QuizError> {
    let prompt = item.prompt(language).ok_or_else(|| missing(&item.id, language))?;
    let correct = item.correct(language).ok_or_else(|| missing(&item.id, language))?;

    let incorrect = item.incorrect(language);
    let distractors = if incorrect.len() > DISTRACTOR_COUNT {
        choose_distinct(incorrect, DISTRACTOR_COUNT, rng)
    } else {
        incorrect.to_vec()
    };

    Ok(RenderedQuestion {
        id: item.id.clone(),
        kind: QuestionKind::Theory,
        prompt_text: prompt.to_string(),
        answer_options: answer_options(correct, distractors, rng),
        correct_answer: correct.to_string(),
        belt_rank: item.belt_rank,
        category: None,
        direction: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::{BeltRank, Category, Localized};
    use crate::quiz_engine::random::SequenceRandom;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::{BTreeMap, HashSet};

    fn vocab(id: &str, rank: BeltRank, category: Category, ko: &str, da: &str) -> CatalogItem {
        let translations: Localized = [(Language::Korean, ko.to_string()), (Language::Danish, da.to_string())]
            .into_iter()
            .collect();
        CatalogItem::Vocabulary(VocabularyItem {
            id: id.to_string(),
            belt_rank: rank,
            category,
            translations,
            incorrect_answers: BTreeMap::new(),
        })
    }

    fn theory(id: &str, incorrect: &[&str]) -> CatalogItem {
        let da = |s: &str| -> Localized { [(Language::Danish, s.to_string())].into_iter().collect() };
        CatalogItem::Theory(TheoryItem {
            id: id.to_string(),
            belt_rank: BeltRank::Kup10,
            question: da("Hvad betyder Taekwondo?"),
            correct_answer: da("Fod-hånd-vej"),
            incorrect_answers: [(Language::Danish, incorrect.iter().map(|s| s.to_string()).collect())]
                .into_iter()
                .collect(),
        })
    }

    #[test]
    fn same_category_fills_the_pool_first() {
        let catalog = Catalog::new(vec![
            vocab("a", BeltRank::Kup8, Category::Stances, "Moa seogi", "Samlede fødder"),
            vocab("b", BeltRank::Kup1, Category::Stances, "Ap seogi", "Kort stand"),
            vocab("c", BeltRank::Dan1, Category::Stances, "Ap kubi", "Lang stand"),
            vocab("d", BeltRank::Kup6, Category::Stances, "Juchum seogi", "Hestestand"),
            vocab("e", BeltRank::Kup8, Category::LegTechniques, "Ap chagi", "Frontspark"),
        ])
        .unwrap();
        let CatalogItem::Vocabulary(item) = &catalog.items()[0] else { unreachable!() };

        let mut rng = StdRng::seed_from_u64(1);
        let mut got = synthesize_distractors(item, &catalog, Language::Danish, "Samlede fødder", &mut rng);
        got.sort();
        assert_eq!(got, vec!["Hestestand", "Kort stand", "Lang stand"]);
    }

    #[test]
    fn falls_back_to_same_rank_then_lower_ranks() {
        let catalog = Catalog::new(vec![
            vocab("a", BeltRank::Kup5, Category::Stances, "Moa seogi", "Samlede fødder"),
            vocab("b", BeltRank::Kup5, Category::LegTechniques, "Ap chagi", "Frontspark"),
            vocab("c", BeltRank::Kup9, Category::HandTechniques, "Jireugi", "Slag"),
            // Five ranks below: out of reach.
            vocab("d", BeltRank::Kup10, Category::Miscellaneous, "Hana", "En"),
        ])
        .unwrap();
        let CatalogItem::Vocabulary(item) = &catalog.items()[0] else { unreachable!() };

        let mut rng = StdRng::seed_from_u64(2);
        let mut got = synthesize_distractors(item, &catalog, Language::Danish, "Samlede fødder", &mut rng);
        got.sort();
        assert_eq!(got, vec!["Frontspark", "Slag"]);
    }

    #[test]
    fn duplicates_and_the_correct_answer_are_never_offered() {
        let catalog = Catalog::new(vec![
            vocab("a", BeltRank::Kup8, Category::Stances, "Moa seogi", "Samlede fødder"),
            vocab("b", BeltRank::Kup8, Category::Stances, "Moa seogi 2", "Samlede fødder"),
            vocab("c", BeltRank::Kup8, Category::Stances, "Ap seogi", "Kort stand"),
            vocab("d", BeltRank::Kup8, Category::Stances, "Ap seogi 2", "Kort stand"),
        ])
        .unwrap();
        let CatalogItem::Vocabulary(item) = &catalog.items()[0] else { unreachable!() };

        let mut rng = StdRng::seed_from_u64(3);
        let got = synthesize_distractors(item, &catalog, Language::Danish, "Samlede fødder", &mut rng);
        assert_eq!(got, vec!["Kort stand"]);
    }

    #[test]
    fn curated_answers_are_used_verbatim() {
        let mut item = vocab("a", BeltRank::Kup8, Category::Stances, "Moa seogi", "Samlede fødder");
        if let CatalogItem::Vocabulary(v) = &mut item {
            v.incorrect_answers.insert(
                Language::Korean,
                vec!["Ap seogi".into(), "Dwit kubi".into(), "Beom seogi".into(), "Ap kubi".into()],
            );
            v.incorrect_answers.insert(Language::Danish, vec!["Kort stand".into()]);
        }
        let catalog = Catalog::new(vec![item.clone()]).unwrap();

        // 0.9 → NativeToTerm: answer in Korean, curated Korean list applies.
        let mut rng = SequenceRandom::new(vec![0.9, 0.3, 0.7, 0.1]);
        let q = generate(&item, &catalog, Language::Danish, &mut rng).unwrap();
        assert_eq!(q.direction, Some(PromptDirection::NativeToTerm));
        assert_eq!(q.correct_answer, "Moa seogi");
        let options: HashSet<&str> = q.answer_options.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = ["Moa seogi", "Ap seogi", "Dwit kubi", "Beom seogi"].into_iter().collect();
        assert_eq!(options, expected);

        // 0.1 → TermToNative: the single curated Danish answer.
        let mut rng = SequenceRandom::new(vec![0.1]);
        let q = generate(&item, &catalog, Language::Danish, &mut rng).unwrap();
        assert_eq!(q.prompt_text, "Hvad er \"Moa seogi\" på dansk?");
        assert_eq!(q.answer_options.len(), 2);
        assert!(q.answer_options.contains(&"Kort stand".to_string()));
    }

    #[test]
    fn theory_with_many_wrong_answers_keeps_three() {
        let item = theory("t", &["A", "B", "C", "D", "E"]);
        let catalog = Catalog::new(vec![item.clone()]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let q = generate(&item, &catalog, Language::Danish, &mut rng).unwrap();
        assert_eq!(q.kind, QuestionKind::Theory);
        assert_eq!(q.answer_options.len(), 4);
        assert!(q.answer_options.contains(&q.correct_answer));
        assert_eq!(q.prompt_text, "Hvad betyder Taekwondo?");
    }

    #[test]
    fn theory_with_few_wrong_answers_is_degenerate_but_valid() {
        let item = theory("t", &["A"]);
        let catalog = Catalog::new(vec![item.clone()]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let q = generate(&item, &catalog, Language::Danish, &mut rng).unwrap();
        let mut options = q.answer_options.clone();
        options.sort();
        assert_eq!(options, vec!["A", "Fod-hånd-vej"]);
    }

    #[test]
    fn missing_language_text_is_reported() {
        let item = theory("t", &["A"]);
        let catalog = Catalog::new(vec![item.clone()]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let err = generate(&item, &catalog, Language::English, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::MissingTranslation { ref id, language: Language::English } if id == "t"));
    }
}
