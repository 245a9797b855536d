//! Picks which catalog items make up a quiz.
//!
//! The target rank gets the largest share and each rank below it a smaller
//! one (see [`distribution`](crate::quiz_engine::distribution)). When the
//! planned draws come up short, the gap is filled from the target rank only,
//! so lower ranks never exceed their planned share.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::quiz_engine::{
    catalog::Catalog,
    distribution::target_counts,
    models::{CatalogItem, SelectionRequest, SelectionResult, ShortageNotice},
    random::{choose_distinct, shuffled, RandomSource},
};

pub fn select<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    request: &SelectionRequest,
    rng: &mut R,
) -> SelectionResult {
    let SelectionRequest { target_rank, requested_count, language } = *request;
    if requested_count == 0 {
        return SelectionResult { questions: Vec::new(), shortage: None };
    }

    // Nearest first: [target, target-1, ...].
    let ranks = target_rank.with_lower();
    let targets = target_counts(ranks.len() - 1, requested_count);

    let mut selected: Vec<&CatalogItem> = Vec::new();
    for (&rank, &target) in ranks.iter().zip(&targets) {
        let pool = catalog.eligible_at(rank, language);
        let drawn = choose_distinct(&pool, target, rng);
        debug!(rank = %rank, planned = target, available = pool.len(), drawn = drawn.len(), "rank draw");
        selected.extend(drawn);
    }

    if selected.len() < requested_count {
        let needed = requested_count - selected.len();
        let taken: HashSet<&str> = selected.iter().map(|item| item.id()).collect();
        let remaining: Vec<&CatalogItem> = catalog
            .eligible_at(target_rank, language)
            .into_iter()
            .filter(|item| !taken.contains(item.id()))
            .collect();
        let extra = choose_distinct(&remaining, needed, rng);
        debug!(rank = %target_rank, needed, added = extra.len(), "top-up");
        selected.extend(extra);
    }

    let questions: Vec<CatalogItem> = shuffled(&selected, rng).into_iter().cloned().collect();

    let shortage = (questions.len() < requested_count).then(|| ShortageNotice {
        available: questions.len(),
        requested: requested_count,
    });
    if let Some(notice) = &shortage {
        warn!(rank = %target_rank, available = notice.available, requested = notice.requested, "not enough questions");
    }

    SelectionResult { questions, shortage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::{BeltRank, Category, Language, Localized, VocabularyItem};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeMap;

    fn vocab(id: String, rank: BeltRank) -> CatalogItem {
        let translations: Localized = [
            (Language::Korean, format!("ko-{id}")),
            (Language::Danish, format!("da-{id}")),
        ]
        .into_iter()
        .collect();
        CatalogItem::Vocabulary(VocabularyItem {
            id,
            belt_rank: rank,
            category: Category::Miscellaneous,
            translations,
            incorrect_answers: BTreeMap::new(),
        })
    }

    fn per_rank(counts: &[(BeltRank, usize)]) -> Catalog {
        let items = counts
            .iter()
            .flat_map(|&(rank, n)| (0..n).map(move |i| vocab(format!("{rank}-{i}"), rank)))
            .collect();
        Catalog::new(items).unwrap()
    }

    #[test]
    fn top_up_comes_from_the_target_rank_only() {
        // 9_kup plans 7 + 3 of 10; the target only has 4, the rank below has plenty.
        let catalog = per_rank(&[(BeltRank::Kup10, 20), (BeltRank::Kup9, 4)]);
        let mut rng = StdRng::seed_from_u64(5);
        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup9, 10), &mut rng);

        let from_lower = result.questions.iter().filter(|q| q.belt_rank() == BeltRank::Kup10).count();
        assert_eq!(from_lower, 3, "lower rank must not exceed its planned share");
        assert_eq!(result.questions.len(), 7);
        assert_eq!(result.shortage, Some(ShortageNotice { available: 7, requested: 10 }));
    }

    #[test]
    fn rounding_loss_is_topped_up_from_the_target() {
        // 8_kup, 10 questions: floor gives 6 + 2 + 1 = 9; the tenth is a top-up.
        let catalog = per_rank(&[(BeltRank::Kup10, 10), (BeltRank::Kup9, 10), (BeltRank::Kup8, 10)]);
        let mut rng = StdRng::seed_from_u64(11);
        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup8, 10), &mut rng);

        assert_eq!(result.questions.len(), 10);
        assert!(result.shortage.is_none());
        let from_target = result.questions.iter().filter(|q| q.belt_rank() == BeltRank::Kup8).count();
        assert_eq!(from_target, 7);
    }

    #[test]
    fn zero_requested_is_empty_without_notice() {
        let catalog = per_rank(&[(BeltRank::Kup10, 3)]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup10, 0), &mut rng);
        assert!(result.questions.is_empty());
        assert!(result.shortage.is_none());
    }

    #[test]
    fn no_item_is_selected_twice() {
        let catalog = per_rank(&[(BeltRank::Kup10, 6), (BeltRank::Kup9, 6)]);
        let mut rng = StdRng::seed_from_u64(21);
        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup9, 50), &mut rng);
        let ids: HashSet<&str> = result.questions.iter().map(|q| q.id()).collect();
        assert_eq!(ids.len(), result.questions.len());
    }

    #[test]
    fn empty_catalog_reports_a_shortage() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = select(&catalog, &SelectionRequest::new(BeltRank::Dan3, 25), &mut rng);
        assert!(result.questions.is_empty());
        assert_eq!(result.shortage, Some(ShortageNotice { available: 0, requested: 25 }));
    }

    #[test]
    fn huge_request_is_a_shortage_not_a_panic() {
        let catalog = per_rank(&[(BeltRank::Kup10, 5), (BeltRank::Kup9, 4)]);
        let mut rng = StdRng::seed_from_u64(1);

        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup10, usize::MAX), &mut rng);
        assert_eq!(result.questions.len(), 5);
        assert_eq!(result.shortage, Some(ShortageNotice { available: 5, requested: usize::MAX }));

        let result = select(&catalog, &SelectionRequest::new(BeltRank::Kup9, usize::MAX), &mut rng);
        assert_eq!(result.questions.len(), 9);
        assert_eq!(result.shortage, Some(ShortageNotice { available: 9, requested: usize::MAX }));
    }
}
