use tracing::info;

use crate::quiz_engine::{
    answers::generate,
    catalog::Catalog,
    error::QuizError,
    models::{QuestionKind, Quiz, QuizRequest, SelectionRequest, SelectionResult},
    random::{quiz_rng, RandomSource},
    selector::select,
};

/// Select and render a whole quiz in one call.
///
/// The generator is seeded from `request.rng_seed` when present, so the same
/// seed against the same catalog always yields the same quiz.
pub fn build_quiz(catalog: &Catalog, request: &QuizRequest) -> Result<Quiz, QuizError> {
    let mut rng = quiz_rng(request.rng_seed);
    build_quiz_with(catalog, &request.selection(), &mut rng)
}

/// [`build_quiz`] with a caller-supplied random source.
pub fn build_quiz_with<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    selection: &SelectionRequest,
    rng: &mut R,
) -> Result<Quiz, QuizError> {
    let SelectionResult { questions, shortage } = select(catalog, selection, rng);

    let theory = questions.iter().filter(|item| item.kind() == QuestionKind::Theory).count();
    let questions = questions
        .iter()
        .map(|item| generate(item, catalog, selection.language, rng))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        rank = %selection.target_rank,
        language = %selection.language,
        questions = questions.len(),
        theory,
        requested = selection.requested_count,
        "quiz built"
    );
    Ok(Quiz { questions, shortage })
}
