//! End-to-end walk through the quiz engine.
//!
//! Run with: `cargo run --example quiz_demo`
//!
//! 1. **Study view**: the vocabulary and theory taught at one rank, grouped
//!    by category with the catalog's own labels.
//! 2. **A quiz**: a fixed-seed quiz for a mid-level learner, every question
//!    printed with its options and the correct one marked.
//! 3. **A session**: the same quiz played back, picking the first option
//!    each time, then scored.
//! 4. **A shortage**: asking for more questions than the catalog has.
//!
//! Configuration comes from `QuizConfig::from_env`, so the catalog path,
//! language and seed can be changed with `QUIZ_CATALOG_PATH`,
//! `QUIZ_LANGUAGE` and `QUIZ_RNG_SEED`. Set `RUST_LOG=belt_quiz=debug` to
//! see the selector's per-rank plan.

use belt_quiz::quiz_engine::helpers;
use belt_quiz::{
    build_quiz, AnswerOutcome, BeltRank, Catalog, Language, QuizConfig, QuizError, QuizSession,
    RenderedQuestion,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_question(n: usize, q: &RenderedQuestion) {
    println!("  {n:>2}. [{} / {}] {}", q.belt_rank, q.kind, q.prompt_text);
    for option in &q.answer_options {
        let marker = if *option == q.correct_answer { "✓" } else { " " };
        println!("        {marker} {option}");
    }
}

fn print_overview(catalog: &Catalog, rank: BeltRank, language: Language) {
    let overview = catalog.rank_overview(rank);
    println!("══ Study view: {} ══", catalog.rank_label(rank, language));
    for (category, terms) in &overview.vocabulary {
        println!("  {}", catalog.category_label(*category, language));
        for term in terms {
            let native = term.term(language.vocabulary_native()).unwrap_or("—");
            println!("    {:<24} {native}", term.term(Language::TERM).unwrap_or("—"));
        }
    }
    if !overview.theory.is_empty() {
        println!("  Theory");
        for item in &overview.theory {
            println!("    {}", item.prompt(language).unwrap_or("—"));
        }
    }
    println!();
}

fn main() -> Result<(), QuizError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "belt_quiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = QuizConfig::from_env()?;
    config.rng_seed.get_or_insert(2024);
    let catalog = Catalog::from_path(&config.catalog_path)?;
    let language = config.language;

    // ── Study view ─────────────────────────────────────────────────────────
    print_overview(&catalog, BeltRank::Kup9, language);

    // ── Quiz ───────────────────────────────────────────────────────────────
    let count = config.question_counts[0];
    let quiz = build_quiz(&catalog, &config.request(BeltRank::Kup6, count))?;
    println!("══ Quiz: {} x{count} ══", catalog.rank_label(BeltRank::Kup6, language));
    for (i, q) in quiz.questions.iter().enumerate() {
        print_question(i + 1, q);
    }
    println!();

    // ── Session ────────────────────────────────────────────────────────────
    println!("══ Session: always pick the first option ══");
    let mut session = QuizSession::from_quiz(quiz);
    while let Some(q) = session.current() {
        let pick = q.answer_options[0].clone();
        let progress = session.progress();
        let outcome = session.select_answer(&pick);
        let mark = match outcome {
            AnswerOutcome::Correct => "right",
            _                      => "wrong",
        };
        println!("  {}/{}  {pick:<28} {mark}", progress.current, progress.total);
        session.advance();
    }
    let results = session.results(language);
    println!("  Score: {}/{} ({}%)  {}", results.score, results.total, results.percentage, results.message);
    println!();

    // ── Shortage ───────────────────────────────────────────────────────────
    let quiz = build_quiz(&catalog, &config.request(BeltRank::Kup10, 100))?;
    println!("══ Shortage: 10th kup x100 ══");
    match &quiz.shortage {
        Some(notice) => println!("  {}", helpers::shortage_message(notice, language)),
        None => println!("  catalog covered the full request"),
    }

    Ok(())
}
