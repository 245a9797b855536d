//! Language-specific wording shared across the engine.
//!
//! All user-facing sentences live here so the selection and answer logic
//! never branches on language. Korean has no dedicated wording yet and uses
//! the Danish templates, matching [`Language::vocabulary_native`].

use crate::quiz_engine::models::{Language, PromptDirection, ShortageNotice};

/// Vocabulary prompt, e.g. `Hvad er "Ap chagi" på dansk?`.
///
/// `direction` decides which language the learner must answer in; `native`
/// is the language the sentence itself is written in.
pub fn vocabulary_prompt(native: Language, direction: PromptDirection, source_term: &str) -> String {
    let target = match direction {
        PromptDirection::TermToNative => native,
        PromptDirection::NativeToTerm => Language::TERM,
    };
    match native {
        Language::English => format!("What is \"{source_term}\" in {}?", english_name(target)),
        _                 => format!("Hvad er \"{source_term}\" på {}?", danish_name(target)),
    }
}

fn danish_name(language: Language) -> &'static str {
    match language {
        Language::Danish  => "dansk",
        Language::Korean  => "koreansk",
        Language::English => "engelsk",
    }
}

fn english_name(language: Language) -> &'static str {
    match language {
        Language::Danish  => "Danish",
        Language::Korean  => "Korean",
        Language::English => "English",
    }
}

/// Warning shown when a quiz comes back shorter than requested.
pub fn shortage_message(notice: &ShortageNotice, language: Language) -> String {
    let ShortageNotice { available, requested } = *notice;
    match language {
        Language::English => format!(
            "Only {available} questions available for this level (you chose {requested})"
        ),
        _ => format!(
            "Kun {available} spørgsmål tilgængelige for dette niveau (du valgte {requested})"
        ),
    }
}

/// Closing remark for a finished quiz, banded by percentage.
pub fn result_message(percentage: u32, language: Language) -> &'static str {
    match (language, percentage) {
        (Language::English, 90..) => "Excellent! You are a Taekwondo master!",
        (Language::English, 70..) => "Well done! Keep practising!",
        (Language::English, 50..) => "Good effort! Review and try again.",
        (Language::English, _)    => "Keep going! Practice makes perfect.",
        (_, 90..)                 => "Fremragende! Du er en Taekwondo mester!",
        (_, 70..)                 => "Godt gået! Bliv ved med at øve!",
        (_, 50..)                 => "God indsats! Gennemgå og prøv igen.",
        (_, _)                    => "Bliv ved! Øvelse gør mester.",
    }
}
