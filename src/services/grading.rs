use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{Difficulty, Question, QuestionType};

static IGNORED_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.,'"]"#).expect("IGNORED_PUNCTUATION is a valid regex pattern"));

/// Free-text sentence answers in the hard tier run against a countdown.
pub fn is_timed(question: &Question, difficulty: Difficulty) -> bool {
    question.question_type == QuestionType::SentenceCompletion && difficulty == Difficulty::Hard
}

/// Trims, lowercases and drops `. , ' "` so full-sentence answers are
/// compared on their words only.
pub fn normalize_sentence(text: &str) -> String {
    IGNORED_PUNCTUATION
        .replace_all(&text.trim().to_lowercase(), "")
        .into_owned()
}

pub fn grade_answer(question: &Question, difficulty: Difficulty, answer: &str) -> bool {
    if is_timed(question, difficulty) {
        normalize_sentence(answer) == normalize_sentence(&question.correct_answer)
    } else {
        answer.trim().to_lowercase() == question.correct_answer.to_lowercase()
    }
}
