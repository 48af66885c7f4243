use std::collections::{BTreeSet, HashSet};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, PlayerPerformance, Question},
};

const EMBEDDED_BANK: &str = include_str!("../../data/questions.json");

/// Static question bank, partitioned by difficulty tier.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    pub fn embedded() -> AppResult<Self> {
        Self::from_json(EMBEDDED_BANK)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(raw)?;
        Self::new(questions)
    }

    /// Loads the bank from `path` when given, otherwise uses the embedded one.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::InternalError(format!("Failed to read question bank '{}': {}", path, e))
                })?;
                let bank = Self::from_json(&raw)?;
                log::info!("Loaded {} questions from {}", bank.len(), path);
                Ok(bank)
            }
            None => Self::embedded(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .cloned()
            .collect()
    }

    pub fn levels_for(&self, difficulty: Difficulty) -> Vec<u8> {
        let levels: BTreeSet<u8> = self
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .map(|q| q.level)
            .collect();
        levels.into_iter().collect()
    }
}

fn validate(questions: &[Question]) -> AppResult<()> {
    let mut seen = HashSet::new();

    for question in questions {
        if !seen.insert(question.id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Duplicate question id '{}'",
                question.id
            )));
        }
        if !(1..=3).contains(&question.level) {
            return Err(AppError::ValidationError(format!(
                "Question '{}' has level {}, expected 1-3",
                question.id, question.level
            )));
        }
        if question.correct_answer.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question '{}' has no correct answer",
                question.id
            )));
        }
        if question.question_type.is_choice()
            && !question
                .options
                .iter()
                .any(|o| o.eq_ignore_ascii_case(&question.correct_answer))
        {
            return Err(AppError::ValidationError(format!(
                "Question '{}' does not list its correct answer among the options",
                question.id
            )));
        }
    }

    Ok(())
}

/// Appends every question answered incorrectly in `history` once more,
/// so that missed questions are drawn more often.
pub fn adapt_to_performance(
    questions: Vec<Question>,
    history: &[PlayerPerformance],
) -> Vec<Question> {
    let missed: HashSet<&str> = history
        .iter()
        .filter(|p| !p.correct)
        .map(|p| p.question_id.as_str())
        .collect();

    let repeats: Vec<Question> = questions
        .iter()
        .filter(|q| missed.contains(q.id.as_str()))
        .cloned()
        .collect();

    let mut adapted = questions;
    adapted.extend(repeats);
    adapted
}
