use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::score::PlayerScore;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PlayerPerformance {
    pub question_id: String,
    pub correct: bool,
    pub chosen_answer: String,
}

/// Performance log of one play-through, as shown in the teacher panel.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PlayerSession {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub score: i32,
    pub performance: Vec<PlayerPerformance>,
    pub date: String,
}

impl PlayerSession {
    pub fn new(score: &PlayerScore, performance: Vec<PlayerPerformance>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: score.name.clone(),
            avatar: score.avatar.clone(),
            score: score.score,
            performance,
            date: score.date.clone(),
        }
    }

    pub fn correct_count(&self) -> usize {
        self.performance.iter().filter(|p| p.correct).count()
    }
}
