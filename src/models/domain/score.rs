use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PlayerScore {
    pub name: String,
    pub avatar: String,
    pub score: i32,
    pub date: String,
}

/// One document in the leaderboard collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct HighScore {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub score: i32,
    pub date: String,
}

impl HighScore {
    pub fn from_score(score: &PlayerScore) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: score.name.clone(),
            avatar: score.avatar.clone(),
            score: score.score,
            date: score.date.clone(),
        }
    }
}
