use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::Difficulty,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PlayerInfo {
    pub name: String,
    pub avatar: String,
    pub difficulty: Difficulty,
}

impl PlayerInfo {
    /// Builds a player from form input. The name is trimmed and must not be empty.
    pub fn new(name: &str, avatar: &str, difficulty: Difficulty) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Player name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            avatar: avatar.to_string(),
            difficulty,
        })
    }
}
