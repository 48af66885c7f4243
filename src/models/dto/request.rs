use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Difficulty;

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct StartGameRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[serde(default)]
    #[graphql(default)]
    #[validate(length(max = 500))]
    pub avatar: String,

    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitAnswerRequest {
    #[validate(length(max = 1000))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SaveDraftRequest {
    #[validate(length(max = 1000))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}
