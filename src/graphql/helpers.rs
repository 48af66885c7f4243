use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parses a game id passed as a GraphQL `ID`.
pub fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::ValidationError("Invalid game id".to_string()))
}

/// Default leaderboard size when the caller gives no limit.
pub fn leaderboard_limit(requested: Option<i64>, default: usize) -> i64 {
    requested.unwrap_or(default as i64)
}
