use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{HighScore, PlayerScore},
    repositories::HighScoreRepository,
};

const MAX_WRITE_ATTEMPTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardPlan {
    /// Board has free slots.
    Insert,
    /// Board is full and the new score beats its lowest entry.
    Replace { evict_id: String, evict_score: i32 },
    Reject,
}

/// Decides how a new score enters a board holding at most `capacity` entries.
/// A full board only takes scores strictly above its current minimum.
pub fn plan_update(board: &[HighScore], capacity: usize, new_score: i32) -> LeaderboardPlan {
    if board.len() < capacity {
        return LeaderboardPlan::Insert;
    }

    // Among equal minimums evict the one listed last, i.e. the newest.
    match board.iter().rev().min_by_key(|entry| entry.score) {
        Some(lowest) if new_score > lowest.score => LeaderboardPlan::Replace {
            evict_id: lowest.id.clone(),
            evict_score: lowest.score,
        },
        _ => LeaderboardPlan::Reject,
    }
}

pub struct LeaderboardService {
    repository: Arc<dyn HighScoreRepository>,
    capacity: usize,
}

impl LeaderboardService {
    pub fn new(repository: Arc<dyn HighScoreRepository>, capacity: usize) -> Self {
        Self {
            repository,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Top entries for display, `limit` clamped to the board size.
    pub async fn top(&self, limit: i64) -> AppResult<Vec<HighScore>> {
        let limit = limit.clamp(1, self.capacity.max(1) as i64);
        self.repository.top(limit).await
    }

    /// Offers `score` to the board. Returns whether it made it.
    ///
    /// The board is read, then written conditionally; when another writer
    /// evicted the same entry first the read is repeated.
    pub async fn submit(&self, score: &PlayerScore) -> AppResult<bool> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let board = self.repository.top(self.capacity as i64).await?;

            match plan_update(&board, self.capacity, score.score) {
                LeaderboardPlan::Insert => {
                    self.repository.insert(HighScore::from_score(score)).await?;
                    log::info!("{} entered the leaderboard with {}", score.name, score.score);
                    return Ok(true);
                }
                LeaderboardPlan::Replace {
                    evict_id,
                    evict_score,
                } => {
                    let replaced = self
                        .repository
                        .replace_if_unchanged(&evict_id, evict_score, HighScore::from_score(score))
                        .await?;
                    if replaced {
                        log::info!(
                            "{} replaced leaderboard entry {} ({} > {})",
                            score.name,
                            evict_id,
                            score.score,
                            evict_score
                        );
                        return Ok(true);
                    }
                    log::warn!(
                        "Leaderboard entry {} changed during update (attempt {}/{})",
                        evict_id,
                        attempt,
                        MAX_WRITE_ATTEMPTS
                    );
                }
                LeaderboardPlan::Reject => return Ok(false),
            }
        }

        Err(AppError::Conflict(
            "Leaderboard kept changing during update".to_string(),
        ))
    }
}
