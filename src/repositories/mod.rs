pub mod high_score_repository;
pub mod session_repository;

pub use high_score_repository::{HighScoreRepository, MongoHighScoreRepository};
pub use session_repository::{MongoSessionRepository, SessionRepository};
