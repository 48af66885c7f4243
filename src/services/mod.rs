pub mod game_service;
pub mod game_session;
pub mod grading;
pub mod leaderboard_service;
pub mod question_bank;
pub mod session_export;
pub mod session_service;
