use std::env;
use secrecy::SecretString;

use crate::services::game_session::{GameSettings, ScoringMode};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub sessions_collection: String,
    pub highscores_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub admin_password: SecretString,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub question_bank_path: Option<String>,
    pub questions_per_game: usize,
    pub timed_question_seconds: i64,
    pub high_score_limit: usize,
    pub home_leaderboard_size: usize,
    pub scoring_mode: ScoringMode,
    pub group_by_level: bool,
    pub adaptive_questions: bool,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "relatix-local".to_string()),
            sessions_collection: env::var("SESSIONS_COLLECTION")
                .unwrap_or_else(|_| "sessions".to_string()),
            highscores_collection: env::var("HIGHSCORES_COLLECTION")
                .unwrap_or_else(|_| "highscores".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080),
            admin_password: SecretString::from(env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin_password".to_string())),
            jwt_secret: SecretString::from(env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string())),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", 8),
            question_bank_path: env::var("QUESTION_BANK_PATH").ok().filter(|p| !p.is_empty()),
            questions_per_game: env_parse("QUESTIONS_PER_GAME", 10),
            timed_question_seconds: env_parse("TIMED_QUESTION_SECONDS", 30),
            high_score_limit: env_parse("HIGH_SCORE_LIMIT", 10),
            home_leaderboard_size: env_parse("HOME_LEADERBOARD_SIZE", 5),
            scoring_mode: env_parse("SCORING_MODE", ScoringMode::Flat),
            group_by_level: env_parse("GROUP_BY_LEVEL", false),
            adaptive_questions: env_parse("ADAPTIVE_QUESTIONS", false),
        }
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            questions_per_game: self.questions_per_game,
            timed_question_seconds: self.timed_question_seconds,
            scoring: self.scoring_mode,
            group_by_level: self.group_by_level,
            ..GameSettings::default()
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        let admin_password = self.admin_password.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if admin_password == "admin_password" {
            panic!(
                "FATAL: ADMIN_PASSWORD is using default value! Set ADMIN_PASSWORD environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "relatix-test".to_string(),
            sessions_collection: "sessions".to_string(),
            highscores_collection: "highscores".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            admin_password: SecretString::from("teacher".to_string()),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            question_bank_path: None,
            questions_per_game: 10,
            timed_question_seconds: 30,
            high_score_limit: 10,
            home_leaderboard_size: 5,
            scoring_mode: ScoringMode::Flat,
            group_by_level: false,
            adaptive_questions: false,
        }
    }
}
