use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        HighScoreRepository, MongoHighScoreRepository, MongoSessionRepository, SessionRepository,
    },
    services::{
        game_service::GameService, leaderboard_service::LeaderboardService,
        question_bank::QuestionBank, session_service::SessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub session_service: Arc<SessionService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let session_repository = Arc::new(MongoSessionRepository::new(&db, &config.sessions_collection));
        session_repository.ensure_indexes().await?;

        let high_score_repository =
            Arc::new(MongoHighScoreRepository::new(&db, &config.highscores_collection));
        high_score_repository.ensure_indexes().await?;

        let bank = QuestionBank::load(config.question_bank_path.as_deref())?;
        log::info!("Question bank ready with {} questions", bank.len());

        Ok(Self::from_parts(
            config,
            bank,
            session_repository,
            high_score_repository,
            Some(db),
        ))
    }

    /// Wires services over the given stores; `new` uses MongoDB, tests use
    /// in-memory repositories.
    pub fn from_parts(
        config: Config,
        bank: QuestionBank,
        session_repository: Arc<dyn SessionRepository>,
        high_score_repository: Arc<dyn HighScoreRepository>,
        db: Option<Database>,
    ) -> Self {
        let leaderboard_service = Arc::new(LeaderboardService::new(
            high_score_repository,
            config.high_score_limit,
        ));
        let session_service = Arc::new(SessionService::new(session_repository.clone()));
        let game_service = Arc::new(GameService::new(
            Arc::new(bank),
            config.game_settings(),
            config.adaptive_questions,
            session_repository,
            leaderboard_service.clone(),
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            &config.admin_password,
            config.jwt_expiration_hours,
        ));

        Self {
            game_service,
            leaderboard_service,
            session_service,
            jwt_service,
            db,
            config: Arc::new(config),
        }
    }
}
