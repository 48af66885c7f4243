use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GameState, PlayerInfo, PlayerPerformance},
        dto::{
            request::StartGameRequest,
            response::{GameView, SaveScoreResponse},
        },
    },
    repositories::SessionRepository,
    services::{
        game_session::{GameSession, GameSettings},
        leaderboard_service::LeaderboardService,
        question_bank::{adapt_to_performance, QuestionBank},
    },
};

/// Runs games in memory and persists finished ones.
pub struct GameService {
    games: RwLock<HashMap<Uuid, GameSession>>,
    bank: Arc<QuestionBank>,
    settings: GameSettings,
    adaptive_questions: bool,
    session_repository: Arc<dyn SessionRepository>,
    leaderboard: Arc<LeaderboardService>,
}

impl GameService {
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: GameSettings,
        adaptive_questions: bool,
        session_repository: Arc<dyn SessionRepository>,
        leaderboard: Arc<LeaderboardService>,
    ) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            bank,
            settings,
            adaptive_questions,
            session_repository,
            leaderboard,
        }
    }

    pub async fn active_games(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn start_game(&self, request: StartGameRequest) -> AppResult<GameView> {
        request.validate()?;
        let player = PlayerInfo::new(&request.name, &request.avatar, request.difficulty)?;

        let mut pool = self.bank.for_difficulty(player.difficulty);
        if self.adaptive_questions {
            let history = self.history_for(&player.name).await?;
            pool = adapt_to_performance(pool, &history);
        }

        let now = Utc::now();
        let mut session = GameSession::new(player, self.settings.clone(), now);
        session.start(pool, &mut rand::rng(), now);

        log::info!(
            "Started game {} for {} ({:?}, {} questions)",
            session.id(),
            session.player().name,
            session.player().difficulty,
            session.total_questions()
        );

        let view = GameView::from_session(&session, now);
        self.games.write().await.insert(session.id(), session);
        Ok(view)
    }

    pub async fn get_game(&self, id: &Uuid) -> AppResult<GameView> {
        self.with_game(id, |_, _| Ok(())).await.map(|(view, _)| view)
    }

    pub async fn submit_answer(&self, id: &Uuid, answer: &str) -> AppResult<GameView> {
        self.with_game(id, |session, now| session.answer(answer, now).map(|_| ()))
            .await
            .map(|(view, _)| view)
    }

    pub async fn save_draft(&self, id: &Uuid, text: &str) -> AppResult<GameView> {
        self.with_game(id, |session, now| session.save_draft(text, now))
            .await
            .map(|(view, _)| view)
    }

    pub async fn continue_game(&self, id: &Uuid) -> AppResult<GameView> {
        self.with_game(id, |session, now| session.continue_game(now).map(|_| ()))
            .await
            .map(|(view, _)| view)
    }

    pub async fn resume_game(&self, id: &Uuid) -> AppResult<GameView> {
        self.with_game(id, |session, now| session.resume(now).map(|_| ()))
            .await
            .map(|(view, _)| view)
    }

    pub async fn abandon_game(&self, id: &Uuid) -> AppResult<()> {
        self.games
            .write()
            .await
            .remove(id)
            .map(|_| log::info!("Abandoned game {}", id))
            .ok_or_else(|| not_found(id))
    }

    /// Writes the session log, then offers the score to the leaderboard.
    ///
    /// The game is taken out of the table while saving so it cannot be saved
    /// twice; it is put back when saving fails so the player can retry.
    pub async fn save_game(&self, id: &Uuid) -> AppResult<SaveScoreResponse> {
        let mut session = self
            .games
            .write()
            .await
            .remove(id)
            .ok_or_else(|| not_found(id))?;

        match self.persist(&mut session, Utc::now()).await {
            Ok(response) => Ok(response),
            Err(err) => {
                log::error!("Error saving score for game {}: {}", id, err);
                self.games.write().await.insert(*id, session);
                Err(err)
            }
        }
    }

    /// The session log is written once per game; a retry after a failed
    /// leaderboard update reuses the record written the first time.
    async fn persist(
        &self,
        session: &mut GameSession,
        now: DateTime<Utc>,
    ) -> AppResult<SaveScoreResponse> {
        if session.state() != GameState::Finished {
            return Err(AppError::InvalidState(
                "Only finished games can be saved".to_string(),
            ));
        }

        let (score, record) = match session.logged_record() {
            Some(logged) => logged.clone(),
            None => {
                let (score, record) = session.to_record(now)?;
                let record = self.session_repository.create(record).await?;
                session.mark_logged(score.clone(), record.clone());
                (score, record)
            }
        };
        let made_leaderboard = self.leaderboard.submit(&score).await?;

        log::info!(
            "Saved game {} as session {} (score {}, leaderboard: {})",
            session.id(),
            record.id,
            score.score,
            made_leaderboard
        );

        Ok(SaveScoreResponse::new(record.id, score.score, made_leaderboard))
    }

    async fn history_for(&self, name: &str) -> AppResult<Vec<PlayerPerformance>> {
        let sessions = self.session_repository.find_by_player_name(name).await?;
        Ok(sessions
            .into_iter()
            .flat_map(|s| s.performance)
            .collect())
    }

    /// Runs `f` on the game after expiring a timed-out question, and returns
    /// the refreshed view together with `f`'s result.
    async fn with_game<T, F>(&self, id: &Uuid, f: F) -> AppResult<(GameView, T)>
    where
        F: FnOnce(&mut GameSession, DateTime<Utc>) -> AppResult<T>,
    {
        let now = Utc::now();
        let mut games = self.games.write().await;
        let session = games.get_mut(id).ok_or_else(|| not_found(id))?;

        session.expire(now);
        let result = f(session, now)?;
        Ok((GameView::from_session(session, now), result))
    }
}

fn not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Game with id '{}' not found", id))
}
