#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        Difficulty, HighScore, PlayerInfo, PlayerPerformance, PlayerScore, PlayerSession, Question,
        QuestionType,
    };

    pub const FIXED_DATE: &str = "2026-03-01T10:00:00+00:00";

    /// Multiple-choice question with one blank whose options include `answer`.
    pub fn choice_question(id: &str, difficulty: Difficulty, level: u8, answer: &str) -> Question {
        Question {
            id: id.to_string(),
            level,
            question_type: QuestionType::MultipleChoice,
            text: "The teacher ___ helped me was kind.".to_string(),
            options: vec![answer.to_string(), "which".to_string()],
            correct_answer: answer.to_string(),
            difficulty,
            explanation: Some("Use 'who' for people.".to_string()),
        }
    }

    /// Hard-tier full-sentence question, the timed kind.
    pub fn sentence_question(id: &str, answer: &str) -> Question {
        Question {
            id: id.to_string(),
            level: 1,
            question_type: QuestionType::SentenceCompletion,
            text: "Join the sentences. ___".to_string(),
            options: Vec::new(),
            correct_answer: answer.to_string(),
            difficulty: Difficulty::Hard,
            explanation: None,
        }
    }

    pub fn player(difficulty: Difficulty) -> PlayerInfo {
        PlayerInfo {
            name: "Ana".to_string(),
            avatar: "/avatars/1.png".to_string(),
            difficulty,
        }
    }

    pub fn performance(question_id: &str, correct: bool) -> PlayerPerformance {
        performance_with_answer(question_id, correct, if correct { "who" } else { "which" })
    }

    pub fn performance_with_answer(question_id: &str, correct: bool, answer: &str) -> PlayerPerformance {
        PlayerPerformance {
            question_id: question_id.to_string(),
            correct,
            chosen_answer: answer.to_string(),
        }
    }

    pub fn player_score(name: &str, score: i32) -> PlayerScore {
        PlayerScore {
            name: name.to_string(),
            avatar: "/avatars/1.png".to_string(),
            score,
            date: FIXED_DATE.to_string(),
        }
    }

    pub fn high_score(id: &str, score: i32) -> HighScore {
        HighScore {
            id: id.to_string(),
            name: format!("player-{}", id),
            avatar: String::new(),
            score,
            date: FIXED_DATE.to_string(),
        }
    }

    pub fn session(name: &str, score: i32, performance: Vec<PlayerPerformance>) -> PlayerSession {
        PlayerSession::new(&player_score(name, score), performance)
    }
}

#[cfg(test)]
pub mod in_memory {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::{HighScore, PlayerSession},
        repositories::{HighScoreRepository, SessionRepository},
    };

    pub struct InMemorySessionRepository {
        sessions: Arc<RwLock<Vec<PlayerSession>>>,
    }

    impl InMemorySessionRepository {
        pub fn new() -> Self {
            Self {
                sessions: Arc::new(RwLock::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for InMemorySessionRepository {
        async fn create(&self, session: PlayerSession) -> AppResult<PlayerSession> {
            self.sessions.write().await.push(session.clone());
            Ok(session)
        }

        async fn find_all(&self) -> AppResult<Vec<PlayerSession>> {
            let mut items = self.sessions.read().await.clone();
            items.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(items)
        }

        async fn find_by_player_name(&self, name: &str) -> AppResult<Vec<PlayerSession>> {
            Ok(self
                .find_all()
                .await?
                .into_iter()
                .filter(|s| s.name == name)
                .collect())
        }
    }

    /// Session store whose writes always fail.
    pub struct FailingSessionRepository;

    #[async_trait]
    impl SessionRepository for FailingSessionRepository {
        async fn create(&self, _session: PlayerSession) -> AppResult<PlayerSession> {
            Err(AppError::DatabaseError("connection reset".to_string()))
        }

        async fn find_all(&self) -> AppResult<Vec<PlayerSession>> {
            Ok(Vec::new())
        }

        async fn find_by_player_name(&self, _name: &str) -> AppResult<Vec<PlayerSession>> {
            Ok(Vec::new())
        }
    }

    /// High score store whose first `failures` reads fail.
    pub struct FlakyHighScoreRepository {
        inner: InMemoryHighScoreRepository,
        failures: AtomicUsize,
    }

    impl FlakyHighScoreRepository {
        pub fn new(failures: usize) -> Self {
            Self {
                inner: InMemoryHighScoreRepository::new(),
                failures: AtomicUsize::new(failures),
            }
        }
    }

    #[async_trait]
    impl HighScoreRepository for FlakyHighScoreRepository {
        async fn top(&self, limit: i64) -> AppResult<Vec<HighScore>> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(AppError::DatabaseError("connection reset".to_string()));
            }
            self.inner.top(limit).await
        }

        async fn insert(&self, entry: HighScore) -> AppResult<HighScore> {
            self.inner.insert(entry).await
        }

        async fn replace_if_unchanged(
            &self,
            evict_id: &str,
            expected_score: i32,
            entry: HighScore,
        ) -> AppResult<bool> {
            self.inner
                .replace_if_unchanged(evict_id, expected_score, entry)
                .await
        }
    }

    pub struct InMemoryHighScoreRepository {
        scores: Arc<RwLock<HashMap<String, HighScore>>>,
    }

    impl InMemoryHighScoreRepository {
        pub fn new() -> Self {
            Self {
                scores: Arc::new(RwLock::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl HighScoreRepository for InMemoryHighScoreRepository {
        async fn top(&self, limit: i64) -> AppResult<Vec<HighScore>> {
            let scores = self.scores.read().await;
            let mut items: Vec<_> = scores.values().cloned().collect();
            items.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.date.cmp(&b.date)));
            items.truncate(limit.max(0) as usize);
            Ok(items)
        }

        async fn insert(&self, entry: HighScore) -> AppResult<HighScore> {
            self.scores.write().await.insert(entry.id.clone(), entry.clone());
            Ok(entry)
        }

        async fn replace_if_unchanged(
            &self,
            evict_id: &str,
            expected_score: i32,
            entry: HighScore,
        ) -> AppResult<bool> {
            let mut scores = self.scores.write().await;
            match scores.get(evict_id) {
                Some(existing) if existing.score == expected_score => {
                    scores.remove(evict_id);
                    scores.insert(entry.id.clone(), entry);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use super::{fixtures::high_score, in_memory::*};
    use crate::{
        app_state::AppState, config::Config, repositories::HighScoreRepository,
        services::question_bank::QuestionBank,
    };

    /// App state over the embedded bank and empty in-memory stores.
    pub fn test_state() -> AppState {
        test_state_with(Arc::new(InMemoryHighScoreRepository::new()))
    }

    pub fn test_state_with(high_scores: Arc<InMemoryHighScoreRepository>) -> AppState {
        AppState::from_parts(
            Config::test_config(),
            QuestionBank::embedded().expect("embedded bank is valid"),
            Arc::new(InMemorySessionRepository::new()),
            high_scores,
            None,
        )
    }

    pub async fn test_state_with_scores(scores: &[i32]) -> AppState {
        let repository = Arc::new(InMemoryHighScoreRepository::new());
        for (i, score) in scores.iter().enumerate() {
            repository
                .insert(high_score(&i.to_string(), *score))
                .await
                .expect("in-memory insert");
        }
        test_state_with(repository)
    }

    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN,
            "expected auth failure, got {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::Difficulty;

    #[test]
    fn test_fixture_choice_question_offers_its_answer() {
        let question = choice_question("q", Difficulty::Easy, 1, "who");
        assert!(question.options.contains(&question.correct_answer));
        assert_eq!(question.blank_count(), 1);
    }

    #[test]
    fn test_fixture_session_copies_score() {
        let s = session("Ana", 30, vec![performance("q", true)]);
        assert_eq!(s.score, 30);
        assert_eq!(s.date, FIXED_DATE);
    }
}
