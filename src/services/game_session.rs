use std::str::FromStr;

use async_graphql::Enum;
use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        Feedback, GameState, PlayerInfo, PlayerPerformance, PlayerScore, PlayerSession, Question,
    },
    services::grading,
};

/// Answer recorded when a timed question runs out with nothing typed.
pub const TIMEOUT_ANSWER: &str = "timeout";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Same points for every correct answer.
    Flat,
    /// Points scaled by the difficulty multiplier.
    Tiered,
}

impl FromStr for ScoringMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(ScoringMode::Flat),
            "tiered" => Ok(ScoringMode::Tiered),
            other => Err(AppError::ValidationError(format!(
                "Unknown scoring mode '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub questions_per_game: usize,
    pub timed_question_seconds: i64,
    pub points_per_correct: i32,
    pub scoring: ScoringMode,
    pub group_by_level: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            questions_per_game: 10,
            timed_question_seconds: 30,
            points_per_correct: 10,
            scoring: ScoringMode::Flat,
            group_by_level: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub correct: bool,
    pub chosen_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub points_awarded: i32,
    pub timed_out: bool,
}

/// One play-through: a shuffled queue of questions answered in order.
///
/// `idle -> playing -> (level-transition -> playing)* -> finished`.
/// While feedback for the current question is pending no further answer is
/// accepted; `continue_game` clears it and advances.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: Uuid,
    player: PlayerInfo,
    settings: GameSettings,
    state: GameState,
    queue: Vec<Question>,
    index: usize,
    score: i32,
    performance: Vec<PlayerPerformance>,
    pending: Option<AnswerOutcome>,
    draft: String,
    question_started_at: DateTime<Utc>,
    logged: Option<(PlayerScore, PlayerSession)>,
}

impl GameSession {
    pub fn new(player: PlayerInfo, settings: GameSettings, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player,
            settings,
            state: GameState::Idle,
            queue: Vec::new(),
            index: 0,
            score: 0,
            performance: Vec::new(),
            pending: None,
            draft: String::new(),
            question_started_at: now,
            logged: None,
        }
    }

    /// Shuffles `pool`, keeps at most `questions_per_game` of it and resets
    /// the score and performance log.
    pub fn start<R: Rng + ?Sized>(&mut self, mut pool: Vec<Question>, rng: &mut R, now: DateTime<Utc>) {
        pool.shuffle(rng);
        pool.truncate(self.settings.questions_per_game);
        if self.settings.group_by_level {
            pool.sort_by_key(|q| q.level);
        }

        self.queue = pool;
        self.index = 0;
        self.score = 0;
        self.performance.clear();
        self.pending = None;
        self.draft.clear();
        self.question_started_at = now;
        self.state = if self.queue.is_empty() {
            GameState::Finished
        } else {
            GameState::Playing
        };

        log::debug!(
            "game {} started for {} with {} questions",
            self.id,
            self.player.name,
            self.queue.len()
        );
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player(&self) -> &PlayerInfo {
        &self.player
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn performance(&self) -> &[PlayerPerformance] {
        &self.performance
    }

    pub fn total_questions(&self) -> usize {
        self.queue.len()
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> usize {
        if self.queue.is_empty() {
            0
        } else {
            self.index + 1
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            GameState::Playing | GameState::LevelTransition => self.queue.get(self.index),
            GameState::Idle | GameState::Finished => None,
        }
    }

    pub fn current_level(&self) -> Option<u8> {
        self.current_question().map(|q| q.level)
    }

    pub fn pending_outcome(&self) -> Option<&AnswerOutcome> {
        self.pending.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.pending.as_ref().map(|o| Feedback::from_correct(o.correct))
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_current_timed(&self) -> bool {
        self.current_question()
            .map(|q| grading::is_timed(q, self.player.difficulty))
            .unwrap_or(false)
    }

    /// Deadline of the running countdown, if one is running.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        if self.state != GameState::Playing || self.pending.is_some() || !self.is_current_timed() {
            return None;
        }
        Some(self.question_started_at + Duration::seconds(self.settings.timed_question_seconds))
    }

    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.deadline().map(|deadline| {
            let millis = (deadline - now).num_milliseconds().max(0);
            (millis + 999) / 1000
        })
    }

    /// Records the saved draft (or [`TIMEOUT_ANSWER`]) once the countdown has
    /// run out. Returns the outcome when this call expired the question.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<&AnswerOutcome> {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                let chosen = if self.draft.trim().is_empty() {
                    TIMEOUT_ANSWER.to_string()
                } else {
                    self.draft.clone()
                };
                log::debug!("game {} question {} timed out", self.id, self.index + 1);
                self.record(chosen, true)
            }
            _ => None,
        }
    }

    pub fn save_draft(&mut self, text: &str, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_awaiting_answer()?;
        if self.expire(now).is_some() {
            return Err(AppError::InvalidState(
                "Time is up for this question".to_string(),
            ));
        }
        self.draft = text.to_string();
        Ok(())
    }

    pub fn answer(&mut self, answer: &str, now: DateTime<Utc>) -> AppResult<&AnswerOutcome> {
        self.ensure_awaiting_answer()?;

        // A late answer is ignored; the question counts as timed out.
        if self.expire(now).is_some() {
            return self
                .pending
                .as_ref()
                .ok_or_else(|| AppError::InternalError("Expired question has no outcome".to_string()));
        }

        self.record(answer.to_string(), false)
            .ok_or_else(|| AppError::InvalidState("No question to answer".to_string()))
    }

    /// Dismisses the feedback for the current question and moves on.
    pub fn continue_game(&mut self, now: DateTime<Utc>) -> AppResult<GameState> {
        if self.state != GameState::Playing {
            return Err(AppError::InvalidState(format!(
                "Cannot continue while {:?}",
                self.state
            )));
        }
        if self.pending.take().is_none() {
            return Err(AppError::InvalidState(
                "Current question has not been answered".to_string(),
            ));
        }
        self.draft.clear();

        let next = self.index + 1;
        if next >= self.queue.len() {
            self.state = GameState::Finished;
            log::debug!("game {} finished with score {}", self.id, self.score);
            return Ok(self.state);
        }

        let previous_level = self.queue[self.index].level;
        self.index = next;
        self.question_started_at = now;
        if self.settings.group_by_level && self.queue[next].level > previous_level {
            self.state = GameState::LevelTransition;
        }
        Ok(self.state)
    }

    /// Leaves the level-transition screen and starts the next level.
    pub fn resume(&mut self, now: DateTime<Utc>) -> AppResult<GameState> {
        if self.state != GameState::LevelTransition {
            return Err(AppError::InvalidState(format!(
                "Cannot resume while {:?}",
                self.state
            )));
        }
        self.state = GameState::Playing;
        self.question_started_at = now;
        Ok(self.state)
    }

    /// The leaderboard entry and session log for a finished game.
    pub fn to_record(&self, now: DateTime<Utc>) -> AppResult<(PlayerScore, PlayerSession)> {
        if self.state != GameState::Finished {
            return Err(AppError::InvalidState(
                "Only finished games can be saved".to_string(),
            ));
        }

        let score = PlayerScore {
            name: self.player.name.clone(),
            avatar: self.player.avatar.clone(),
            score: self.score,
            date: now.to_rfc3339(),
        };
        let session = PlayerSession::new(&score, self.performance.clone());
        Ok((score, session))
    }

    /// Record already written to the session log by an earlier save attempt.
    pub fn logged_record(&self) -> Option<&(PlayerScore, PlayerSession)> {
        self.logged.as_ref()
    }

    pub fn mark_logged(&mut self, score: PlayerScore, session: PlayerSession) {
        self.logged = Some((score, session));
    }

    fn ensure_awaiting_answer(&self) -> AppResult<()> {
        if self.state != GameState::Playing {
            return Err(AppError::InvalidState(format!(
                "Cannot answer while {:?}",
                self.state
            )));
        }
        if self.pending.is_some() {
            return Err(AppError::InvalidState(
                "Question already answered".to_string(),
            ));
        }
        Ok(())
    }

    fn points_for_correct(&self) -> i32 {
        match self.settings.scoring {
            ScoringMode::Flat => self.settings.points_per_correct,
            ScoringMode::Tiered => {
                self.settings.points_per_correct * self.player.difficulty.score_multiplier()
            }
        }
    }

    fn record(&mut self, chosen: String, timed_out: bool) -> Option<&AnswerOutcome> {
        let question = self.queue.get(self.index)?;
        let correct = grading::grade_answer(question, self.player.difficulty, &chosen);
        let points_awarded = if correct { self.points_for_correct() } else { 0 };

        let outcome = AnswerOutcome {
            question_id: question.id.clone(),
            correct,
            chosen_answer: chosen.clone(),
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
            points_awarded,
            timed_out,
        };

        self.score += points_awarded;
        self.performance.push(PlayerPerformance {
            question_id: question.id.clone(),
            correct,
            chosen_answer: chosen,
        });
        self.pending = Some(outcome);
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Difficulty;
    use crate::test_utils::fixtures::{choice_question, player, sentence_question};
    use rand::{rngs::StdRng, SeedableRng};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn easy_pool(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| choice_question(&format!("e-{}", i), Difficulty::Easy, 1, "who"))
            .collect()
    }

    fn started(difficulty: Difficulty, pool: Vec<Question>, settings: GameSettings) -> GameSession {
        let mut session = GameSession::new(player(difficulty), settings, t0());
        session.start(pool, &mut StdRng::seed_from_u64(7), t0());
        session
    }

    #[test]
    fn new_session_is_idle() {
        let session = GameSession::new(player(Difficulty::Easy), GameSettings::default(), t0());
        assert_eq!(session.state(), GameState::Idle);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn start_caps_queue_at_questions_per_game() {
        let session = started(Difficulty::Easy, easy_pool(25), GameSettings::default());

        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.question_number(), 1);
    }

    #[test]
    fn start_with_small_pool_uses_all_questions() {
        let session = started(Difficulty::Easy, easy_pool(3), GameSettings::default());
        assert_eq!(session.total_questions(), 3);
    }

    #[test]
    fn empty_pool_finishes_immediately() {
        let session = started(Difficulty::Easy, Vec::new(), GameSettings::default());
        assert_eq!(session.state(), GameState::Finished);
        assert_eq!(session.question_number(), 0);
    }

    #[test]
    fn correct_answer_scores_ten_points() {
        let mut session = started(Difficulty::Easy, easy_pool(2), GameSettings::default());

        let outcome = session.answer("Who", t0()).expect("answer accepted").clone();

        assert!(outcome.correct);
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(session.score(), 10);
        assert_eq!(session.feedback(), Some(Feedback::Correct));
        assert_eq!(session.performance().len(), 1);
        assert_eq!(session.performance()[0].chosen_answer, "Who");
    }

    #[test]
    fn wrong_answer_keeps_score() {
        let mut session = started(Difficulty::Easy, easy_pool(2), GameSettings::default());

        let outcome = session.answer("which", t0()).expect("answer accepted").clone();

        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, "who");
        assert_eq!(session.score(), 0);
        assert_eq!(session.feedback(), Some(Feedback::Incorrect));
    }

    #[test]
    fn second_answer_before_continue_is_rejected() {
        let mut session = started(Difficulty::Easy, easy_pool(2), GameSettings::default());
        session.answer("who", t0()).expect("first answer accepted");

        let result = session.answer("who", t0());

        assert!(matches!(result, Err(AppError::InvalidState(_))));
        assert_eq!(session.score(), 10);
        assert_eq!(session.performance().len(), 1);
    }

    #[test]
    fn continue_requires_an_answer() {
        let mut session = started(Difficulty::Easy, easy_pool(2), GameSettings::default());
        assert!(matches!(
            session.continue_game(t0()),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn full_game_reaches_finished() {
        let mut session = started(Difficulty::Easy, easy_pool(3), GameSettings::default());

        for expected in [GameState::Playing, GameState::Playing, GameState::Finished] {
            session.answer("who", t0()).expect("answer accepted");
            assert_eq!(session.continue_game(t0()).expect("continue"), expected);
        }

        assert_eq!(session.score(), 30);
        assert!(session.current_question().is_none());
        assert!(matches!(session.answer("who", t0()), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn tiered_scoring_multiplies_by_difficulty() {
        let settings = GameSettings {
            scoring: ScoringMode::Tiered,
            ..GameSettings::default()
        };
        let pool = vec![choice_question("m-1", Difficulty::Medium, 1, "whose")];
        let mut session = started(Difficulty::Medium, pool, settings);

        session.answer("whose", t0()).expect("answer accepted");
        assert_eq!(session.score(), 20);
    }

    #[test]
    fn choice_questions_are_not_timed_in_hard_tier() {
        let pool = vec![choice_question("h-1", Difficulty::Hard, 1, "whom")];
        let session = started(Difficulty::Hard, pool, GameSettings::default());

        assert!(!session.is_current_timed());
        assert_eq!(session.remaining_seconds(t0()), None);
    }

    #[test]
    fn timed_question_counts_down() {
        let pool = vec![sentence_question("h-1", "I met a woman who speaks five languages.")];
        let session = started(Difficulty::Hard, pool, GameSettings::default());

        assert!(session.is_current_timed());
        assert_eq!(session.remaining_seconds(t0()), Some(30));
        assert_eq!(
            session.remaining_seconds(t0() + Duration::milliseconds(12_500)),
            Some(18)
        );
        assert_eq!(session.remaining_seconds(t0() + Duration::seconds(45)), Some(0));
    }

    #[test]
    fn expired_question_records_timeout() {
        let pool = vec![sentence_question("h-1", "I met a woman who speaks five languages.")];
        let mut session = started(Difficulty::Hard, pool, GameSettings::default());

        assert!(session.expire(t0() + Duration::seconds(29)).is_none());
        let outcome = session
            .expire(t0() + Duration::seconds(30))
            .expect("question should expire")
            .clone();

        assert!(outcome.timed_out);
        assert!(!outcome.correct);
        assert_eq!(outcome.chosen_answer, TIMEOUT_ANSWER);
        assert_eq!(session.remaining_seconds(t0() + Duration::seconds(31)), None);
    }

    #[test]
    fn expiry_grades_the_saved_draft() {
        let pool = vec![sentence_question("h-1", "I met a woman who speaks five languages.")];
        let mut session = started(Difficulty::Hard, pool, GameSettings::default());

        session
            .save_draft("I met a woman who speaks five languages", t0() + Duration::seconds(10))
            .expect("draft saved");
        let outcome = session
            .expire(t0() + Duration::seconds(31))
            .expect("question should expire")
            .clone();

        assert!(outcome.correct);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn late_answer_is_replaced_by_timeout() {
        let pool = vec![sentence_question("h-1", "I met a woman who speaks five languages.")];
        let mut session = started(Difficulty::Hard, pool, GameSettings::default());

        let outcome = session
            .answer("I met a woman who speaks five languages.", t0() + Duration::seconds(40))
            .expect("late answer resolves the question")
            .clone();

        assert!(outcome.timed_out);
        assert!(!outcome.correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn group_by_level_pauses_between_levels() {
        let settings = GameSettings {
            group_by_level: true,
            ..GameSettings::default()
        };
        let pool = vec![
            choice_question("l2", Difficulty::Easy, 2, "who"),
            choice_question("l1", Difficulty::Easy, 1, "who"),
        ];
        let mut session = started(Difficulty::Easy, pool, settings);

        assert_eq!(session.current_level(), Some(1));
        session.answer("who", t0()).expect("answer accepted");
        assert_eq!(
            session.continue_game(t0()).expect("continue"),
            GameState::LevelTransition
        );
        assert!(matches!(session.answer("who", t0()), Err(AppError::InvalidState(_))));

        assert_eq!(session.resume(t0()).expect("resume"), GameState::Playing);
        assert_eq!(session.current_level(), Some(2));
    }

    #[test]
    fn resume_outside_transition_is_rejected() {
        let mut session = started(Difficulty::Easy, easy_pool(1), GameSettings::default());
        assert!(session.resume(t0()).is_err());
    }

    #[test]
    fn record_requires_finished_game() {
        let mut session = started(Difficulty::Easy, easy_pool(1), GameSettings::default());
        assert!(session.to_record(t0()).is_err());

        session.answer("which", t0()).expect("answer accepted");
        session.continue_game(t0()).expect("continue");

        let (score, log) = session.to_record(t0()).expect("finished game has a record");
        assert_eq!(score.score, 0);
        assert_eq!(score.name, "Ana");
        assert_eq!(log.performance.len(), 1);
        assert_eq!(log.date, score.date);
    }

    #[test]
    fn restart_resets_progress() {
        let mut session = started(Difficulty::Easy, easy_pool(2), GameSettings::default());
        session.answer("who", t0()).expect("answer accepted");

        session.start(easy_pool(2), &mut StdRng::seed_from_u64(1), t0());

        assert_eq!(session.score(), 0);
        assert!(session.performance().is_empty());
        assert!(session.feedback().is_none());
    }

    #[test]
    fn scoring_mode_parses_case_insensitively() {
        assert_eq!("Tiered".parse::<ScoringMode>().ok(), Some(ScoringMode::Tiered));
        assert_eq!("flat".parse::<ScoringMode>().ok(), Some(ScoringMode::Flat));
        assert!("double".parse::<ScoringMode>().is_err());
    }
}
