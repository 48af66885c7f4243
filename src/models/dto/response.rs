use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::domain::{Feedback, GameState, PlayerInfo, Question, QuestionType},
    services::game_session::{AnswerOutcome, GameSession, TIMEOUT_ANSWER},
};

/// A question as shown to the player; the correct answer stays server-side.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionView {
    pub id: String,
    pub level: u8,
    pub question_type: QuestionType,
    pub text: String,
    pub options: Vec<String>,
    pub blank_count: i32,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        QuestionView {
            id: question.id.clone(),
            level: question.level,
            question_type: question.question_type,
            text: question.text.clone(),
            options: question.options.clone(),
            blank_count: question.blank_count() as i32,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AnswerFeedback {
    pub question_id: String,
    pub feedback: Feedback,
    pub correct: bool,
    pub chosen_answer: String,
    /// What the feedback dialog shows as the player's answer.
    pub display_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub points_awarded: i32,
    pub timed_out: bool,
}

impl From<&AnswerOutcome> for AnswerFeedback {
    fn from(outcome: &AnswerOutcome) -> Self {
        let display_answer = if outcome.chosen_answer == TIMEOUT_ANSWER {
            "No answer".to_string()
        } else {
            outcome.chosen_answer.clone()
        };

        AnswerFeedback {
            question_id: outcome.question_id.clone(),
            feedback: Feedback::from_correct(outcome.correct),
            correct: outcome.correct,
            chosen_answer: outcome.chosen_answer.clone(),
            display_answer,
            correct_answer: outcome.correct_answer.clone(),
            explanation: outcome.explanation.clone(),
            points_awarded: outcome.points_awarded,
            timed_out: outcome.timed_out,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GameView {
    pub id: String,
    pub player: PlayerInfo,
    pub state: GameState,
    pub score: i32,
    pub question_number: i32,
    pub total_questions: i32,
    pub level: Option<u8>,
    pub current_question: Option<QuestionView>,
    pub feedback: Option<AnswerFeedback>,
    pub timed: bool,
    pub remaining_seconds: Option<i64>,
}

impl GameView {
    pub fn from_session(session: &GameSession, now: DateTime<Utc>) -> Self {
        GameView {
            id: session.id().to_string(),
            player: session.player().clone(),
            state: session.state(),
            score: session.score(),
            question_number: session.question_number() as i32,
            total_questions: session.total_questions() as i32,
            level: session.current_level(),
            current_question: session.current_question().map(QuestionView::from),
            feedback: session.pending_outcome().map(AnswerFeedback::from),
            timed: session.is_current_timed(),
            remaining_seconds: session.remaining_seconds(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SaveScoreResponse {
    pub session_id: String,
    pub score: i32,
    pub made_leaderboard: bool,
    pub title: String,
    pub message: String,
}

impl SaveScoreResponse {
    pub fn new(session_id: String, score: i32, made_leaderboard: bool) -> Self {
        let (title, message) = if made_leaderboard {
            ("New High Score!", "You made it to the global leaderboard!")
        } else {
            (
                "Score Saved!",
                "Your results are saved for the teacher panel. Good job!",
            )
        };

        SaveScoreResponse {
            session_id,
            score,
            made_leaderboard,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_in_hours: i64,
}
