pub mod game;
pub mod player;
pub mod question;
pub mod score;
pub mod session;
pub use game::{Feedback, GameState};
pub use player::PlayerInfo;
pub use question::{Difficulty, Question, QuestionType};
pub use score::{HighScore, PlayerScore};
pub use session::{PlayerPerformance, PlayerSession};
