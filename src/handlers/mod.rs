pub mod admin_handler;
pub mod game_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod leaderboard_handler;

use actix_web::web;

pub use admin_handler::{admin_login, export_sessions, list_sessions};
pub use game_handler::{
    abandon_game, continue_game, get_game, resume_game, save_draft, save_game, start_game,
    submit_answer,
};
pub use graphql_handler::{graphiql, graphql_endpoint};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use leaderboard_handler::get_leaderboard;

/// Registers every REST route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(start_game)
        .service(get_game)
        .service(submit_answer)
        .service(save_draft)
        .service(continue_game)
        .service(resume_game)
        .service(save_game)
        .service(abandon_game)
        .service(get_leaderboard)
        .service(admin_login)
        .service(list_sessions)
        .service(export_sessions)
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live);
}
