use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::LeaderboardParams};

#[get("/api/leaderboard")]
async fn get_leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardParams>,
) -> Result<HttpResponse, AppError> {
    let limit = query
        .limit
        .unwrap_or(state.config.home_leaderboard_size as i64);
    let scores = state.leaderboard_service.top(limit).await?;
    Ok(HttpResponse::Ok().json(scores))
}
