use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{SaveDraftRequest, StartGameRequest, SubmitAnswerRequest},
};

#[post("/api/games")]
async fn start_game(
    state: web::Data<AppState>,
    request: web::Json<StartGameRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state.game_service.start_game(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(view))
}

#[get("/api/games/{id}")]
async fn get_game(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.game_service.get_game(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/games/{id}/answers")]
async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let view = state.game_service.submit_answer(&id, &request.answer).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/api/games/{id}/draft")]
async fn save_draft(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SaveDraftRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let view = state.game_service.save_draft(&id, &request.text).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/games/{id}/continue")]
async fn continue_game(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.game_service.continue_game(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/games/{id}/resume")]
async fn resume_game(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.game_service.resume_game(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/games/{id}/save")]
async fn save_game(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.game_service.save_game(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/api/games/{id}")]
async fn abandon_game(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.game_service.abandon_game(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
