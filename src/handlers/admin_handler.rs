use actix_web::{get, http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedAdmin,
    errors::AppError,
    models::dto::{request::AdminLoginRequest, response::AdminLoginResponse},
    services::session_export::EXPORT_FILE_NAME,
};

#[post("/api/admin/login")]
async fn admin_login(
    state: web::Data<AppState>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let token = state.jwt_service.login_admin(&request.password)?;
    log::info!("Teacher panel login succeeded");

    Ok(HttpResponse::Ok().json(AdminLoginResponse {
        token,
        expires_in_hours: state.jwt_service.expiration_hours(),
    }))
}

#[get("/api/admin/sessions")]
async fn list_sessions(
    state: web::Data<AppState>,
    _auth: AuthenticatedAdmin,
) -> Result<HttpResponse, AppError> {
    let sessions = state.session_service.list_sessions().await?;
    Ok(HttpResponse::Ok().json(sessions))
}

#[get("/api/admin/sessions/export")]
async fn export_sessions(
    state: web::Data<AppState>,
    _auth: AuthenticatedAdmin,
) -> Result<HttpResponse, AppError> {
    let csv = state.session_service.export_csv().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(csv))
}
