use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{
    auth::{utils::bearer_token, Claims, JwtService},
    errors::{AppError, AppResult},
};

/// Extractor for handlers behind the teacher panel login.
pub struct AuthenticatedAdmin(pub Claims);

fn claims_from_request(req: &HttpRequest) -> AppResult<Claims> {
    let jwt_service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let claims = jwt_service.validate_token(bearer_token(auth_header)?)?;
    super::require_admin(&claims)?;
    Ok(claims)
}

/// Admin claims for GraphQL requests that carry a valid token, if any.
pub fn optional_claims(req: &HttpRequest) -> Option<Claims> {
    claims_from_request(req).ok()
}

impl FromRequest for AuthenticatedAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).map(AuthenticatedAdmin))
    }
}
