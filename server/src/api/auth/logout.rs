use crate::api::{ApiError, ErrorResponse};
use crate::auth::{delete_session, parse_authorization, AuthUser};
use crate::db::DbPool;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/token/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    // AuthUser already validated the header
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| parse_authorization(h).ok())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let mut conn = pool.get()?;
    delete_session(&mut conn, user.id, token)?;

    Ok(StatusCode::NO_CONTENT)
}
