//! Session route handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use super::AppState;
use crate::auth::{AuthUser, UserView};
use crate::error::AppError;

/// GET /auth/me - Identity carried by the access token
pub async fn me(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(user)
}

/// POST /auth/refresh - Reissue both tokens from the refresh cookie
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state.sessions.refresh(jar.clone()) {
        Some(jar) => (jar, StatusCode::NO_CONTENT).into_response(),
        None => {
            tracing::debug!("Refresh rejected, clearing session cookies");
            (state.sessions.logout(jar), AppError::Unauthorized).into_response()
        }
    }
}

/// POST /auth/logout - Clear session cookies
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (state.sessions.logout(jar), Redirect::to("/"))
}
