//! Current-user resolution from the access token cookie

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use serde_json::Value;

use super::cookies::read_session_tokens;
use super::jwt::{Claims, TokenCodec};
use super::manager::SessionManager;
use crate::error::AppError;

/// Identity projected from access token claims.
///
/// Rebuilt on every request. Claims the issuer did not embed stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_email_verified: Option<bool>,
    pub is_identity_verified: Option<bool>,
}

impl UserView {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: text(claims, "user_id"),
            first_name: text(claims, "first_name"),
            last_name: text(claims, "last_name"),
            email: text(claims, "email"),
            role: text(claims, "role"),
            is_email_verified: flag(claims, "is_email_verified"),
            is_identity_verified: flag(claims, "is_identity_verified"),
        }
    }
}

fn text(claims: &Claims, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flag(claims: &Claims, key: &str) -> Option<bool> {
    match claims.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Resolve the signed-in user from the ambient cookie jar.
///
/// Missing, expired, forged or otherwise unusable tokens all yield `None`.
pub fn get_current_user(jar: &CookieJar, access: &TokenCodec) -> Option<UserView> {
    let Some(token) = read_session_tokens(jar, None).access else {
        tracing::debug!("No access token found in request");
        return None;
    };

    let claims = access.verify(&token)?;

    Some(UserView::from_claims(&claims))
}

/// Extractor for pages that render differently for signed-in users
pub struct CurrentUser(pub Option<UserView>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionManager: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionManager::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(CurrentUser(sessions.current_user(&jar)))
    }
}

/// Extractor for routes that require a signed-in user
pub struct AuthUser(pub UserView);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionManager: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        user.map(AuthUser).ok_or(AppError::Unauthorized)
    }
}
