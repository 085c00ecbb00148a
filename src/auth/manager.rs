//! Session lifecycle: login, refresh, logout and current-user lookup

use std::sync::Arc;

use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::cookies::{clear_session_cookies, read_session_tokens, set_session_cookies};
use super::jwt::{Claims, TokenCodec};
use super::secrets::SessionSecrets;
use super::session::{UserView, get_current_user};
use crate::config::Config;

/// Freshly signed access and refresh tokens for the same claims
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Entry point for everything session related. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionManager {
    secrets: Arc<SessionSecrets>,
    access: TokenCodec,
    refresh: TokenCodec,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(secrets: Arc<SessionSecrets>, secure_cookies: bool) -> Self {
        Self {
            access: TokenCodec::access(secrets.clone()),
            refresh: TokenCodec::refresh(secrets.clone()),
            secrets,
            secure_cookies,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(SessionSecrets::from_config(&config.auth)),
            config.environment.is_production(),
        )
    }

    pub fn secrets(&self) -> &SessionSecrets {
        &self.secrets
    }

    pub fn access_codec(&self) -> &TokenCodec {
        &self.access
    }

    pub fn refresh_codec(&self) -> &TokenCodec {
        &self.refresh
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    pub fn issue(&self, claims: &Claims) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.access.issue(claims)?,
            refresh_token: self.refresh.issue(claims)?,
        })
    }

    /// Issue a token pair for `claims` and write it into the session cookies
    pub fn login(&self, jar: CookieJar, claims: &Claims) -> anyhow::Result<CookieJar> {
        let pair = self.issue(claims)?;

        Ok(set_session_cookies(
            jar,
            pair.access_token,
            pair.refresh_token,
            self.secure_cookies,
        ))
    }

    /// Trade a valid refresh cookie for a new token pair.
    ///
    /// Returns `None` when the refresh cookie is missing or does not verify.
    pub fn refresh(&self, jar: CookieJar) -> Option<CookieJar> {
        let token = read_session_tokens(&jar, None).refresh?;
        let mut claims = self.refresh.verify(&token)?;

        claims.remove("iat");
        claims.remove("exp");

        match self.login(jar, &claims) {
            Ok(jar) => Some(jar),
            Err(e) => {
                tracing::error!(error = %e, "Failed to reissue session tokens");
                None
            }
        }
    }

    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        clear_session_cookies(jar, self.secure_cookies)
    }

    pub fn current_user(&self, jar: &CookieJar) -> Option<UserView> {
        get_current_user(jar, &self.access)
    }
}
