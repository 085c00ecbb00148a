use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};

use crate::auth::SessionManager;
use crate::config::Config;
use crate::contact::ContactNotifier;

mod auth;
mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionManager,
    pub contact: Arc<dyn ContactNotifier>,
}

impl AppState {
    pub fn new(config: Config, contact: Arc<dyn ContactNotifier>) -> Self {
        let sessions = SessionManager::from_config(&config);

        Self {
            config,
            sessions,
            contact,
        }
    }
}

impl FromRef<AppState> for SessionManager {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/contact", get(contact::page).post(contact::action))
        .route("/auth/me", get(auth::me))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .with_state(app_state)
}
