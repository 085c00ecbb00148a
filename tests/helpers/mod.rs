//! Shared setup for router-level tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Response, header},
};
use axum_extra::extract::cookie::Cookie;
use estately::{
    AppState,
    auth::Claims,
    config::{
        AppEnvironment, AuthConfig, Config, ContactConfig, ObservabilityConfig, ServerConfig,
    },
    contact::{ContactForm, ContactNotifier},
};
use http_body_util::BodyExt;

pub const ACCESS_SECRET: &str = "access_secret_key_minimum_32_characters";
pub const REFRESH_SECRET: &str = "refresh_secret_key_minimum_32_characters";

pub fn test_config(environment: AppEnvironment) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        environment,
        auth: AuthConfig {
            access_secret: Some(ACCESS_SECRET.to_string()),
            refresh_secret: Some(REFRESH_SECRET.to_string()),
        },
        observability: ObservabilityConfig::default(),
        contact: ContactConfig {
            to_address: "inbox@estately.test".to_string(),
        },
    }
}

/// Notifier that keeps submissions in memory
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, ContactForm)>>,
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, to: &str, form: &ContactForm) -> anyhow::Result<()> {
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .push((to.to_string(), form.clone()));
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new(environment: AppEnvironment) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::new(test_config(environment), notifier.clone());

        Self { state, notifier }
    }

    pub fn router(&self) -> Router {
        estately::router(self.state.clone())
    }
}

pub fn claims(value: serde_json::Value) -> Claims {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("claims must be an object, got {other}"),
    }
}

/// Parsed `Set-Cookie` headers of a response
pub fn set_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| Cookie::parse(value.to_str().unwrap().to_string()).unwrap())
        .collect()
}

pub fn cookie_header(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
