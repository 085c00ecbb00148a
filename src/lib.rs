pub mod auth;
pub mod config;
pub mod contact;
pub mod error;
pub mod observability;
pub mod routes;

pub use crate::config::Config;
pub use crate::routes::{AppState, router};
