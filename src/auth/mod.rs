//! Authentication module
//!
//! Provides signed access/refresh tokens carried in HTTP-only cookies

use std::time::Duration;

pub mod cookies;
pub mod jwt;
pub mod manager;
pub mod secrets;
pub mod session;

pub use cookies::{
    SessionTokens, clear_session_cookies, read_session_tokens, set_session_cookies,
};
pub use jwt::{Claims, TokenCodec};
pub use manager::{SessionManager, TokenPair};
pub use secrets::{SecretKind, SessionSecrets};
pub use session::{AuthUser, CurrentUser, UserView, get_current_user};

/// Cookie name for the access token
pub const ACCESS_COOKIE_NAME: &str = "access_token";

/// Cookie name for the refresh token
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

const DAY: u64 = 24 * 60 * 60;

pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(7 * DAY);

/// Six 30-day months
pub const REFRESH_TOKEN_LIFETIME: Duration = Duration::from_secs(6 * 30 * DAY);
