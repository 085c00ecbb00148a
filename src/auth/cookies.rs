//! Session cookie transport
//!
//! The access and refresh tokens travel in two HTTP-only cookies whose
//! max-age mirrors the token lifetime. `SameSite` is left to the browser default.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use super::{
    ACCESS_COOKIE_NAME, ACCESS_TOKEN_LIFETIME, REFRESH_COOKIE_NAME, REFRESH_TOKEN_LIFETIME,
};

/// Raw token values found in the session cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl SessionTokens {
    /// Read from the per-request cookie jar
    pub fn from_jar(jar: &CookieJar) -> Self {
        Self {
            access: cookie_value(jar, ACCESS_COOKIE_NAME),
            refresh: cookie_value(jar, REFRESH_COOKIE_NAME),
        }
    }

    /// Read from the `Cookie` headers of an inbound request
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_jar(&CookieJar::from_headers(headers))
    }
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn session_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .max_age(max_age)
        .build()
}

fn seconds(lifetime: std::time::Duration) -> Duration {
    Duration::seconds(lifetime.as_secs() as i64)
}

/// Write both session cookies. `secure` should only be set in production.
pub fn set_session_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    secure: bool,
) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE_NAME,
        access_token,
        seconds(ACCESS_TOKEN_LIFETIME),
        secure,
    ))
    .add(session_cookie(
        REFRESH_COOKIE_NAME,
        refresh_token,
        seconds(REFRESH_TOKEN_LIFETIME),
        secure,
    ))
}

/// Overwrite both session cookies with an empty value and zero max-age
pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE_NAME,
        String::new(),
        Duration::ZERO,
        secure,
    ))
    .add(session_cookie(
        REFRESH_COOKIE_NAME,
        String::new(),
        Duration::ZERO,
        secure,
    ))
}

/// Read both tokens, from `request` when given, otherwise from the ambient jar.
/// Missing or emptied cookies read as `None`.
pub fn read_session_tokens(jar: &CookieJar, request: Option<&HeaderMap>) -> SessionTokens {
    match request {
        Some(headers) => SessionTokens::from_headers(headers),
        None => SessionTokens::from_jar(jar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use axum_extra::extract::cookie::SameSite;

    #[test]
    fn test_set_then_read_returns_written_values() {
        let jar = set_session_cookies(
            CookieJar::new(),
            "access-value".to_string(),
            "refresh-value".to_string(),
            false,
        );

        let tokens = read_session_tokens(&jar, None);

        assert_eq!(tokens.access.as_deref(), Some("access-value"));
        assert_eq!(tokens.refresh.as_deref(), Some("refresh-value"));
    }

    #[test]
    fn test_cookie_attributes() {
        let jar = set_session_cookies(
            CookieJar::new(),
            "a".to_string(),
            "r".to_string(),
            false,
        );

        let access = jar.get(ACCESS_COOKIE_NAME).unwrap();
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.secure(), Some(false));
        assert_eq!(access.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(access.same_site(), None::<SameSite>);

        let refresh = jar.get(REFRESH_COOKIE_NAME).unwrap();
        assert_eq!(refresh.max_age(), Some(Duration::seconds(15_552_000)));
    }

    #[test]
    fn test_secure_flag_follows_argument() {
        let jar = set_session_cookies(
            CookieJar::new(),
            "a".to_string(),
            "r".to_string(),
            true,
        );

        assert_eq!(jar.get(ACCESS_COOKIE_NAME).unwrap().secure(), Some(true));
        assert_eq!(jar.get(REFRESH_COOKIE_NAME).unwrap().secure(), Some(true));
    }

    #[test]
    fn test_clear_then_read_returns_nothing() {
        let jar = set_session_cookies(
            CookieJar::new(),
            "a".to_string(),
            "r".to_string(),
            true,
        );
        let jar = clear_session_cookies(jar, true);

        assert_eq!(read_session_tokens(&jar, None), SessionTokens::default());

        let access = jar.get(ACCESS_COOKIE_NAME).unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age(), Some(Duration::ZERO));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
    }

    #[test]
    fn test_read_prefers_request_headers() {
        let ambient = set_session_cookies(
            CookieJar::new(),
            "ambient-a".to_string(),
            "ambient-r".to_string(),
            false,
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "access_token=request-a".parse().unwrap());

        let tokens = read_session_tokens(&ambient, Some(&headers));

        assert_eq!(tokens.access.as_deref(), Some("request-a"));
        assert_eq!(tokens.refresh, None);
    }

    #[test]
    fn test_read_from_empty_jar() {
        assert_eq!(
            read_session_tokens(&CookieJar::new(), None),
            SessionTokens::default()
        );
    }
}
