//! JWT token generation and validation

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
    get_current_timestamp,
};
use serde_json::{Map, Value};

use super::secrets::{SecretKind, SessionSecrets};
use super::{ACCESS_TOKEN_LIFETIME, REFRESH_TOKEN_LIFETIME};

/// Open claims payload. Whatever the issuer embeds is carried as-is.
pub type Claims = Map<String, Value>;

/// The single signing algorithm used for every token
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Why a token was rejected. Only ever logged; callers see `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    Malformed,
    #[error("signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    Premature,
    #[error("token carries no expiry")]
    MissingExpiry,
}

/// Signs and verifies tokens with one of the two session secrets
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secrets: Arc<SessionSecrets>,
    kind: SecretKind,
    lifetime: Duration,
}

impl TokenCodec {
    pub fn new(secrets: Arc<SessionSecrets>, kind: SecretKind, lifetime: Duration) -> Self {
        Self {
            secrets,
            kind,
            lifetime,
        }
    }

    /// Codec bound to the access secret, 7 day tokens
    pub fn access(secrets: Arc<SessionSecrets>) -> Self {
        Self::new(secrets, SecretKind::Access, ACCESS_TOKEN_LIFETIME)
    }

    /// Codec bound to the refresh secret, 180 day tokens
    pub fn refresh(secrets: Arc<SessionSecrets>) -> Self {
        Self::new(secrets, SecretKind::Refresh, REFRESH_TOKEN_LIFETIME)
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn kind(&self) -> SecretKind {
        self.kind
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Sign `claims`, stamping `iat` and `exp` from the current time
    pub fn issue(&self, claims: &Claims) -> anyhow::Result<String> {
        self.issue_at(claims, get_current_timestamp())
    }

    /// Sign `claims` as if issued at `now` (unix seconds)
    pub fn issue_at(&self, claims: &Claims, now: u64) -> anyhow::Result<String> {
        let mut claims = claims.clone();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert(
            "exp".to_string(),
            Value::from(now + self.lifetime.as_secs()),
        );

        let token = encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secrets.get(self.kind)),
        )?;

        Ok(token)
    }

    /// Verify `token` against the bound secret.
    ///
    /// Every failure (malformed, forged, wrong secret, expired) collapses to `None`.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, get_current_timestamp())
    }

    pub fn verify_at(&self, token: &str, now: u64) -> Option<Claims> {
        match self.classify(token, now) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(token = self.kind.as_str(), reason = %e, "Token rejected");
                None
            }
        }
    }

    pub(crate) fn classify(&self, token: &str, now: u64) -> Result<Claims, VerifyError> {
        // Time checks are done below against `now` so they can be exercised deterministically
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secrets.get(self.kind)),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::BadSignature,
            ErrorKind::MissingRequiredClaim(_) => VerifyError::MissingExpiry,
            _ => VerifyError::Malformed,
        })?;

        let claims = token_data.claims;

        let exp = timestamp(&claims, "exp").ok_or(VerifyError::MissingExpiry)?;
        if now >= exp {
            return Err(VerifyError::Expired);
        }

        let premature = |key| timestamp(&claims, key).is_some_and(|at| at > now);
        if premature("iat") || premature("nbf") {
            return Err(VerifyError::Premature);
        }

        Ok(claims)
    }
}

fn timestamp(claims: &Claims, key: &str) -> Option<u64> {
    let value = claims.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
}
