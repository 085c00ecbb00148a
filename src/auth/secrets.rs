//! Process-lifetime cache of the access and refresh signing secrets

use std::sync::OnceLock;

use crate::config::AuthConfig;

/// Which signing secret a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Access,
    Refresh,
}

impl SecretKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SecretKind::Access => "access",
            SecretKind::Refresh => "refresh",
        }
    }
}

/// Signing secrets derived once from configuration.
///
/// Each key is materialized on first use and never re-derived or rotated.
/// A missing configuration value yields an empty key and a warning.
#[derive(Debug, Default)]
pub struct SessionSecrets {
    access_source: Option<String>,
    refresh_source: Option<String>,
    access: OnceLock<Vec<u8>>,
    refresh: OnceLock<Vec<u8>>,
}

impl SessionSecrets {
    pub fn new(access_source: Option<String>, refresh_source: Option<String>) -> Self {
        Self {
            access_source,
            refresh_source,
            access: OnceLock::new(),
            refresh: OnceLock::new(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.access_secret.clone(), config.refresh_secret.clone())
    }

    pub fn access_secret(&self) -> &[u8] {
        self.get(SecretKind::Access)
    }

    pub fn refresh_secret(&self) -> &[u8] {
        self.get(SecretKind::Refresh)
    }

    pub fn get(&self, kind: SecretKind) -> &[u8] {
        let (cell, source) = match kind {
            SecretKind::Access => (&self.access, &self.access_source),
            SecretKind::Refresh => (&self.refresh, &self.refresh_source),
        };

        cell.get_or_init(|| derive(kind, source.as_deref()))
    }
}

fn derive(kind: SecretKind, source: Option<&str>) -> Vec<u8> {
    match source {
        Some(value) if !value.is_empty() => value.as_bytes().to_vec(),
        _ => {
            tracing::warn!(
                secret = kind.as_str(),
                "signing secret is not configured, using an empty key"
            );
            Vec::new()
        }
    }
}
