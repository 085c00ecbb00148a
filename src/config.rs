use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Secrets shorter than this are reported as weak at startup.
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub environment: AppEnvironment,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Deployment mode. Only production turns on the `Secure` cookie attribute.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl AppEnvironment {
    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Signing secret for access tokens
    #[serde(default)]
    pub access_secret: Option<String>,
    /// Signing secret for refresh tokens
    #[serde(default)]
    pub refresh_secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// Mailbox that receives contact form submissions
    #[serde(default = "default_contact_address")]
    pub to_address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            to_address: default_contact_address(),
        }
    }
}

fn default_contact_address() -> String {
    "contact@estately.local".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (JWT_SECRET, JWT_REFRESH_SECRET, APP_ENV)
    /// 2. Environment variables (ESTATELY__AUTH__ACCESS_SECRET, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("environment", "development")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ESTATELY")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("auth.access_secret", secret)?;
        }
        if let Ok(secret) = env::var("JWT_REFRESH_SECRET") {
            builder = builder.set_override("auth.refresh_secret", secret)?;
        }
        if let Ok(app_env) = env::var("APP_ENV") {
            builder = builder.set_override("environment", app_env.to_lowercase())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing signing secrets are not an error here, see [`Config::warnings`].
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.trim().is_empty() {
            return Err("Server host must not be empty".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Non-fatal problems worth logging at startup.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, secret) in [
            ("auth.access_secret", &self.auth.access_secret),
            ("auth.refresh_secret", &self.auth.refresh_secret),
        ] {
            match secret.as_deref() {
                None | Some("") => warnings.push(format!(
                    "{name} is not set, tokens will be signed with an empty key"
                )),
                Some(value) if value.len() < MIN_SECRET_LEN => {
                    warnings.push(format!("{name} is shorter than {MIN_SECRET_LEN} bytes"))
                }
                Some(_) => {}
            }
        }

        if let (Some(access), Some(refresh)) = (&self.auth.access_secret, &self.auth.refresh_secret)
            && !access.is_empty()
            && access == refresh
        {
            warnings.push(
                "auth.access_secret and auth.refresh_secret are identical, \
                 access and refresh tokens become interchangeable"
                    .to_string(),
            );
        }

        warnings
    }
}
