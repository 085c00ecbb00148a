use anyhow::{Context, Result};
use estately::{
    Config,
    auth::{Claims, SessionManager},
};
use serde_json::Value;

/// Parse `key=value` pairs into claims. `true`, `false` and integers keep their type.
pub fn parse_claims(pairs: &[String]) -> Result<Claims> {
    let mut claims = Claims::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("claim `{pair}` is not in key=value form"))?;

        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            v => v
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(v.to_string())),
        };

        claims.insert(key.trim().to_string(), value);
    }

    Ok(claims)
}

pub fn issue(config: Config, pairs: Vec<String>) -> Result<()> {
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    let claims = parse_claims(&pairs)?;
    let pair = SessionManager::from_config(&config).issue(&claims)?;

    println!("{}", serde_json::to_string_pretty(&pair)?);

    Ok(())
}
