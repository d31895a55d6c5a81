//! Runtime configuration from environment variables (optionally via `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

/// Deployment flavour: selects log verbosity and format, shown on the index page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
    Default,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
            Profile::Default => "default",
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Dev),
            "prod" | "production" => Ok(Profile::Prod),
            "" | "default" => Ok(Profile::Default),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub app_name: String,
    pub profile: Profile,
    pub max_connections: u32,
    pub seed_data: bool,
    pub flash_ttl: Duration,
    pub body_limit: usize,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Ok(AppConfig {
            database_url: get("DATABASE_URL", "postgres://localhost/appdb"),
            bind_addr: parse("BIND_ADDR", get("BIND_ADDR", "0.0.0.0:8080"))?,
            app_name: get("APP_NAME", "sample-crud"),
            profile: get("APP_PROFILE", "default").parse()?,
            max_connections: parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS", "5"))?,
            seed_data: parse_bool("SEED_DATA", get("SEED_DATA", "true"))?,
            flash_ttl: Duration::from_secs(parse("FLASH_TTL_SECS", get("FLASH_TTL_SECS", "60"))?),
            body_limit: parse("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES", "65536"))?,
        })
    }

    /// `DATABASE_URL` with any password replaced, for logging.
    pub fn redacted_database_url(&self) -> String {
        redact_password(&self.database_url)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

pub(crate) fn redact_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let rest = &url[scheme_end..];
    let Some(at) = rest.find('@') else {
        return url.to_string();
    };
    match rest[..at].find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..scheme_end],
            &rest[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
