use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub school_api_url: String,
    pub card_cache_dir: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    pub http_timeout: Duration,
    pub session_ttl: Duration,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let school_api_url = env::var("SCHOOL_API_URL").context("SCHOOL_API_URL must be set")?;
        let port = parse_or("PORT", 8080u16)?;
        let http_timeout = Duration::from_secs(parse_or("HTTP_TIMEOUT_SECS", 30u64)?);
        let session_ttl = Duration::from_secs(parse_or("SESSION_TTL_SECS", 3600u64)?);

        Ok(Self {
            school_api_url,
            card_cache_dir: env::var("CARD_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            http_timeout,
            session_ttl,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
