use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "nba_stats.db";
pub const DEFAULT_API_HOST: &str = "nba-api-free-data.p.rapidapi.com";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite path, or `:memory:`
    pub database_url: String,
    pub api_key: String,
    pub api_host: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let api_key = env::var("NBA_API_KEY").unwrap_or_else(|_| {
            warn!("NBA_API_KEY not set, upstream requests will be unauthenticated");
            String::new()
        });

        Self {
            database_url: string_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            api_key,
            api_host: string_or("NBA_API_HOST", DEFAULT_API_HOST),
            host: string_or("HOST", DEFAULT_HOST),
            port: parse_or("PORT", DEFAULT_PORT),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_key: String::new(),
            api_host: DEFAULT_API_HOST.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
