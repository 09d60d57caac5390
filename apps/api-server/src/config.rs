//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use postline_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub seed: SeedConfig,
}

/// Startup seeding options.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    /// Seed document on disk; `None` uses the bundled `posts.json`.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let seed = SeedConfig {
            enabled: env::var("SEED_ENABLED")
                .map(|v| is_truthy(&v))
                .unwrap_or(true),
            file: env::var("SEED_FILE").ok().map(PathBuf::from),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            seed,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}
