use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;

// CLI flags - everything else comes from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "realartist-server")]
#[command(about = "RealArtist AI API server")]
pub struct Args {
    // Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    // Directory holding the built SPA assets
    #[arg(long, default_value = "dist/public")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub env: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub cors_origin: String,
    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: u32,
    pub max_file_size: u64,
    pub allowed_file_types: Vec<String>,
    pub static_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment with CLI
    /// overrides. Malformed numeric variables are a startup error rather
    /// than a silent default.
    pub fn from_env(args: &Args) -> Result<Self> {
        let port = match args.port {
            Some(port) => port,
            None => env_number("PORT", 5000)?,
        };

        Ok(Self {
            port,
            env: env_string("NODE_ENV", "development"),
            jwt_secret: env_string("JWT_SECRET", "your-secret-key-change-in-production"),
            database_url: env_string("DATABASE_URL", ""),
            cors_origin: env_string("CORS_ORIGIN", "*"),
            rate_limit_window: Duration::from_millis(env_number(
                "RATE_LIMIT_WINDOW_MS",
                900_000,
            )?),
            rate_limit_max_requests: env_number("RATE_LIMIT_MAX_REQUESTS", 100)?,
            max_file_size: env_number("MAX_FILE_SIZE", 10 * 1024 * 1024)?,
            allowed_file_types: split_file_types(&env_string(
                "ALLOWED_FILE_TYPES",
                "image/jpeg,image/png,image/webp",
            )),
            static_dir: args.static_dir.clone(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_number<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_number(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("environment variable {key} must be a number: {e}"))
}

fn split_file_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
