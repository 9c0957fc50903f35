use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEV_DATABASE_URL: &str = "postgres://localhost:5432/webhook_db";
const DEFAULT_PROCESSING_DELAY_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub server_port: u16,
    pub database_url: String,
    pub processing_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let app_env = match env::var("APP_ENV").as_deref() {
            Ok("production") => AppEnv::Production,
            _ => AppEnv::Development,
        };

        // In production a missing DATABASE_URL is a fatal configuration
        // error; in development we fall back to a local database.
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if app_env == AppEnv::Development => DEV_DATABASE_URL.to_string(),
            Err(_) => anyhow::bail!("DATABASE_URL must be set in production"),
        };

        let processing_delay_secs = env::var("PROCESSING_DELAY_SECS")
            .unwrap_or_else(|_| DEFAULT_PROCESSING_DELAY_SECS.to_string())
            .parse::<u64>()?;

        Ok(Config {
            app_env,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            database_url,
            processing_delay: Duration::from_secs(processing_delay_secs),
        })
    }
}
