use anyhow::{bail, Context, Result};
use std::env;

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let jwt_secret = match env::var("JWT_SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == "production" => {
                bail!("JWT_SECRET_KEY must be set in production")
            }
            _ => DEV_JWT_SECRET.to_string(),
        };

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
