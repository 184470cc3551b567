// src/common/config.rs
//! Environment configuration for the API server

use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite://company_api.db";
const DEFAULT_JWT_SECRET: &str = "replace_with_strong_secret";
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );
        let reset_db = env::var("RESET_DB")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        Self {
            database_url,
            jwt_secret,
            port,
            cors_origins,
            reset_db,
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Directory that has to exist before SQLite can create the database file
    ///
    /// `None` for in-memory databases and bare file names.
    pub fn sqlite_parent_dir(&self) -> Option<PathBuf> {
        let path_part = self.database_url.strip_prefix("sqlite://")?;
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if path_without_params.is_empty() || path_without_params.starts_with(':') {
            return None;
        }

        PathBuf::from(path_without_params)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.to_path_buf())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
