// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::dev_mode::DevModeConfig;

/// Application state containing the database pool and auth configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub dev_mode: DevModeConfig,
}

/// State handle installed as an `Extension` on the router
pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
