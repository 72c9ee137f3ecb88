pub mod initializer;
pub mod memory;
pub mod postgres;
pub mod retry;

use crate::config::{AppConfig, ConfigError};
use crate::errors::AppError;
use crate::models::employee::{Employee, NewEmployee};
use log::info;
use memory::MemoryStore;
use postgres::PgStore;
use retry::RetryPolicy;
use std::fmt;

/// Live handle on the configured backend. Cloning shares the underlying store or pool.
#[derive(Debug, Clone)]
pub enum DbContext {
    InMemory(MemoryStore),
    Postgres(PgStore),
}

#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Database(AppError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(err) => write!(f, "configuration error: {}", err),
            StartupError::Database(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl From<AppError> for StartupError {
    fn from(err: AppError) -> Self {
        StartupError::Database(err)
    }
}

/// Picks the backend for the run mode and opens it.
pub async fn create_context(config: &AppConfig) -> Result<DbContext, StartupError> {
    match &config.database {
        None => {
            info!("Using in-memory employee store");
            Ok(DbContext::in_memory())
        }
        Some(db) => {
            info!("Using PostgreSQL at {}", db.describe());
            let options = db.connect_options()?;
            let store = PgStore::connect(options, RetryPolicy::default())
                .await
                .map_err(AppError::from)?;
            Ok(DbContext::Postgres(store))
        }
    }
}

impl DbContext {
    pub fn in_memory() -> Self {
        DbContext::InMemory(MemoryStore::new())
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, DbContext::Postgres(_))
    }

    /// Applies pending migrations. A no-op for the in-memory store.
    pub async fn migrate(&self) -> Result<(), AppError> {
        match self {
            DbContext::InMemory(_) => Ok(()),
            DbContext::Postgres(store) => Ok(store.migrate().await?),
        }
    }

    pub async fn has_employees(&self) -> Result<bool, AppError> {
        match self {
            DbContext::InMemory(store) => Ok(store.has_employees().await),
            DbContext::Postgres(store) => Ok(store.has_employees().await?),
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Employee>, AppError> {
        match self {
            DbContext::InMemory(store) => Ok(store.fetch_all().await),
            DbContext::Postgres(store) => Ok(store.fetch_all().await?),
        }
    }

    pub async fn insert(&self, draft: NewEmployee) -> Result<Employee, AppError> {
        match self {
            DbContext::InMemory(store) => Ok(store.insert(draft).await),
            DbContext::Postgres(store) => Ok(store.insert(draft).await?),
        }
    }

    pub async fn insert_many(&self, drafts: Vec<NewEmployee>) -> Result<Vec<Employee>, AppError> {
        match self {
            DbContext::InMemory(store) => Ok(store.insert_many(drafts).await),
            DbContext::Postgres(store) => Ok(store.insert_many(drafts).await?),
        }
    }
}
