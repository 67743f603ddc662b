use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NakedcapError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::monitor::Monitor;
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub monitor: Monitor,
}

impl AppContext {
    /// Open the database and build the pipeline. `db_path` overrides the
    /// configured `database_path`.
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path.or_else(|| config.database_path.clone()) {
            Some(p) => {
                if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                p
            }
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Arc<SqliteStore>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.site)?);
        let monitor = Monitor::new(&config, fetcher, store.clone())?;

        Ok(Self {
            config,
            store,
            monitor,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NakedcapError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("nakedcap");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("articles.db"))
    }
}
