use crate::db::{self, DbPool};
use crate::models::settings::Setting;

use super::KeyValueStore;

/// SQLite-backed local persistence.
/// Wraps the r2d2 pool and delegates to the `settings` table.
pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `path` and apply migrations.
    pub fn open(path: &str) -> Result<Self, String> {
        let pool = db::init_pool_at(path).map_err(|e| e.to_string())?;
        db::run_migrations(&pool).map_err(|e| e.to_string())?;
        Ok(Self::new(pool))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        Setting::get(&self.pool, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        Setting::set(&self.pool, key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        Setting::delete(&self.pool, key)
    }
}
