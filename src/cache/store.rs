use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::cache::connection::{init_db, Database};
use crate::errors::CacheError;

/// Keyed byte-blob store, one entry per community. Entries are written
/// only after a complete non-empty fetch and never expire here; whoever
/// owns the file decides when to throw it away.
pub trait ResultCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
}

#[derive(Debug)]
pub struct SqliteCache {
    db: Database,
}

impl SqliteCache {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            db: Database::new(path),
        }
    }
}

impl ResultCache for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT payload FROM cache_entries WHERE community_id = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(|e| CacheError::DbError(e.to_string()))
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let now = Utc::now().naive_utc();
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO cache_entries (community_id, payload, created_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(community_id) DO UPDATE SET
                    payload = excluded.payload,
                    created_at = excluded.created_at
                "#,
                params![key, value, now],
            )
            .map_err(|e| CacheError::DbError(e.to_string()))?;
            Ok(())
        })
    }
}

/// Open the cache, apply the schema, and confirm the backend answers.
/// Runs before any discovery so a dead cache fails the run up front
/// instead of halfway through retrieval.
pub fn init_cache(path: &str, schema_path: &str) -> Result<SqliteCache, CacheError> {
    let cache = SqliteCache::new(path);
    init_db(&cache.db, schema_path)?;

    cache.db.with_conn(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| CacheError::DbError(format!("Cache ping failed: {e}")))
    })?;

    Ok(cache)
}
