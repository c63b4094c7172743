use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;

use crate::errors::CacheError;

// Thread-local connection slot.
thread_local! {
    static CACHE_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure, opening it on first
    /// use for this thread.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut Connection) -> Result<T, CacheError>,
    {
        let inner_result = CACHE_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| CacheError::DbError(format!("Open cache db failed: {e}")))?;
                    *slot = Some(conn);
                }
                let conn = match slot.as_mut() {
                    Some(conn) => conn,
                    None => return Err(CacheError::InternalError),
                };
                f(conn)
            })
            .map_err(|_| CacheError::InternalError)?;
        inner_result
    }
}

/// Apply the schema file to the cache database.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), CacheError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| CacheError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| CacheError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })
}
