pub mod connection;
pub mod store;

pub use store::{init_cache, ResultCache, SqliteCache};
