use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Use WAL journaling (readers never block the write pass).
    pub wal_mode: bool,
    /// Memory-mapped I/O size in bytes.
    pub mmap_size: i64,
    /// SQLite cache size pragma value (negative = KiB).
    pub cache_size: i64,
    /// Busy timeout before a locked connection gives up.
    pub busy_timeout_ms: u32,
    /// Number of pooled read connections.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            mmap_size: defaults::DEFAULT_MMAP_SIZE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
