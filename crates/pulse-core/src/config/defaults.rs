//! Default values for every config knob, referenced by the section
//! `Default` impls and by the docs.

use crate::constants::VARIANT_A;

// Storage
pub const DEFAULT_DB_PATH: &str = "pulse.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_MMAP_SIZE: i64 = 268_435_456;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// Recompute scheduling
pub const DEFAULT_STARTUP_DELAY_SECS: u64 = 10;
pub const DEFAULT_INTERVAL_SECS: u64 = 1_800;
pub const DEFAULT_DEBOUNCE_SECS: u64 = 45;

// Assignment
pub const DEFAULT_FALLBACK_VARIANT: &str = VARIANT_A;

// Analytics
pub const DEFAULT_BASELINE_VARIANT: &str = VARIANT_A;
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 20;
pub const DEFAULT_TRAFFIC_SHIFT_POINTS: u8 = 5;
