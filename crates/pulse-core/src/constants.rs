/// Pulse engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Built-in baseline variant code.
pub const VARIANT_A: &str = "A";

/// Built-in growth-tuned variant code.
pub const VARIANT_B: &str = "B";

/// Traffic share each built-in variant receives at bootstrap (percent).
pub const BOOTSTRAP_TRAFFIC_SHARE: u8 = 50;

/// Modulus of the rolling assignment hash. Changing it reshuffles every
/// existing assignment, so it is frozen.
pub const SLOT_HASH_MODULUS: i64 = 1_000_003;

/// Number of traffic slots a population is split into.
pub const SLOT_COUNT: u32 = 100;

/// Short activity window (days) — recent-post burstiness only.
pub const SHORT_WINDOW_DAYS: i64 = 7;

/// Long activity window (days) — all signal types.
pub const LONG_WINDOW_DAYS: i64 = 30;

/// Idle age (days) assumed for members with no recorded activity at all.
pub const NEVER_ACTIVE_AGE_DAYS: i64 = 365;

/// Final score bounds.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Maximum length of a variant code.
pub const MAX_VARIANT_CODE_LEN: usize = 32;

/// Maximum rows deleted per statement when pruning orphans.
pub const MAX_PRUNE_BATCH_SIZE: usize = 500;
