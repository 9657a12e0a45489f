//! Storage engine facade.
//!
//! Owns the connection pool and implements both data traits: the
//! read-only [`IActivitySource`] over the application's member and
//! activity tables, and [`IEngagementStore`] over the rows this engine
//! writes itself. All writes go through the single writer connection;
//! reads fan out over the read pool when one is available.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::info;

use pulse_core::config::StorageConfig;
use pulse_core::errors::PulseResult;
use pulse_core::traits::{IActivitySource, IEngagementStore};
use pulse_core::types::{
    Assignment, MemberId, MemberProfile, RunRecord, ScoreRow, SignalWindows, VariantCode,
    VariantConfig,
};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

pub struct StorageEngine {
    pool: ConnectionPool,
    // In-memory pools can't share data between connections, so reads
    // are routed through the writer in that mode.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open (or create) the database at `path` and run pending
    /// migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> PulseResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        info!(path = %path.display(), readers = engine.pool.readers.size(), "storage engine ready");
        Ok(engine)
    }

    /// Open a fresh in-memory database. Used by tests and local tools.
    pub fn open_in_memory(config: &StorageConfig) -> PulseResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> PulseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Direct pool access for maintenance tasks and test seeding.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> PulseResult<u32> {
        self.with_reader(|conn| migrations::current_version(conn))
    }

    fn with_reader<F, T>(&self, f: F) -> PulseResult<T>
    where
        F: FnOnce(&Connection) -> PulseResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IActivitySource for StorageEngine {
    fn member_profiles(&self) -> PulseResult<Vec<MemberProfile>> {
        self.with_reader(|conn| queries::member_ops::list_members(conn))
    }

    fn signal_windows(&self, now: DateTime<Utc>) -> PulseResult<SignalWindows> {
        self.with_reader(|conn| queries::activity_rollup::collect_windows(conn, now))
    }
}

impl IEngagementStore for StorageEngine {
    fn list_variant_configs(&self) -> PulseResult<Vec<VariantConfig>> {
        self.with_reader(|conn| queries::variant_ops::list_variant_configs(conn))
    }

    fn get_variant_config(&self, code: &VariantCode) -> PulseResult<Option<VariantConfig>> {
        self.with_reader(|conn| queries::variant_ops::get_variant_config(conn, code.as_str()))
    }

    fn put_variant_config(&self, config: &VariantConfig) -> PulseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::variant_ops::upsert_variant_config(conn, config))
    }

    fn get_assignment(&self, member_id: MemberId) -> PulseResult<Option<Assignment>> {
        self.with_reader(|conn| queries::assignment_ops::get_assignment(conn, member_id))
    }

    fn put_assignment(&self, assignment: &Assignment) -> PulseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::assignment_ops::put_assignment(conn, assignment))
    }

    fn all_assignments(&self) -> PulseResult<Vec<Assignment>> {
        self.with_reader(|conn| queries::assignment_ops::all_assignments(conn))
    }

    fn delete_assignments(&self, member_ids: &[MemberId]) -> PulseResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::assignment_ops::delete_assignments(conn, member_ids))
    }

    fn clear_assignments(&self) -> PulseResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::assignment_ops::clear_assignments(conn))
    }

    fn upsert_score(&self, row: &ScoreRow) -> PulseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::score_ops::upsert_score(conn, row))
    }

    fn get_score(&self, member_id: MemberId) -> PulseResult<Option<ScoreRow>> {
        self.with_reader(|conn| queries::score_ops::get_score(conn, member_id))
    }

    fn all_scores(&self) -> PulseResult<Vec<ScoreRow>> {
        self.with_reader(|conn| queries::score_ops::all_scores(conn))
    }

    fn delete_scores(&self, member_ids: &[MemberId]) -> PulseResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::score_ops::delete_scores(conn, member_ids))
    }

    fn record_run(&self, run: &RunRecord) -> PulseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::run_ops::insert_run(conn, run))
    }

    fn latest_run(&self) -> PulseResult<Option<RunRecord>> {
        self.with_reader(|conn| queries::run_ops::latest_run(conn))
    }
}
