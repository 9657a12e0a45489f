use crate::errors::PulseResult;
use crate::types::{Assignment, MemberId, RunRecord, ScoreRow, VariantCode, VariantConfig};

/// Persistence for the three entities this engine owns, plus the pass
/// history. Row operations are individually atomic; there is no
/// pass-wide transaction.
pub trait IEngagementStore: Send + Sync {
    // --- Variant configs ---
    fn list_variant_configs(&self) -> PulseResult<Vec<VariantConfig>>;
    fn get_variant_config(&self, code: &VariantCode) -> PulseResult<Option<VariantConfig>>;
    fn put_variant_config(&self, config: &VariantConfig) -> PulseResult<()>;

    // --- Assignments ---
    fn get_assignment(&self, member_id: MemberId) -> PulseResult<Option<Assignment>>;
    fn put_assignment(&self, assignment: &Assignment) -> PulseResult<()>;
    fn all_assignments(&self) -> PulseResult<Vec<Assignment>>;
    fn delete_assignments(&self, member_ids: &[MemberId]) -> PulseResult<usize>;
    fn clear_assignments(&self) -> PulseResult<usize>;

    // --- Scores ---
    fn upsert_score(&self, row: &ScoreRow) -> PulseResult<()>;
    fn get_score(&self, member_id: MemberId) -> PulseResult<Option<ScoreRow>>;
    fn all_scores(&self) -> PulseResult<Vec<ScoreRow>>;
    fn delete_scores(&self, member_ids: &[MemberId]) -> PulseResult<usize>;

    // --- Run history ---
    fn record_run(&self, run: &RunRecord) -> PulseResult<()>;
    fn latest_run(&self) -> PulseResult<Option<RunRecord>>;
}
