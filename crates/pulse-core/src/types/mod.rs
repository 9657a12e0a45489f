pub mod member;
pub mod run;
pub mod score;
pub mod signals;
pub mod variant;

pub use member::{MemberId, MemberProfile};
pub use run::RunRecord;
pub use score::{round2, Score, ScoreResult, ScoreRow};
pub use signals::{SignalCounts, SignalKind, SignalSample, SignalWindows};
pub use variant::{Assignment, ParamSource, ResolvedParams, VariantCode, VariantConfig, VariantPatch};
