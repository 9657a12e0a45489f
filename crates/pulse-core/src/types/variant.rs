use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_VARIANT_CODE_LEN;
use crate::errors::{PulseError, PulseResult};
use crate::params::ScoringParams;

use super::MemberId;

/// Validated variant code. Variants are created by operators at runtime,
/// so this stays an open string key rather than a closed enum — but an
/// invalid code is rejected at the boundary instead of silently
/// defaulting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantCode(String);

impl VariantCode {
    /// Validate and wrap a raw code: trimmed, 1..=32 chars, ASCII
    /// alphanumeric plus `_` and `-`.
    pub fn new(raw: &str) -> PulseResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PulseError::InvalidVariantCode {
                code: raw.to_string(),
                reason: "empty".to_string(),
            });
        }
        if trimmed.len() > MAX_VARIANT_CODE_LEN {
            return Err(PulseError::InvalidVariantCode {
                code: raw.to_string(),
                reason: format!("longer than {MAX_VARIANT_CODE_LEN} chars"),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(PulseError::InvalidVariantCode {
                code: raw.to_string(),
                reason: "only ASCII alphanumerics, '_' and '-' are allowed".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VariantCode {
    type Error = PulseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<VariantCode> for String {
    fn from(code: VariantCode) -> Self {
        code.0
    }
}

/// One named parameter set competing for a share of the population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub code: VariantCode,
    pub display_name: String,
    pub description: String,
    /// Integer percent, 0..=100.
    pub traffic_share: u8,
    pub enabled: bool,
    pub params: ScoringParams,
    pub updated_at: DateTime<Utc>,
}

impl VariantConfig {
    /// Qualifies for new traffic: enabled with a positive share.
    pub fn qualifies(&self) -> bool {
        self.enabled && self.traffic_share > 0
    }
}

/// Partial admin update for a variant config. Absent fields keep their
/// stored values; unknown parameter names are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantPatch {
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Clamped into 0..=100 on apply.
    pub traffic_share: Option<i64>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub params: HashMap<String, f64>,
}

/// Where a resolved parameter set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamSource {
    /// Normalized from a stored variant config row.
    Stored,
    /// The variant had no stored row — compiled defaults were used.
    CompiledDefault,
}

/// A variant's normalized parameters plus the provenance of the lookup,
/// so fallback paths stay visible to callers and tests.
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub code: VariantCode,
    pub params: ScoringParams,
    pub source: ParamSource,
}

/// Sticky member-to-variant assignment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub member_id: MemberId,
    pub variant_code: VariantCode,
    pub assigned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
