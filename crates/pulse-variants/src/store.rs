//! Variant configuration store.
//!
//! Thin layer over [`IEngagementStore`] that owns the two compiled-in
//! variants, write-path clamping, and the read-path parameter
//! resolution used by scoring.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use pulse_core::constants::{BOOTSTRAP_TRAFFIC_SHARE, VARIANT_A, VARIANT_B};
use pulse_core::errors::PulseResult;
use pulse_core::params::defaults;
use pulse_core::traits::IEngagementStore;
use pulse_core::types::{ParamSource, ResolvedParams, VariantCode, VariantConfig, VariantPatch};

const VARIANT_A_NAME: &str = "Baseline";
const VARIANT_A_DESCRIPTION: &str = "Compiled baseline weights";
const VARIANT_B_NAME: &str = "Growth";
const VARIANT_B_DESCRIPTION: &str = "Creator-leaning growth experiment";

pub struct VariantStore {
    store: Arc<dyn IEngagementStore>,
}

impl VariantStore {
    pub fn new(store: Arc<dyn IEngagementStore>) -> Self {
        Self { store }
    }

    /// All variant configs in ascending code order. An empty table is
    /// lazily bootstrapped with the two built-in variants at an even
    /// split.
    pub fn list(&self) -> PulseResult<Vec<VariantConfig>> {
        let configs = self.store.list_variant_configs()?;
        if !configs.is_empty() {
            return Ok(configs);
        }

        let now = Utc::now();
        for config in [bootstrap_config(VARIANT_A, now)?, bootstrap_config(VARIANT_B, now)?] {
            self.store.put_variant_config(&config)?;
        }
        info!("bootstrapped built-in variant configs");
        self.store.list_variant_configs()
    }

    /// Normalized parameter set for a variant. Unknown codes resolve to
    /// the compiled defaults, with the source made visible so callers
    /// (and tests) can tell the fallback path apart from a stored read.
    pub fn params_for(&self, code: &VariantCode) -> PulseResult<ResolvedParams> {
        match self.store.get_variant_config(code)? {
            Some(config) => Ok(ResolvedParams {
                code: code.clone(),
                params: config.params.normalized(code.as_str()),
                source: ParamSource::Stored,
            }),
            None => Ok(ResolvedParams {
                code: code.clone(),
                params: defaults::for_variant(code.as_str()),
                source: ParamSource::CompiledDefault,
            }),
        }
    }

    /// Admin update: merge the patch into the stored config (creating a
    /// dark config for an unknown code), clamp every tunable to its
    /// bound, and stamp updated-at.
    pub fn upsert(
        &self,
        code: &VariantCode,
        patch: &VariantPatch,
        now: DateTime<Utc>,
    ) -> PulseResult<VariantConfig> {
        let mut config = match self.store.get_variant_config(code)? {
            Some(existing) => existing,
            // New codes start dark: no traffic until explicitly given
            // a share and enabled.
            None => VariantConfig {
                code: code.clone(),
                display_name: code.as_str().to_string(),
                description: String::new(),
                traffic_share: 0,
                enabled: false,
                params: defaults::for_variant(code.as_str()),
                updated_at: now,
            },
        };

        if let Some(display_name) = &patch.display_name {
            config.display_name = display_name.clone();
        }
        if let Some(description) = &patch.description {
            config.description = description.clone();
        }
        if let Some(share) = patch.traffic_share {
            config.traffic_share = share.clamp(0, 100) as u8;
        }
        if let Some(enabled) = patch.enabled {
            config.enabled = enabled;
        }

        let applied = config.params.apply_patch(&patch.params);
        config.params = config.params.clamped(code.as_str());
        config.updated_at = now;

        self.store.put_variant_config(&config)?;
        info!(
            code = code.as_str(),
            params_patched = applied,
            traffic_share = config.traffic_share,
            enabled = config.enabled,
            "variant config updated"
        );
        Ok(config)
    }
}

fn bootstrap_config(code: &str, now: DateTime<Utc>) -> PulseResult<VariantConfig> {
    let (display_name, description) = if code == VARIANT_B {
        (VARIANT_B_NAME, VARIANT_B_DESCRIPTION)
    } else {
        (VARIANT_A_NAME, VARIANT_A_DESCRIPTION)
    };
    Ok(VariantConfig {
        code: VariantCode::new(code)?,
        display_name: display_name.to_string(),
        description: description.to_string(),
        traffic_share: BOOTSTRAP_TRAFFIC_SHARE,
        enabled: true,
        params: defaults::for_variant(code),
        updated_at: now,
    })
}
