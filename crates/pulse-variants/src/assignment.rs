//! Sticky member → variant assignment.

use chrono::{DateTime, Utc};

use pulse_core::config::AssignmentConfig;
use pulse_core::errors::PulseResult;
use pulse_core::types::{Assignment, MemberId, VariantCode, VariantConfig};

use crate::slotting;

/// Pick the variant owning `slot` among the qualifying configs
/// (enabled with a positive traffic share).
///
/// Qualifying variants are walked in ascending code order, accumulating
/// `round(share / totalShare * 100)` into a cursor; the first variant
/// whose cursor exceeds the slot wins. Rounding can leave the last few
/// slots unclaimed — those go to the last qualifying variant. `None`
/// when nothing qualifies; the caller owns the fallback.
pub fn choose_variant(configs: &[VariantConfig], slot: u32) -> Option<&VariantCode> {
    let mut qualifying: Vec<&VariantConfig> =
        configs.iter().filter(|c| c.qualifies()).collect();
    qualifying.sort_by(|a, b| a.code.cmp(&b.code));

    let first = qualifying.first()?;
    let total: u32 = qualifying.iter().map(|c| u32::from(c.traffic_share)).sum();
    if total == 0 {
        return Some(&first.code);
    }

    let mut cursor: u32 = 0;
    for config in &qualifying {
        let share_pct =
            (f64::from(config.traffic_share) / f64::from(total) * 100.0).round() as u32;
        cursor += share_pct;
        if cursor > slot {
            return Some(&config.code);
        }
    }
    qualifying.last().map(|c| &c.code)
}

/// Outcome of resolving one member's assignment for a pass.
#[derive(Debug, Clone)]
pub enum AssignmentOutcome {
    /// The stored assignment survives untouched — nothing to persist.
    Retained(Assignment),
    /// A fresh assignment was derived and must be persisted.
    Created(Assignment),
}

impl AssignmentOutcome {
    pub fn variant_code(&self) -> &VariantCode {
        match self {
            Self::Retained(a) | Self::Created(a) => &a.variant_code,
        }
    }
}

/// Resolves sticky assignments against the current variant configs.
pub struct AssignmentService {
    fallback: VariantCode,
}

impl AssignmentService {
    pub fn new(config: &AssignmentConfig) -> PulseResult<Self> {
        Ok(Self {
            fallback: VariantCode::new(&config.fallback_variant)?,
        })
    }

    /// Sticky policy: an existing assignment survives as long as its
    /// variant is still configured at all — even disabled or at zero
    /// share. Only brand-new members and members whose stored variant
    /// vanished from the config table get a fresh slot-derived
    /// assignment.
    pub fn resolve(
        &self,
        member_id: MemberId,
        existing: Option<&Assignment>,
        configs: &[VariantConfig],
        now: DateTime<Utc>,
    ) -> AssignmentOutcome {
        if let Some(assignment) = existing {
            let still_configured = configs.iter().any(|c| c.code == assignment.variant_code);
            if still_configured {
                return AssignmentOutcome::Retained(assignment.clone());
            }
        }

        let slot = slotting::slot_for(member_id);
        let code = choose_variant(configs, slot)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        AssignmentOutcome::Created(Assignment {
            member_id,
            variant_code: code,
            assigned_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::params::defaults;

    fn make_config(code: &str, share: u8, enabled: bool) -> VariantConfig {
        VariantConfig {
            code: VariantCode::new(code).unwrap(),
            display_name: code.to_string(),
            description: String::new(),
            traffic_share: share,
            enabled,
            params: defaults::for_variant(code),
            updated_at: Utc::now(),
        }
    }

    fn service() -> AssignmentService {
        AssignmentService::new(&AssignmentConfig::default()).unwrap()
    }

    #[test]
    fn even_split_divides_slots_at_the_midpoint() {
        let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];
        assert_eq!(choose_variant(&configs, 0).unwrap().as_str(), "A");
        assert_eq!(choose_variant(&configs, 49).unwrap().as_str(), "A");
        assert_eq!(choose_variant(&configs, 50).unwrap().as_str(), "B");
        assert_eq!(choose_variant(&configs, 99).unwrap().as_str(), "B");
    }

    #[test]
    fn single_qualifying_variant_takes_every_slot() {
        // "A" disabled, only "B" enabled at share 50.
        let configs = vec![make_config("A", 0, false), make_config("B", 50, true)];
        for slot in [0, 25, 50, 99] {
            assert_eq!(choose_variant(&configs, slot).unwrap().as_str(), "B");
        }
    }

    #[test]
    fn nothing_qualifying_yields_none() {
        let configs = vec![make_config("A", 0, true), make_config("B", 50, false)];
        assert!(choose_variant(&configs, 10).is_none());
        assert!(choose_variant(&[], 10).is_none());
    }

    #[test]
    fn walk_uses_ascending_code_order_regardless_of_input_order() {
        let configs = vec![make_config("B", 50, true), make_config("A", 50, true)];
        assert_eq!(choose_variant(&configs, 0).unwrap().as_str(), "A");
        assert_eq!(choose_variant(&configs, 99).unwrap().as_str(), "B");
    }

    #[test]
    fn rounding_gap_falls_to_last_variant() {
        // Three equal shares round to 33% each; slot 99 sits past the
        // 99-cursor and lands on the last variant.
        let configs = vec![
            make_config("A", 10, true),
            make_config("B", 10, true),
            make_config("C", 10, true),
        ];
        assert_eq!(choose_variant(&configs, 99).unwrap().as_str(), "C");
        assert_eq!(choose_variant(&configs, 32).unwrap().as_str(), "A");
        assert_eq!(choose_variant(&configs, 33).unwrap().as_str(), "B");
        assert_eq!(choose_variant(&configs, 66).unwrap().as_str(), "C");
    }

    #[test]
    fn uneven_shares_scale_to_percentages() {
        // 30/10 normalizes to 75%/25%.
        let configs = vec![make_config("A", 30, true), make_config("B", 10, true)];
        assert_eq!(choose_variant(&configs, 74).unwrap().as_str(), "A");
        assert_eq!(choose_variant(&configs, 75).unwrap().as_str(), "B");
    }

    #[test]
    fn existing_assignment_is_retained_even_when_variant_disabled() {
        let configs = vec![make_config("A", 0, false), make_config("B", 100, true)];
        let existing = Assignment {
            member_id: 7,
            variant_code: VariantCode::new("A").unwrap(),
            assigned_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let outcome = service().resolve(7, Some(&existing), &configs, Utc::now());
        match outcome {
            AssignmentOutcome::Retained(a) => assert_eq!(a.variant_code.as_str(), "A"),
            AssignmentOutcome::Created(_) => panic!("disabled variant must stay sticky"),
        }
    }

    #[test]
    fn vanished_variant_triggers_reassignment() {
        let configs = vec![make_config("B", 100, true)];
        let existing = Assignment {
            member_id: 7,
            variant_code: VariantCode::new("OLD").unwrap(),
            assigned_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let outcome = service().resolve(7, Some(&existing), &configs, Utc::now());
        match outcome {
            AssignmentOutcome::Created(a) => assert_eq!(a.variant_code.as_str(), "B"),
            AssignmentOutcome::Retained(_) => panic!("vanished variant must reassign"),
        }
    }

    #[test]
    fn new_member_gets_slot_derived_assignment() {
        let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];
        let now = Utc::now();

        let outcome = service().resolve(42, None, &configs, now);
        let AssignmentOutcome::Created(a) = outcome else {
            panic!("new member must be assigned");
        };
        // Slot 62 falls in B's half.
        assert_eq!(a.variant_code.as_str(), "B");
        assert_eq!(a.assigned_at, now);
        assert_eq!(a.updated_at, now);
    }

    #[test]
    fn fallback_applies_when_no_variant_qualifies() {
        let configs = vec![make_config("A", 0, false)];
        let outcome = service().resolve(1, None, &configs, Utc::now());
        assert_eq!(outcome.variant_code().as_str(), "A");
    }

    #[test]
    fn resolution_is_deterministic_per_member() {
        let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];
        let svc = service();
        for member_id in 0..500i64 {
            let a = svc.resolve(member_id, None, &configs, Utc::now());
            let b = svc.resolve(member_id, None, &configs, Utc::now());
            assert_eq!(a.variant_code(), b.variant_code());
        }
    }
}
