//! Runtime facade tests: the embedded surface the host admin layer
//! calls, TOML configuration, and on-disk persistence across restarts.

use pulse_core::traits::IEngagementStore;
use pulse_core::types::VariantPatch;
use pulse_recompute::{PulseRuntime, RuntimeOptions};
use pulse_storage::to_storage_err;

fn seed_members(runtime: &PulseRuntime, ids: &[i64]) {
    let rows: Vec<String> = ids
        .iter()
        .map(|id| format!("({id}, 'member-{id}')"))
        .collect();
    let sql = format!(
        "INSERT INTO members (id, display_name) VALUES {};",
        rows.join(", ")
    );
    runtime
        .storage()
        .pool()
        .writer
        .with_conn_sync(|conn| {
            conn.execute_batch(&sql)
                .map_err(|e| to_storage_err(e.to_string()).into())
        })
        .expect("seed SQL");
}

#[tokio::test]
async fn facade_drives_the_whole_admin_surface() {
    pulse_recompute::tracing_setup::init_tracing_with_filter("warn");
    let runtime = PulseRuntime::new(RuntimeOptions::default()).unwrap();
    seed_members(&runtime, &[1, 2]);

    let record = runtime.trigger_manual("admin-recalculate").await.unwrap();
    assert!(record.success);
    assert_eq!(record.members_processed, 2);
    assert!(runtime.score(1).unwrap().is_some());
    assert!(!runtime.is_recomputing());

    assert_eq!(runtime.list_variant_configs().unwrap().len(), 2);
    let patch = VariantPatch {
        display_name: Some("Challenger".to_string()),
        traffic_share: Some(10),
        enabled: Some(true),
        ..Default::default()
    };
    let created = runtime.upsert_variant_config("C", patch).unwrap();
    assert_eq!(created.traffic_share, 10);
    assert!(created.enabled);
    assert_eq!(runtime.list_variant_configs().unwrap().len(), 3);

    // Slots 49 and 50 straddle the 50/50 boundary, one member each way.
    let report = runtime.analytics().unwrap();
    assert_eq!(report.performance_by_variant.len(), 2);
    assert_eq!(report.performance_by_variant[0].sample_size, 1);
    assert!(report.last_run.is_some());
}

#[tokio::test]
async fn rebalance_discards_assignments_and_reslots_everyone() {
    let runtime = PulseRuntime::new(RuntimeOptions::default()).unwrap();
    seed_members(&runtime, &[1, 2, 3]);

    runtime.trigger_manual("first").await.unwrap();
    let record = runtime.rebalance().await.unwrap();

    assert!(record.success);
    assert_eq!(record.reason, "rebalance");
    assert_eq!(record.members_processed, 3);
    for id in [1, 2, 3] {
        assert!(runtime.storage().get_assignment(id).unwrap().is_some());
    }
}

#[test]
fn toml_overrides_apply_and_absent_sections_keep_defaults() {
    let runtime = PulseRuntime::new(RuntimeOptions {
        db_path: None,
        config_toml: Some(
            "[recompute]\ninterval_secs = 60\n\n[analytics]\nmin_sample_size = 5\n".to_string(),
        ),
    })
    .unwrap();

    assert_eq!(runtime.config().recompute.interval_secs, 60);
    assert_eq!(runtime.config().analytics.min_sample_size, 5);
    assert_eq!(runtime.config().assignment.fallback_variant, "A");
}

#[test]
fn malformed_toml_is_a_config_error() {
    let result = PulseRuntime::new(RuntimeOptions {
        db_path: None,
        config_toml: Some("[recompute\ninterval_secs = oops".to_string()),
    });
    assert!(result.is_err());
}

#[tokio::test]
async fn scores_survive_a_runtime_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pulse.db");

    {
        let runtime = PulseRuntime::new(RuntimeOptions {
            db_path: Some(db_path.clone()),
            config_toml: None,
        })
        .unwrap();
        seed_members(&runtime, &[7]);
        let record = runtime.trigger_manual("before-restart").await.unwrap();
        assert!(record.success);
    }

    let reopened = PulseRuntime::new(RuntimeOptions {
        db_path: Some(db_path),
        config_toml: None,
    })
    .unwrap();
    let score = reopened.score(7).unwrap().expect("score survived restart");
    assert!(score.score >= 0.0);
    assert!(reopened.storage().get_assignment(7).unwrap().is_some());
}
