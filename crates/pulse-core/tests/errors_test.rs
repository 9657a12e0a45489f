use pulse_core::errors::*;

#[test]
fn member_not_found_carries_id() {
    let err = PulseError::MemberNotFound { id: 4711 };
    assert!(err.to_string().contains("4711"));
}

#[test]
fn invalid_variant_code_carries_code_and_reason() {
    let err = PulseError::InvalidVariantCode {
        code: "!!bad!!".into(),
        reason: "only ASCII alphanumerics".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("!!bad!!"));
    assert!(msg.contains("alphanumerics"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_pulse_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let pulse_err: PulseError = storage_err.into();
    assert!(matches!(pulse_err, PulseError::StorageError(_)));
    assert!(pulse_err.to_string().contains("disk full"));
}

#[test]
fn recompute_error_converts_to_pulse_error() {
    let pulse_err: PulseError = RecomputeError::AlreadyRunning.into();
    assert!(matches!(pulse_err, PulseError::RecomputeError(_)));
    assert!(pulse_err.to_string().contains("already in progress"));
}

#[test]
fn serialization_error_converts_to_pulse_error() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let pulse_err: PulseError = json_err.into();
    assert!(matches!(pulse_err, PulseError::SerializationError(_)));
}

// --- Sub-error variants carry context ---

#[test]
fn storage_error_migration_failed_carries_version() {
    let err = StorageError::MigrationFailed {
        version: 2,
        reason: "syntax error".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("2"));
    assert!(msg.contains("syntax error"));
}

#[test]
fn storage_error_row_decode_carries_table() {
    let err = StorageError::RowDecodeFailed {
        table: "engagement_scores".into(),
        reason: "bad json".into(),
    };
    assert!(err.to_string().contains("engagement_scores"));
}

#[test]
fn to_storage_err_wraps_message() {
    let err = to_storage_err("database is locked");
    assert!(matches!(err, StorageError::SqliteError { .. }));
    assert!(err.to_string().contains("database is locked"));
}

#[test]
fn recompute_pass_failed_carries_reason() {
    let err = RecomputeError::PassFailed {
        reason: "activity source unavailable".into(),
    };
    assert!(err.to_string().contains("activity source unavailable"));
}
