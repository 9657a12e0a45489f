//! CRUD for variant_configs rows.

use rusqlite::{params, Connection};

use pulse_core::errors::{PulseResult, StorageError};
use pulse_core::params::ScoringParams;
use pulse_core::types::{VariantCode, VariantConfig};

use crate::queries::{parse_dt, OptionalRow};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT code, display_name, description, traffic_share, enabled,
            params, updated_at
     FROM variant_configs";

struct VariantRow {
    code: String,
    display_name: String,
    description: String,
    traffic_share: i64,
    enabled: bool,
    params: String,
    updated_at: String,
}

fn map_variant_row(row: &rusqlite::Row<'_>) -> Result<VariantRow, rusqlite::Error> {
    Ok(VariantRow {
        code: row.get(0)?,
        display_name: row.get(1)?,
        description: row.get(2)?,
        traffic_share: row.get(3)?,
        enabled: row.get(4)?,
        params: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn into_config(row: VariantRow) -> PulseResult<VariantConfig> {
    let code = VariantCode::new(&row.code).map_err(|e| StorageError::RowDecodeFailed {
        table: "variant_configs".to_string(),
        reason: e.to_string(),
    })?;
    // Param decode is tolerant: anything unreadable resolves to the
    // variant's compiled defaults rather than failing the read.
    let stored: serde_json::Value =
        serde_json::from_str(&row.params).unwrap_or(serde_json::Value::Null);
    let params = ScoringParams::from_stored(code.as_str(), &stored);
    Ok(VariantConfig {
        code,
        display_name: row.display_name,
        description: row.description,
        traffic_share: row.traffic_share.clamp(0, 100) as u8,
        enabled: row.enabled,
        params,
        updated_at: parse_dt(&row.updated_at)?,
    })
}

/// All variant configs in ascending code order — the order every
/// traffic-split walk uses.
pub fn list_variant_configs(conn: &Connection) -> PulseResult<Vec<VariantConfig>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY code ASC");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], map_variant_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut configs = Vec::new();
    for row in rows {
        configs.push(into_config(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(configs)
}

pub fn get_variant_config(conn: &Connection, code: &str) -> PulseResult<Option<VariantConfig>> {
    let sql = format!("{SELECT_COLUMNS} WHERE code = ?1");
    let row = conn
        .query_row(&sql, [code], map_variant_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_config).transpose()
}

pub fn upsert_variant_config(conn: &Connection, config: &VariantConfig) -> PulseResult<()> {
    let params_json = serde_json::to_string(&config.params)?;
    conn.execute(
        "INSERT INTO variant_configs
             (code, display_name, description, traffic_share, enabled, params, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(code) DO UPDATE SET
             display_name = excluded.display_name,
             description = excluded.description,
             traffic_share = excluded.traffic_share,
             enabled = excluded.enabled,
             params = excluded.params,
             updated_at = excluded.updated_at",
        params![
            config.code.as_str(),
            config.display_name,
            config.description,
            i64::from(config.traffic_share),
            config.enabled,
            params_json,
            config.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
