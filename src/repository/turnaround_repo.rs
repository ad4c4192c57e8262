// ==========================================
// 航班尾号分配系统 - 过站时间策略仓储
// ==========================================
// 红线: Repository 不含业务逻辑; 回退链解析在引擎层
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::turnaround::{AirportTatOverride, TurnaroundPolicy};
use crate::domain::types::RouteTier;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// TurnaroundPolicyRepository - 过站策略仓储
// ==========================================
/// 管理 tat_policy (机型级缺省) 与 tat_airport_override
/// (机场+机型覆盖) 两张表
///
/// 分航段组合覆盖以 JSON 对象文本列存储 (键为 RouteTier)。
pub struct TurnaroundPolicyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TurnaroundPolicyRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入或替换机型级策略
    pub fn upsert_type_policy(&self, policy: &TurnaroundPolicy) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO tat_policy (
                aircraft_type, scheduled_tat_min, min_tat_min, hard_floor_min, tier_overrides
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                policy.aircraft_type,
                policy.scheduled_tat_min,
                policy.min_tat_min,
                policy.hard_floor_min,
                serde_json::to_string(&policy.tier_overrides)?,
            ],
        )?;
        Ok(())
    }

    /// 插入或替换机场级覆盖
    pub fn upsert_airport_override(&self, over: &AirportTatOverride) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO tat_airport_override (
                airport, aircraft_type, scheduled_tat_min, min_tat_min, hard_floor_min, tier_overrides
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                over.airport,
                over.policy.aircraft_type,
                over.policy.scheduled_tat_min,
                over.policy.min_tat_min,
                over.policy.hard_floor_min,
                serde_json::to_string(&over.policy.tier_overrides)?,
            ],
        )?;
        Ok(())
    }

    /// 读取全部机型级策略
    pub fn list_type_policies(&self) -> RepositoryResult<Vec<TurnaroundPolicy>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT aircraft_type, scheduled_tat_min, min_tat_min, hard_floor_min, tier_overrides
             FROM tat_policy ORDER BY aircraft_type",
        )?;

        let rows = stmt.query_map([], map_policy_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 读取全部机场级覆盖
    pub fn list_airport_overrides(&self) -> RepositoryResult<Vec<AirportTatOverride>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT airport, aircraft_type, scheduled_tat_min, min_tat_min, hard_floor_min, tier_overrides
             FROM tat_airport_override ORDER BY airport, aircraft_type",
        )?;

        let rows = stmt.query_map([], |row| {
            let airport: String = row.get(0)?;
            let policy = map_policy_columns(row, 1)?;
            Ok(AirportTatOverride { airport, policy })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_policy_row(row: &Row<'_>) -> rusqlite::Result<TurnaroundPolicy> {
    map_policy_columns(row, 0)
}

/// 从 offset 起依序读取策略列
fn map_policy_columns(row: &Row<'_>, offset: usize) -> rusqlite::Result<TurnaroundPolicy> {
    let tier_overrides_raw: Option<String> = row.get(offset + 4)?;
    let tier_overrides: HashMap<RouteTier, i64> = match tier_overrides_raw {
        Some(raw) if !raw.is_empty() => serde_json::from_str(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        _ => HashMap::new(),
    };

    Ok(TurnaroundPolicy {
        aircraft_type: row.get(offset)?,
        scheduled_tat_min: row.get(offset + 1)?,
        min_tat_min: row.get(offset + 2)?,
        hard_floor_min: row.get(offset + 3)?,
        tier_overrides,
    })
}
