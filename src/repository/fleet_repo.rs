// ==========================================
// 航班尾号分配系统 - 机队仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::fleet::AircraftUnit;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// AircraftRepository - 机队仓储
// ==========================================
/// 管理 aircraft_unit 表 (机队花名册)
pub struct AircraftRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AircraftRepository {
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

    /// 插入或替换飞机 (以注册号为主键)
    pub fn upsert(&self, unit: &AircraftUnit) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO aircraft_unit (registration, fleet_index, aircraft_type, family)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                unit.registration,
                unit.fleet_index,
                unit.aircraft_type,
                unit.family,
            ],
        )?;
        Ok(())
    }

    /// 批量插入机队 (事务原子性)
    pub fn batch_upsert(&self, units: &[AircraftUnit]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for unit in units {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO aircraft_unit (registration, fleet_index, aircraft_type, family)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    unit.registration,
                    unit.fleet_index,
                    unit.aircraft_type,
                    unit.family,
                ],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 读取全部机队 (按机队序号排序)
    pub fn list_all(&self) -> RepositoryResult<Vec<AircraftUnit>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT registration, fleet_index, aircraft_type, family
             FROM aircraft_unit ORDER BY fleet_index",
        )?;

        let rows = stmt.query_map([], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按注册号查询
    pub fn find_by_registration(
        &self,
        registration: &str,
    ) -> RepositoryResult<Option<AircraftUnit>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT registration, fleet_index, aircraft_type, family
             FROM aircraft_unit WHERE registration = ?1",
        )?;

        let result = stmt.query_row(params![registration], map_row);
        match result {
            Ok(unit) => Ok(Some(unit)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<AircraftUnit> {
    Ok(AircraftUnit {
        registration: row.get(0)?,
        fleet_index: row.get(1)?,
        aircraft_type: row.get(2)?,
        family: row.get(3)?,
    })
}
