// ==========================================
// 航班尾号分配系统 - 尾号分配仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 用途: 求解成功后落库已接受的分配, 供利用率报表关联
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// TailAssignmentRepository - 尾号分配仓储
// ==========================================
/// 管理 tail_assignment 表 (航班实例 id → 注册号)
pub struct TailAssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TailAssignmentRepository {
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

    /// 批量写入分配记录 (事务原子性, 覆盖同 id 旧记录)
    ///
    /// # 参数
    /// - assignments: 航班实例 id → 注册号
    /// - dates: 航班实例 id → 执行日期
    pub fn save_assignments(
        &self,
        assignments: &HashMap<String, String>,
        dates: &HashMap<String, NaiveDate>,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (flight_id, registration) in assignments {
            let flight_date = dates.get(flight_id).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "flight_date".to_string(),
                    message: format!("航班 {} 缺少执行日期", flight_id),
                }
            })?;

            tx.execute(
                r#"
                INSERT OR REPLACE INTO tail_assignment (flight_id, flight_date, registration)
                VALUES (?1, ?2, ?3)
                "#,
                params![flight_id, flight_date.to_string(), registration],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 读取某日期区间内的全部分配 (航班实例 id → 注册号)
    pub fn load_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<HashMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT flight_id, registration FROM tail_assignment
             WHERE flight_date >= ?1 AND flight_date <= ?2",
        )?;

        let rows = stmt.query_map(params![from.to_string(), to.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut assignments = HashMap::new();
        for row in rows {
            let (flight_id, registration) = row?;
            assignments.insert(flight_id, registration);
        }
        Ok(assignments)
    }

    /// 按实例 id 查询注册号
    pub fn find_registration(&self, flight_id: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT registration FROM tail_assignment WHERE flight_id = ?1",
            params![flight_id],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(registration) => Ok(Some(registration)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
