// ==========================================
// 航班尾号分配系统 - 机场仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 用途: 航线性质判定所需的国内/国际属性查询
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// 机场记录
#[derive(Debug, Clone)]
pub struct AirportRecord {
    /// IATA 三字码
    pub code: String,
    /// 国家两字码
    pub country_code: String,
    /// 是否国内机场 (以运营人注册国为基准)
    pub is_domestic: bool,
}

// ==========================================
// AirportRepository - 机场仓储
// ==========================================
/// 管理 airport 表
pub struct AirportRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AirportRepository {
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

    /// 插入或替换机场
    pub fn upsert(&self, airport: &AirportRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO airport (code, country_code, is_domestic)
            VALUES (?1, ?2, ?3)
            "#,
            params![airport.code, airport.country_code, airport.is_domestic as i64],
        )?;
        Ok(())
    }

    /// 读取全部国内机场三字码 (展开上下文装配用)
    pub fn load_domestic_stations(&self) -> RepositoryResult<HashSet<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT code FROM airport WHERE is_domestic = 1")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut stations = HashSet::new();
        for code in rows {
            stations.insert(code?);
        }
        Ok(stations)
    }

    /// 按三字码查询机场
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<AirportRecord>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT code, country_code, is_domestic FROM airport WHERE code = ?1")?;

        let result = stmt.query_row(params![code], |row| {
            Ok(AirportRecord {
                code: row.get(0)?,
                country_code: row.get(1)?,
                is_domestic: row.get::<_, i64>(2)? != 0,
            })
        });
        match result {
            Ok(airport) => Ok(Some(airport)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
