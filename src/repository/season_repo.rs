// ==========================================
// 航班尾号分配系统 - 航季元数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::template::ScheduleSeason;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// SeasonRepository - 航季仓储
// ==========================================
/// 管理 season 表
pub struct SeasonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SeasonRepository {
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

    /// 插入或替换航季
    pub fn upsert(&self, season: &ScheduleSeason) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO season (season_id, name, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                season.season_id,
                season.name,
                season.start_date.to_string(),
                season.end_date.to_string(),
            ],
        )?;
        Ok(())
    }

    /// 按主键查询航季
    pub fn find_by_id(&self, season_id: &str) -> RepositoryResult<Option<ScheduleSeason>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT season_id, name, start_date, end_date FROM season WHERE season_id = ?1",
        )?;

        let result = stmt.query_row(params![season_id], map_row);
        match result {
            Ok(season) => Ok(Some(season)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 读取全部航季, 以 season_id 为键 (展开上下文装配用)
    pub fn load_all(&self) -> RepositoryResult<HashMap<String, ScheduleSeason>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT season_id, name, start_date, end_date FROM season")?;

        let rows = stmt.query_map([], map_row)?;
        let mut seasons = HashMap::new();
        for season in rows {
            let season = season?;
            seasons.insert(season.season_id.clone(), season);
        }
        Ok(seasons)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ScheduleSeason> {
    let start: String = row.get(2)?;
    let end: String = row.get(3)?;
    Ok(ScheduleSeason {
        season_id: row.get(0)?,
        name: row.get(1)?,
        start_date: parse_date(2, &start)?,
        end_date: parse_date(3, &end)?,
    })
}

fn parse_date(column: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}
