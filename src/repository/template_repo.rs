// ==========================================
// 航班尾号分配系统 - 航班号模板仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 只负责数据访问
// 约束: 所有查询参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::template::{FlightNumberTemplate, WeeklyPattern};
use crate::domain::types::TemplateStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// FlightTemplateRepository - 航班号模板仓储
// ==========================================
/// 管理 flight_number_template 表
///
/// 排除日期以 JSON 数组文本列存储 (与模板一对多且只整体读写)。
pub struct FlightTemplateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FlightTemplateRepository {
    /// 创建仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 插入或替换模板 (INSERT OR REPLACE 实现 upsert 语义)
    pub fn upsert(&self, template: &FlightNumberTemplate) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO flight_number_template (
                template_id, season_id, flight_no, dep_station, arr_station,
                std_local, sta_local, block_minutes, weekly_pattern,
                aircraft_type, service_type, effective_from, effective_until,
                arrival_day_offset, status, excluded_dates
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                template.template_id,
                template.season_id,
                template.flight_no,
                template.dep_station,
                template.arr_station,
                template.std_local.format("%H:%M").to_string(),
                template.sta_local.format("%H:%M").to_string(),
                template.block_minutes,
                template.weekly_pattern.to_pattern_string(),
                template.aircraft_type,
                template.service_type,
                template.effective_from.map(|d| d.to_string()),
                template.effective_until.map(|d| d.to_string()),
                template.arrival_day_offset,
                template.status.to_db_str(),
                serde_json::to_string(&template.excluded_dates)?,
            ],
        )?;
        Ok(())
    }

    /// 按主键查询模板
    pub fn find_by_id(&self, template_id: &str) -> RepositoryResult<Option<FlightNumberTemplate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE template_id = ?1",
            Self::SELECT_BASE
        ))?;

        let result = stmt.query_row(params![template_id], Self::map_row);
        match result {
            Ok(template) => Ok(Some(template)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询全部模板 (按航班号排序)
    pub fn list_all(&self) -> RepositoryResult<Vec<FlightNumberTemplate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY flight_no, template_id",
            Self::SELECT_BASE
        ))?;

        let rows = stmt.query_map([], Self::map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按航季查询模板
    pub fn list_by_season(&self, season_id: &str) -> RepositoryResult<Vec<FlightNumberTemplate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE season_id = ?1 ORDER BY flight_no, template_id",
            Self::SELECT_BASE
        ))?;

        let rows = stmt.query_map(params![season_id], Self::map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 删除模板
    pub fn delete(&self, template_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM flight_number_template WHERE template_id = ?1",
            params![template_id],
        )?;
        Ok(affected > 0)
    }

    const SELECT_BASE: &'static str = r#"
        SELECT
            template_id, season_id, flight_no, dep_station, arr_station,
            std_local, sta_local, block_minutes, weekly_pattern,
            aircraft_type, service_type, effective_from, effective_until,
            arrival_day_offset, status, excluded_dates
        FROM flight_number_template
    "#;

    /// 行 → 实体映射
    fn map_row(row: &Row<'_>) -> rusqlite::Result<FlightNumberTemplate> {
        let std_local: String = row.get(5)?;
        let sta_local: String = row.get(6)?;
        let weekly_pattern: String = row.get(8)?;
        let excluded_dates: String = row.get(15)?;

        Ok(FlightNumberTemplate {
            template_id: row.get(0)?,
            season_id: row.get(1)?,
            flight_no: row.get(2)?,
            dep_station: row.get(3)?,
            arr_station: row.get(4)?,
            std_local: parse_time(5, &std_local)?,
            sta_local: parse_time(6, &sta_local)?,
            block_minutes: row.get(7)?,
            weekly_pattern: WeeklyPattern::parse(&weekly_pattern)
                .map_err(|e| to_column_error(8, e))?,
            aircraft_type: row.get(9)?,
            service_type: row.get(10)?,
            effective_from: row
                .get::<_, Option<String>>(11)?
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            effective_until: row
                .get::<_, Option<String>>(12)?
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            arrival_day_offset: row.get(13)?,
            status: TemplateStatus::from_str(&row.get::<_, String>(14)?),
            excluded_dates: serde_json::from_str(&excluded_dates)
                .map_err(|e| to_column_error(15, e))?,
        })
    }
}

/// "HH:MM" → NaiveTime, 解析失败映射为列类型错误
fn parse_time(column: usize, s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| to_column_error(column, e))
}

fn to_column_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(err),
    )
}
