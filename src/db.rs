// ==========================================
// 航班尾号分配系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout, 减少并发写入时的偶发 busy 错误
// - 提供内聚的建表入口 (init_schema)
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout (毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 默认数据库路径: {用户数据目录}/tail-assignment-aps/planning.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tail-assignment-aps")
        .join("planning.db")
}

/// 初始化全部业务表 (幂等, CREATE TABLE IF NOT EXISTS)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS flight_number_template (
            template_id        TEXT PRIMARY KEY,
            season_id          TEXT NOT NULL,
            flight_no          TEXT NOT NULL,
            dep_station        TEXT NOT NULL,
            arr_station        TEXT NOT NULL,
            std_local          TEXT NOT NULL,
            sta_local          TEXT NOT NULL,
            block_minutes      INTEGER NOT NULL,
            weekly_pattern     TEXT NOT NULL,
            aircraft_type      TEXT NOT NULL,
            service_type       TEXT NOT NULL,
            effective_from     TEXT,
            effective_until    TEXT,
            arrival_day_offset INTEGER NOT NULL DEFAULT 0,
            status             TEXT NOT NULL,
            excluded_dates     TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS season (
            season_id  TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS aircraft_unit (
            registration  TEXT PRIMARY KEY,
            fleet_index   INTEGER NOT NULL,
            aircraft_type TEXT NOT NULL,
            family        TEXT
        );

        CREATE TABLE IF NOT EXISTS tat_policy (
            aircraft_type     TEXT PRIMARY KEY,
            scheduled_tat_min INTEGER NOT NULL,
            min_tat_min       INTEGER,
            hard_floor_min    INTEGER,
            tier_overrides    TEXT
        );

        CREATE TABLE IF NOT EXISTS tat_airport_override (
            airport           TEXT NOT NULL,
            aircraft_type     TEXT NOT NULL,
            scheduled_tat_min INTEGER NOT NULL,
            min_tat_min       INTEGER,
            hard_floor_min    INTEGER,
            tier_overrides    TEXT,
            PRIMARY KEY (airport, aircraft_type)
        );

        CREATE TABLE IF NOT EXISTS airport (
            code         TEXT PRIMARY KEY,
            country_code TEXT NOT NULL,
            is_domestic  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS tail_assignment (
            flight_id    TEXT PRIMARY KEY,
            flight_date  TEXT NOT NULL,
            registration TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tail_assignment_date
            ON tail_assignment (flight_date);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}
