// ==========================================
// 航班尾号分配系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::solve::CostWeights;
use crate::domain::types::ChainContinuity;
use crate::engine::request_builder::{DEFAULT_OPTIMALITY_GAP, DEFAULT_TIME_BUDGET_SECS};
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// SolverConfig - 求解相关配置快照
// ==========================================
/// 从 config_kv 读出的求解配置 (带编译期缺省)
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// 求解服务基地址; None 表示端点未配置
    pub base_url: Option<String>,
    /// 求解服务自身的时间预算 (秒)
    pub time_budget_secs: u64,
    /// 可接受最优间隙
    pub optimality_gap: f64,
    /// 链条连续性模式
    pub chain_continuity: ChainContinuity,
    /// 代价权重
    pub cost_weights: CostWeights,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            optimality_gap: DEFAULT_OPTIMALITY_GAP,
            chain_continuity: ChainContinuity::Strict,
            cost_weights: CostWeights::default(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明: 为保证连接行为一致, 会对传入连接再次应用统一 PRAGMA (幂等)。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值 (scope_id='global')
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值 (公开方法, 供其他模块复用)
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值 (upsert)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// 带类型解析的读取, 解析失败回退缺省值
    fn get_parsed_or<T: std::str::FromStr>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .and_then(|v| v.parse::<T>().ok())
            .unwrap_or(default))
    }

    /// 装配求解配置快照
    ///
    /// # 配置键
    /// - solver/base_url          求解服务基地址 (缺省: 未配置)
    /// - solver/time_budget_secs  服务端时间预算
    /// - solver/optimality_gap    可接受最优间隙
    /// - solver/chain_continuity  STRICT | FLEXIBLE
    /// - cost/chain_break         断链代价
    /// - cost/overflow            溢出代价
    /// - cost/tight_tat_penalty   紧过站罚项
    /// - cost/soft_tat_penalty    软过站罚项
    pub fn solver_config(&self) -> Result<SolverConfig, Box<dyn Error>> {
        let defaults = SolverConfig::default();
        let default_weights = defaults.cost_weights;

        Ok(SolverConfig {
            base_url: self.get_config_value("solver/base_url")?,
            time_budget_secs: self
                .get_parsed_or("solver/time_budget_secs", defaults.time_budget_secs)?,
            optimality_gap: self.get_parsed_or("solver/optimality_gap", defaults.optimality_gap)?,
            chain_continuity: self
                .get_config_value("solver/chain_continuity")?
                .map(|v| ChainContinuity::from_str(&v))
                .unwrap_or(defaults.chain_continuity),
            cost_weights: CostWeights {
                chain_break_cost: self
                    .get_parsed_or("cost/chain_break", default_weights.chain_break_cost)?,
                overflow_cost: self.get_parsed_or("cost/overflow", default_weights.overflow_cost)?,
                tight_tat_penalty: self
                    .get_parsed_or("cost/tight_tat_penalty", default_weights.tight_tat_penalty)?,
                soft_tat_penalty: self
                    .get_parsed_or("cost/soft_tat_penalty", default_weights.soft_tat_penalty)?,
            },
        })
    }
}
