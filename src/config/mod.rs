// ==========================================
// 航班尾号分配系统 - 配置层
// ==========================================
// 职责: 系统配置的加载与覆写
// ==========================================

pub mod config_manager;

pub use config_manager::{ConfigManager, SolverConfig};
