// ==========================================
// 航班尾号分配系统 - 求解请求/结果实体
// ==========================================
// 职责: 定义与外部尾号分配求解服务的线上契约
// 约定: JSON 字段 camelCase, 与求解服务接口一致
// ==========================================

use crate::domain::fleet::AircraftUnit;
use crate::domain::flight::ScheduledFlightInstance;
use crate::domain::types::{ChainContinuity, SolveStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// CostWeights - 目标函数代价权重
// ==========================================
/// 求解目标函数的四项代价权重
///
/// 量级约定: overflow >> chain_break >> tight/soft 罚项,
/// 保证"排不上"永远比"断链"昂贵。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostWeights {
    /// 断链代价 (同机相邻航班站点不衔接)
    pub chain_break_cost: f64,
    /// 溢出代价 (航班无法分配任何飞机)
    pub overflow_cost: f64,
    /// 紧过站罚项 (低于软约束下限但高于硬下限)
    pub tight_tat_penalty: f64,
    /// 软过站罚项 (低于计划过站但高于软约束下限)
    pub soft_tat_penalty: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            chain_break_cost: 1_000.0,
            overflow_cost: 10_000.0,
            tight_tat_penalty: 50.0,
            soft_tat_penalty: 10.0,
        }
    }
}

// ==========================================
// AssignmentRequest - 尾号分配求解请求
// ==========================================
/// 一次求解调用的完整输入, 构建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    /// 请求 id (uuid), 用于日志串联
    pub request_id: String,
    /// 发起请求的运营人 id (显式上下文, 不从环境读取)
    pub operator_id: String,
    /// 待分配航班实例
    pub flights: Vec<ScheduledFlightInstance>,
    /// 机队
    pub aircraft: Vec<AircraftUnit>,
    /// 机型 → 计划过站 (分钟)
    pub scheduled_tat: HashMap<String, i64>,
    /// 机型 → 软约束最小过站 (分钟)
    pub min_tat: HashMap<String, i64>,
    /// 机型 → 硬下限 (分钟)
    pub hard_floor_tat: HashMap<String, i64>,
    /// 机型 → 机族 (机型替代映射)
    pub family_map: HashMap<String, String>,
    /// 代价权重
    pub cost_weights: CostWeights,
    /// 求解服务自身的时间预算 (秒)
    pub time_budget_secs: u64,
    /// 可接受最优间隙 (0.01 = 1%)
    pub optimality_gap: f64,
    /// 链条连续性模式
    pub chain_continuity: ChainContinuity,
}

impl AssignmentRequest {
    /// 请求内全部航班 id (保持输入顺序)
    pub fn flight_ids(&self) -> Vec<String> {
        self.flights.iter().map(|f| f.flight_id.clone()).collect()
    }
}

// ==========================================
// ChainBreak - 断链记录
// ==========================================
/// 同一飞机相邻两个航班之间的衔接断点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBreak {
    /// 断点后一个航班的实例 id
    pub flight_id: String,
    /// 前序航班的到达站
    pub prev_arr: String,
    /// 后续航班的起飞站
    pub next_dep: String,
}

// ==========================================
// AssignmentResult - 尾号分配求解结果
// ==========================================
/// 一次求解调用的终态结果
///
/// 除 status 外所有字段带缺省, 允许求解服务按需省略;
/// 本地合成的 Error 结果把 overflow 置为全部输入航班。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    /// 求解终态
    pub status: SolveStatus,
    /// 航班 id → 注册号
    #[serde(default)]
    pub assignments: HashMap<String, String>,
    /// 未能分配的航班 id
    #[serde(default)]
    pub overflow: Vec<String>,
    /// 断链列表
    #[serde(default)]
    pub chain_breaks: Vec<ChainBreak>,
    /// 目标函数值
    #[serde(default)]
    pub objective: f64,
    /// 模型变量数
    #[serde(default)]
    pub variable_count: i64,
    /// 模型约束数
    #[serde(default)]
    pub constraint_count: i64,
    /// 求解耗时 (毫秒)
    #[serde(default)]
    pub elapsed_ms: i64,
    /// 附加说明 (失败原因等)
    #[serde(default)]
    pub message: Option<String>,
}

impl AssignmentResult {
    /// 空窗口的即时最优结果 (零航班, 零耗时, 不发起网络调用)
    pub fn optimal_empty() -> Self {
        Self {
            status: SolveStatus::Optimal,
            assignments: HashMap::new(),
            overflow: Vec::new(),
            chain_breaks: Vec::new(),
            objective: 0.0,
            variable_count: 0,
            constraint_count: 0,
            elapsed_ms: 0,
            message: None,
        }
    }

    /// 本地合成的失败终态: 全部航班进入 overflow, 无任何分配
    pub fn error_with_overflow(
        flight_ids: Vec<String>,
        elapsed_ms: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: SolveStatus::Error,
            assignments: HashMap::new(),
            overflow: flight_ids,
            chain_breaks: Vec::new(),
            objective: 0.0,
            variable_count: 0,
            constraint_count: 0,
            elapsed_ms,
            message: Some(message.into()),
        }
    }
}
