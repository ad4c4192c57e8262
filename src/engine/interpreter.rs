// ==========================================
// 航班尾号分配系统 - 求解结果解读引擎
// ==========================================
// 职责: 对求解结果做数据完整性清洗并派生展示视图
// 红线: 响应中引用未知航班 id 记为非致命的数据完整性
//       告警 (忽略该 id), 绝不因此失败 —— 响应是这条
//       边界上更权威的一侧
// ==========================================

use crate::domain::solve::{AssignmentRequest, AssignmentResult, ChainBreak};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{instrument, warn};

// ==========================================
// InterpretedResult - 解读后的求解结果
// ==========================================
/// 清洗后的终态结果与派生视图
#[derive(Debug, Clone)]
pub struct InterpretedResult {
    /// 清洗后的结果 (assignments/overflow/chain_breaks 仅含请求内 id)
    pub result: AssignmentResult,
    /// 反向视图: 注册号 → 按离港时刻排序的航班 id 列表
    pub by_registration: BTreeMap<String, Vec<String>>,
    /// 断链索引: 航班 id → 断链记录
    pub chain_break_index: HashMap<String, ChainBreak>,
    /// 溢出航班数
    pub overflow_count: usize,
    /// 数据完整性告警 (未知 id / 重复归属), 供展示层呈现
    pub integrity_warnings: Vec<String>,
}

// ==========================================
// ResultInterpreter - 求解结果解读引擎
// ==========================================
pub struct ResultInterpreter;

impl Default for ResultInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// 解读一次求解的原始结果
    ///
    /// 清洗规则:
    /// - assignments/overflow/chain_breaks 中不属于请求航班集合的
    ///   id 记告警后剔除
    /// - 同一 id 既有分配又在溢出中时保留分配、剔除溢出 (记告警)
    #[instrument(skip(self, request, raw), fields(request_id = %request.request_id))]
    pub fn interpret(
        &self,
        request: &AssignmentRequest,
        raw: AssignmentResult,
    ) -> InterpretedResult {
        let known: HashSet<&str> = request
            .flights
            .iter()
            .map(|f| f.flight_id.as_str())
            .collect();
        let dep_times: HashMap<&str, chrono::NaiveDateTime> = request
            .flights
            .iter()
            .map(|f| (f.flight_id.as_str(), f.dep_time))
            .collect();

        let mut warnings = Vec::new();
        let mut result = raw;

        // 1. 分配映射清洗
        let mut assignments = HashMap::new();
        for (flight_id, registration) in result.assignments.drain() {
            if known.contains(flight_id.as_str()) {
                assignments.insert(flight_id, registration);
            } else {
                let msg = format!("求解响应引用未知航班 id (assignments): {}", flight_id);
                warn!(flight_id = %flight_id, "数据完整性告警: 分配映射引用未知航班 id");
                warnings.push(msg);
            }
        }
        result.assignments = assignments;

        // 2. 溢出列表清洗 (未知 id / 与分配冲突)
        let mut overflow = Vec::new();
        for flight_id in result.overflow.drain(..) {
            if !known.contains(flight_id.as_str()) {
                let msg = format!("求解响应引用未知航班 id (overflow): {}", flight_id);
                warn!(flight_id = %flight_id, "数据完整性告警: 溢出列表引用未知航班 id");
                warnings.push(msg);
            } else if result.assignments.contains_key(&flight_id) {
                let msg = format!("航班 {} 同时出现在分配与溢出中, 保留分配", flight_id);
                warn!(flight_id = %flight_id, "数据完整性告警: 分配与溢出冲突");
                warnings.push(msg);
            } else {
                overflow.push(flight_id);
            }
        }
        result.overflow = overflow;

        // 3. 断链索引 (剔除未知 id)
        let mut chain_breaks = Vec::new();
        let mut chain_break_index = HashMap::new();
        for cb in result.chain_breaks.drain(..) {
            if known.contains(cb.flight_id.as_str()) {
                chain_break_index.insert(cb.flight_id.clone(), cb.clone());
                chain_breaks.push(cb);
            } else {
                let msg = format!("求解响应引用未知航班 id (chainBreaks): {}", cb.flight_id);
                warn!(flight_id = %cb.flight_id, "数据完整性告警: 断链记录引用未知航班 id");
                warnings.push(msg);
            }
        }
        result.chain_breaks = chain_breaks;

        // 4. 反向视图: 注册号 → 航班 id, 按离港时刻排序
        let mut by_registration: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (flight_id, registration) in &result.assignments {
            by_registration
                .entry(registration.clone())
                .or_default()
                .push(flight_id.clone());
        }
        for flights in by_registration.values_mut() {
            flights.sort_by_key(|id| (dep_times.get(id.as_str()).copied(), id.clone()));
        }

        let overflow_count = result.overflow.len();

        InterpretedResult {
            result,
            by_registration,
            chain_break_index,
            overflow_count,
            integrity_warnings: warnings,
        }
    }
}
