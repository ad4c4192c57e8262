// ==========================================
// 航班尾号分配系统 - 计划上下文
// ==========================================
// 职责: 显式承载请求级租户信息
// 约束: 作为参数沿管线传递, 不从进程级状态解析,
//       保证引擎纯函数性与可独立测试性
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PlanningContext - 计划上下文
// ==========================================
/// 一次管线调用的运营人上下文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningContext {
    /// 当前运营人 id
    pub operator_id: String,
}

impl PlanningContext {
    pub fn new(operator_id: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
        }
    }
}
