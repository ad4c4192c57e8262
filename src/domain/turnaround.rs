// ==========================================
// 航班尾号分配系统 - 过站时间策略
// ==========================================
// 职责: 定义机型过站时间 (TAT) 策略实体
// 口径: scheduled = 计划过站, min = 软约束下限,
//       hard_floor = 硬下限 (低于即不可衔接)
// ==========================================

use crate::domain::types::RouteTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// TurnaroundPolicy - 机型过站时间策略
// ==========================================
/// 一个机型 (或机场+机型覆盖) 的过站时间策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnaroundPolicy {
    /// 机型代码
    pub aircraft_type: String,
    /// 计划过站时间 (分钟)
    pub scheduled_tat_min: i64,
    /// 软约束最小过站 (分钟), None 时回退为 scheduled
    pub min_tat_min: Option<i64>,
    /// 硬下限 (分钟), None 时回退为 min
    pub hard_floor_min: Option<i64>,
    /// 分航段组合的计划过站覆盖 (国内-国内/国内-国际/...)
    #[serde(default)]
    pub tier_overrides: HashMap<RouteTier, i64>,
}

impl TurnaroundPolicy {
    pub fn new(aircraft_type: impl Into<String>, scheduled_tat_min: i64) -> Self {
        Self {
            aircraft_type: aircraft_type.into(),
            scheduled_tat_min,
            min_tat_min: None,
            hard_floor_min: None,
            tier_overrides: HashMap::new(),
        }
    }

    pub fn with_min(mut self, min_tat_min: i64) -> Self {
        self.min_tat_min = Some(min_tat_min);
        self
    }

    pub fn with_hard_floor(mut self, hard_floor_min: i64) -> Self {
        self.hard_floor_min = Some(hard_floor_min);
        self
    }

    pub fn with_tier_override(mut self, tier: RouteTier, scheduled_min: i64) -> Self {
        self.tier_overrides.insert(tier, scheduled_min);
        self
    }
}

// ==========================================
// ResolvedTurnaround - 解析后的过站时间
// ==========================================
/// 经过回退链与缺省规则补齐后的三档过站时间 (分钟)
///
/// 不变式: hard_floor <= minimum <= scheduled 不强制成立
/// (配置可自行给出更紧的 scheduled), 但缺省补齐保证三档均有值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTurnaround {
    pub scheduled: i64,
    pub minimum: i64,
    pub hard_floor: i64,
}

// ==========================================
// AirportTatOverride - 机场级过站覆盖
// ==========================================
/// 某机场 + 机型的过站时间覆盖 (解析优先级最高)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportTatOverride {
    pub airport: String,
    pub policy: TurnaroundPolicy,
}
