// ==========================================
// 航班尾号分配系统 - 过站时间解析引擎
// ==========================================
// 职责: 按 机场+机型覆盖 → 机型缺省 → 全局缺省 的
//       回退链解析过站时间, 并补齐缺省档位
// 红线: 纯函数, 不做 I/O; 回退链全部落空即无解析结果,
//       缺口由请求构建器在网络调用前拒绝
// ==========================================

use crate::domain::turnaround::{ResolvedTurnaround, TurnaroundPolicy};
use crate::domain::types::RouteTier;
use std::collections::HashMap;

// ==========================================
// TatMaps - 三档并行过站时间映射
// ==========================================
/// 求解请求所需的三个按机型键控的过站时间映射 (分钟)
#[derive(Debug, Clone, Default)]
pub struct TatMaps {
    pub scheduled: HashMap<String, i64>,
    pub minimum: HashMap<String, i64>,
    pub hard_floor: HashMap<String, i64>,
}

// ==========================================
// TurnaroundPolicyResolver - 过站时间解析引擎
// ==========================================
/// 过站时间解析器
///
/// 解析顺序: 机场+机型覆盖 → 机型缺省 → 全局缺省 (可选配置);
/// 命中策略后若带有分航段组合覆盖, 以覆盖值替换计划过站。
/// 缺省补齐: min 未配置 → 取 scheduled; hard_floor 未配置 → 取 min。
pub struct TurnaroundPolicyResolver {
    /// 全局兜底策略 (可选, 未配置时回退链可落空)
    global_default: Option<TurnaroundPolicy>,
    /// 机型 → 机型级缺省策略
    type_policies: HashMap<String, TurnaroundPolicy>,
    /// (机场, 机型) → 机场级覆盖策略
    airport_overrides: HashMap<(String, String), TurnaroundPolicy>,
}

impl Default for TurnaroundPolicyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnaroundPolicyResolver {
    pub fn new() -> Self {
        Self {
            global_default: None,
            type_policies: HashMap::new(),
            airport_overrides: HashMap::new(),
        }
    }

    /// 设置全局兜底策略
    pub fn with_global_default(mut self, policy: TurnaroundPolicy) -> Self {
        self.global_default = Some(policy);
        self
    }

    /// 注册机型级缺省策略
    pub fn with_type_policy(mut self, policy: TurnaroundPolicy) -> Self {
        self.type_policies
            .insert(policy.aircraft_type.clone(), policy);
        self
    }

    /// 注册机场级覆盖策略
    pub fn with_airport_override(
        mut self,
        airport: impl Into<String>,
        policy: TurnaroundPolicy,
    ) -> Self {
        self.airport_overrides
            .insert((airport.into(), policy.aircraft_type.clone()), policy);
        self
    }

    /// 解析某机型在某航段组合/机场下的三档过站时间
    ///
    /// # 参数
    /// - aircraft_type: 机型代码
    /// - tier: 进离港航段组合, None 表示取基础计划过站
    /// - airport: 过站机场, None 表示不启用机场级覆盖
    ///
    /// # 返回
    /// - None: 回退链全部落空 (该机型无任何策略且无全局缺省)
    pub fn resolve(
        &self,
        aircraft_type: &str,
        tier: Option<RouteTier>,
        airport: Option<&str>,
    ) -> Option<ResolvedTurnaround> {
        let policy = self.lookup_policy(aircraft_type, airport)?;

        let mut scheduled = policy.scheduled_tat_min;
        if let Some(tier) = tier {
            if let Some(over) = policy.tier_overrides.get(&tier) {
                scheduled = *over;
            }
        }

        // 缺省补齐: min ← scheduled, hard_floor ← min
        let minimum = policy.min_tat_min.unwrap_or(scheduled);
        let hard_floor = policy.hard_floor_min.unwrap_or(minimum);

        Some(ResolvedTurnaround {
            scheduled,
            minimum,
            hard_floor,
        })
    }

    /// 回退链: 机场+机型覆盖 → 机型缺省 → 全局缺省
    fn lookup_policy(
        &self,
        aircraft_type: &str,
        airport: Option<&str>,
    ) -> Option<&TurnaroundPolicy> {
        if let Some(airport) = airport {
            let key = (airport.to_string(), aircraft_type.to_string());
            if let Some(policy) = self.airport_overrides.get(&key) {
                return Some(policy);
            }
        }
        self.type_policies
            .get(aircraft_type)
            .or(self.global_default.as_ref())
    }

    /// 为一组机型构建三档并行过站时间映射 (基础解析,
    /// 不带机场/航段覆盖)
    ///
    /// 回退链落空的机型不会出现在映射中 —— 该缺口由
    /// AssignmentRequestBuilder 的覆盖校验在网络调用前拒绝。
    pub fn tat_maps<'a, I>(&self, aircraft_types: I) -> TatMaps
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut maps = TatMaps::default();
        for aircraft_type in aircraft_types {
            let Some(resolved) = self.resolve(aircraft_type, None, None) else {
                continue;
            };
            maps.scheduled
                .insert(aircraft_type.to_string(), resolved.scheduled);
            maps.minimum
                .insert(aircraft_type.to_string(), resolved.minimum);
            maps.hard_floor
                .insert(aircraft_type.to_string(), resolved.hard_floor);
        }
        maps
    }
}
