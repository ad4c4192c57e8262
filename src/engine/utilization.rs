// ==========================================
// 航班尾号分配系统 - 利用率汇总引擎
// ==========================================
// 职责: 复用日历展开引擎, 将展开实例与外部提供的尾号
//       分配逐日关联, 汇总每注册号的轮挡分钟与航段数
// 红线: 报表以机尾为中心 —— 当日无分配注册号的实例
//       不计入; 输出按 (注册号, 日期) 排序
// ==========================================

use crate::domain::context::PlanningContext;
use crate::domain::template::FlightNumberTemplate;
use crate::domain::utilization::UtilizationRow;
use crate::engine::calendar::{CalendarExpansionEngine, ExpansionContext};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

// ==========================================
// TailAssignmentSource - 外部尾号分配来源
// ==========================================
/// 外部提供的 航班实例 → 注册号 查询接口
///
/// 分配数据来自核心之外 (已确认的求解结果、运行控制系统等),
/// 汇总引擎只做关联, 不关心其来历。
pub trait TailAssignmentSource {
    /// 查询某实例在某执行日的注册号, None 表示当日未分配
    fn registration_for(&self, flight_id: &str, date: NaiveDate) -> Option<String>;
}

/// 以实例 id 为键的内存映射即是最简单的分配来源
impl TailAssignmentSource for HashMap<String, String> {
    fn registration_for(&self, flight_id: &str, _date: NaiveDate) -> Option<String> {
        self.get(flight_id).cloned()
    }
}

// ==========================================
// UtilizationAggregator - 利用率汇总引擎
// ==========================================
pub struct UtilizationAggregator {
    expansion: CalendarExpansionEngine,
}

impl Default for UtilizationAggregator {
    fn default() -> Self {
        Self::new(CalendarExpansionEngine::new())
    }
}

impl UtilizationAggregator {
    pub fn new(expansion: CalendarExpansionEngine) -> Self {
        Self { expansion }
    }

    /// 在报表区间 [from, to] 上汇总机尾日利用率
    ///
    /// 分组键: (注册号, 机型, 日期); 同组内轮挡分钟求和,
    /// 航段计数。输出按 注册号 → 日期 → 机型 排序。
    #[instrument(skip_all, fields(operator = %ctx.operator_id, templates = templates.len()))]
    pub fn aggregate(
        &self,
        ctx: &PlanningContext,
        templates: &[FlightNumberTemplate],
        ectx: &ExpansionContext,
        from: NaiveDate,
        to: NaiveDate,
        assignment: &dyn TailAssignmentSource,
    ) -> Vec<UtilizationRow> {
        let instances = self.expansion.expand(templates, ectx, from, to);

        // BTreeMap 键序即输出序: 注册号 → 日期 → 机型
        let mut groups: BTreeMap<(String, NaiveDate, String), (i64, i64)> = BTreeMap::new();

        for instance in &instances {
            let date = instance.flight_date();
            let Some(registration) = assignment.registration_for(&instance.flight_id, date)
            else {
                // 当日未分配注册号, 不计入报表
                continue;
            };

            let entry = groups
                .entry((registration, date, instance.aircraft_type.clone()))
                .or_insert((0, 0));
            entry.0 += instance.block_minutes;
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(
                |((registration, date, aircraft_type), (block_minutes, sector_count))| {
                    UtilizationRow {
                        registration,
                        aircraft_type,
                        date,
                        block_minutes,
                        sector_count,
                    }
                },
            )
            .collect()
    }
}
