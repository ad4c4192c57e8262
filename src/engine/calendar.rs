// ==========================================
// 航班尾号分配系统 - 日历展开引擎
// ==========================================
// 职责: 将周期性航班号模板在日期范围内展开为具体
//       日期的航班实例
// 红线: 纯函数, 无隐藏状态, 相同输入必得相同输出,
//       输出按 (日期, 航班号) 稳定排序
// ==========================================

use crate::domain::flight::ScheduledFlightInstance;
use crate::domain::template::{FlightNumberTemplate, ScheduleSeason};
use crate::domain::types::{RouteKind, TemplateStatus};
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet};
use tracing::instrument;

// ==========================================
// ExpansionContext - 展开上下文
// ==========================================
/// 展开所需的只读参考数据, 由调用方 (api 层) 从各
/// 协作仓储装配, 引擎本身不做任何 I/O
#[derive(Debug, Clone, Default)]
pub struct ExpansionContext {
    /// 航季 id → 航季边界; 缺失时该模板不受航季边界约束
    pub seasons: HashMap<String, ScheduleSeason>,
    /// 国内机场三字码集合, 用于航线性质判定
    pub domestic_stations: HashSet<String>,
    /// 人工锁定: 航班实例 id → 注册号 (硬约束)
    pub pins: HashMap<String, String>,
}

impl ExpansionContext {
    /// 依据起降两端机场判定航线性质
    pub fn classify_route(&self, dep_station: &str, arr_station: &str) -> RouteKind {
        if self.domestic_stations.contains(dep_station)
            && self.domestic_stations.contains(arr_station)
        {
            RouteKind::Domestic
        } else {
            RouteKind::International
        }
    }
}

// ==========================================
// CalendarExpansionEngine - 日历展开引擎
// ==========================================
/// 模板 → 日期化航班实例的展开引擎
///
/// 展开条件 (对候选日期 d 与模板 t, 全部满足才产出实例):
/// 1. d 落在 t 生效窗口与所属航季边界的交集内
/// 2. d 不在 t 的排除日期列表中
/// 3. t.status 属于允许状态集合 (缺省 {Draft, Ready, Published})
/// 4. d 的 ISO 周几在周班期模式中为执行日
pub struct CalendarExpansionEngine {
    allowed_statuses: HashSet<TemplateStatus>,
}

impl Default for CalendarExpansionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarExpansionEngine {
    /// 使用缺省允许状态集合 {Draft, Ready, Published} 创建引擎
    pub fn new() -> Self {
        Self {
            allowed_statuses: [
                TemplateStatus::Draft,
                TemplateStatus::Ready,
                TemplateStatus::Published,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// 使用调用方指定的允许状态集合创建引擎
    pub fn with_allowed_statuses(allowed_statuses: HashSet<TemplateStatus>) -> Self {
        Self { allowed_statuses }
    }

    /// 在闭区间 [from, to] 上展开模板集合
    ///
    /// 输出按 (执行日期, 航班号, 实例 id) 排序, 重复调用
    /// 产生逐字节一致的序列。
    #[instrument(skip(self, templates, ctx), fields(templates = templates.len()))]
    pub fn expand(
        &self,
        templates: &[FlightNumberTemplate],
        ctx: &ExpansionContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<ScheduledFlightInstance> {
        let mut instances = Vec::new();

        for template in templates {
            if !self.allowed_statuses.contains(&template.status) {
                continue;
            }

            let season = ctx.seasons.get(&template.season_id);

            let mut date = from;
            while date <= to {
                if self.emits_on(template, season, date) {
                    instances.push(self.project(template, ctx, date));
                }
                date += Duration::days(1);
            }
        }

        instances.sort_by(|a, b| {
            (a.flight_date(), &a.flight_no, &a.flight_id)
                .cmp(&(b.flight_date(), &b.flight_no, &b.flight_id))
        });
        instances
    }

    /// 判定模板在某日期是否产出实例 (状态已在外层过滤)
    fn emits_on(
        &self,
        template: &FlightNumberTemplate,
        season: Option<&ScheduleSeason>,
        date: NaiveDate,
    ) -> bool {
        if !template.effective_on(date) {
            return false;
        }
        if let Some(season) = season {
            if !season.contains(date) {
                return false;
            }
        }
        if template.is_excluded(date) {
            return false;
        }
        template.weekly_pattern.is_active_on(date)
    }

    /// 将模板投影为某执行日的航班实例
    fn project(
        &self,
        template: &FlightNumberTemplate,
        ctx: &ExpansionContext,
        date: NaiveDate,
    ) -> ScheduledFlightInstance {
        let flight_id = ScheduledFlightInstance::make_flight_id(&template.flight_no, date);
        let arr_date = date + Duration::days(template.arrival_day_offset);
        let pinned_registration = ctx.pins.get(&flight_id).cloned();

        ScheduledFlightInstance {
            flight_id,
            flight_no: template.flight_no.clone(),
            dep_station: template.dep_station.clone(),
            arr_station: template.arr_station.clone(),
            dep_time: date.and_time(template.std_local),
            arr_time: arr_date.and_time(template.sta_local),
            block_minutes: template.block_minutes,
            aircraft_type: template.aircraft_type.clone(),
            pinned: pinned_registration.is_some(),
            pinned_registration,
            route_kind: ctx.classify_route(&template.dep_station, &template.arr_station),
        }
    }
}
