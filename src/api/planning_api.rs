// ==========================================
// 航班尾号分配系统 - 排班 API
// ==========================================
// 职责: 编排 展开 → 过站解析 → 请求构建 → 求解网关 →
//       结果解读 的完整管线
// 红线: 求解失败不抛错 (以 ERROR 终态结果返回);
//       唯一向调用方抛出的拒绝是构建期配置错误
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::context::PlanningContext;
use crate::domain::flight::ScheduledFlightInstance;
use crate::domain::turnaround::TurnaroundPolicy;
use crate::engine::calendar::{CalendarExpansionEngine, ExpansionContext};
use crate::engine::interpreter::{InterpretedResult, ResultInterpreter};
use crate::engine::repositories::PlanningRepositories;
use crate::engine::request_builder::{AssignmentRequestBuilder, BuildOutcome};
use crate::engine::turnaround_resolver::TurnaroundPolicyResolver;
use crate::gateway::SolveService;
use crate::domain::types::SolveStatus;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{info, instrument};

/// 全局兜底过站时间的配置键 (分钟); 未配置时回退链可落空,
/// 由构建器的覆盖校验拒绝
const GLOBAL_DEFAULT_TAT_KEY: &str = "tat/global_default_min";

// ==========================================
// PlanningApi - 排班 API
// ==========================================
pub struct PlanningApi {
    repos: PlanningRepositories,
    config: Arc<ConfigManager>,
    solver: Arc<dyn SolveService>,
    expansion: CalendarExpansionEngine,
    interpreter: ResultInterpreter,
}

impl PlanningApi {
    pub fn new(
        repos: PlanningRepositories,
        config: Arc<ConfigManager>,
        solver: Arc<dyn SolveService>,
    ) -> Self {
        Self {
            repos,
            config,
            solver,
            expansion: CalendarExpansionEngine::new(),
            interpreter: ResultInterpreter::new(),
        }
    }

    /// 覆盖缺省展开引擎 (调整允许状态集合时使用)
    pub fn with_expansion_engine(mut self, expansion: CalendarExpansionEngine) -> Self {
        self.expansion = expansion;
        self
    }

    /// 从协作仓储装配展开上下文
    ///
    /// # 参数
    /// - pins: 人工锁定 (实例 id → 注册号), 无锁定传空映射
    pub fn expansion_context(
        &self,
        pins: HashMap<String, String>,
    ) -> ApiResult<ExpansionContext> {
        Ok(ExpansionContext {
            seasons: self.repos.season_repo.load_all()?,
            domestic_stations: self.repos.airport_repo.load_domestic_stations()?,
            pins,
        })
    }

    /// 展开窗口: (模板全集, 闭区间) → 日期化航班实例
    pub fn expand_window(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        pins: HashMap<String, String>,
    ) -> ApiResult<Vec<ScheduledFlightInstance>> {
        let templates = self.repos.template_repo.list_all()?;
        let ctx = self.expansion_context(pins)?;
        Ok(self.expansion.expand(&templates, &ctx, from, to))
    }

    /// 对一个日期窗口执行完整求解管线
    ///
    /// 展开 → 过站解析 → 构建校验 → 网关调用 → 结果解读;
    /// 终态为 Optimal/Feasible 时将分配落库供报表关联。
    #[instrument(skip(self, ctx, pins), fields(operator = %ctx.operator_id, %from, %to))]
    pub async fn solve_window(
        &self,
        ctx: &PlanningContext,
        from: NaiveDate,
        to: NaiveDate,
        pins: HashMap<String, String>,
    ) -> ApiResult<InterpretedResult> {
        let flights = self.expand_window(from, to, pins)?;
        self.solve(ctx, flights).await
    }

    /// 对外部已备好的实例列表执行求解管线 (不经过展开)
    pub async fn solve(
        &self,
        ctx: &PlanningContext,
        flights: Vec<ScheduledFlightInstance>,
    ) -> ApiResult<InterpretedResult> {
        let aircraft = self.repos.aircraft_repo.list_all()?;
        let solver_config = self
            .config
            .solver_config()
            .map_err(|e| ApiError::ConfigurationError(e.to_string()))?;

        // 过站解析器: 机型策略 + 机场覆盖, 全局兜底
        let resolver = self.build_resolver()?;
        let aircraft_types: BTreeSet<&str> = flights
            .iter()
            .map(|f| f.aircraft_type.as_str())
            .chain(aircraft.iter().map(|a| a.aircraft_type.as_str()))
            .collect();
        let tat_maps = resolver.tat_maps(aircraft_types.iter().copied());

        // 机型 → 机族替代映射取自机队花名册
        let family_map: HashMap<String, String> = aircraft
            .iter()
            .filter_map(|a| {
                a.family
                    .as_ref()
                    .map(|family| (a.aircraft_type.clone(), family.clone()))
            })
            .collect();

        let dates: HashMap<String, NaiveDate> = flights
            .iter()
            .map(|f| (f.flight_id.clone(), f.flight_date()))
            .collect();

        let outcome = AssignmentRequestBuilder::new(ctx.clone())
            .flights(flights)
            .aircraft(aircraft)
            .tat_maps(tat_maps)
            .family_map(family_map)
            .cost_weights(solver_config.cost_weights)
            .time_budget_secs(solver_config.time_budget_secs)
            .optimality_gap(solver_config.optimality_gap)
            .chain_continuity(solver_config.chain_continuity)
            .build()?;

        let interpreted = match outcome {
            BuildOutcome::Immediate(result) => {
                // 空窗口短路: 不发起网络调用
                info!("空航班窗口, 直接返回即时最优结果");
                InterpretedResult {
                    result,
                    by_registration: Default::default(),
                    chain_break_index: Default::default(),
                    overflow_count: 0,
                    integrity_warnings: Vec::new(),
                }
            }
            BuildOutcome::Request(request) => {
                let raw = self.solver.solve(&request).await;
                self.interpreter.interpret(&request, raw)
            }
        };

        // 已接受的分配落库 (报表关联用)
        if matches!(
            interpreted.result.status,
            SolveStatus::Optimal | SolveStatus::Feasible
        ) && !interpreted.result.assignments.is_empty()
        {
            let saved = self
                .repos
                .assignment_repo
                .save_assignments(&interpreted.result.assignments, &dates)?;
            info!(saved, "已落库尾号分配记录");
        }

        Ok(interpreted)
    }

    /// 从仓储与配置装配过站时间解析器
    fn build_resolver(&self) -> ApiResult<TurnaroundPolicyResolver> {
        let mut resolver = TurnaroundPolicyResolver::new();

        let global_default = self
            .config
            .get_global_config_value(GLOBAL_DEFAULT_TAT_KEY)
            .map_err(|e| ApiError::ConfigurationError(e.to_string()))?
            .and_then(|v| v.parse::<i64>().ok());
        if let Some(minutes) = global_default {
            resolver =
                resolver.with_global_default(TurnaroundPolicy::new("GLOBAL_DEFAULT", minutes));
        }

        for policy in self.repos.turnaround_repo.list_type_policies()? {
            resolver = resolver.with_type_policy(policy);
        }
        for over in self.repos.turnaround_repo.list_airport_overrides()? {
            resolver = resolver.with_airport_override(over.airport.clone(), over.policy);
        }
        Ok(resolver)
    }
}
