// ==========================================
// 航班尾号分配系统 - 求解请求构建引擎
// ==========================================
// 职责: 将展开实例 + 机队 + 过站策略 + 代价配置组装为
//       不可变的求解请求
// 红线: 过站时间覆盖校验在任何网络调用之前完成,
//       配置缺失是调用方可修复错误, 与求解失败严格区分
// ==========================================

use crate::domain::context::PlanningContext;
use crate::domain::fleet::AircraftUnit;
use crate::domain::flight::ScheduledFlightInstance;
use crate::domain::solve::{AssignmentRequest, AssignmentResult, CostWeights};
use crate::domain::types::ChainContinuity;
use crate::engine::turnaround_resolver::TatMaps;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use uuid::Uuid;

/// 缺省求解时间预算 (秒)
pub const DEFAULT_TIME_BUDGET_SECS: u64 = 300;

/// 缺省可接受最优间隙
pub const DEFAULT_OPTIMALITY_GAP: f64 = 0.01;

// ==========================================
// BuildError - 构建期配置错误
// ==========================================
/// 请求构建失败 (调用方可修复, 不发起任何网络调用)
#[derive(Debug, Error)]
pub enum BuildError {
    /// 出现在航班或机队中的机型缺少计划过站时间配置
    #[error("过站时间配置缺失: 机型 {missing_types:?} 无计划过站时间")]
    MissingTatCoverage { missing_types: Vec<String> },
}

// ==========================================
// BuildOutcome - 构建结果
// ==========================================
/// 构建产物: 正常情况下是一个待发送的请求;
/// 空航班窗口直接短路为即时最优结果, 不发起网络调用
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// 待发送的不可变求解请求
    Request(AssignmentRequest),
    /// 空窗口短路: 即时最优, 空分配/空溢出, 零耗时
    Immediate(AssignmentResult),
}

// ==========================================
// AssignmentRequestBuilder - 求解请求构建器
// ==========================================
/// 求解请求的流式构建器
pub struct AssignmentRequestBuilder {
    ctx: PlanningContext,
    flights: Vec<ScheduledFlightInstance>,
    aircraft: Vec<AircraftUnit>,
    tat_maps: TatMaps,
    family_map: HashMap<String, String>,
    cost_weights: CostWeights,
    time_budget_secs: u64,
    optimality_gap: f64,
    chain_continuity: ChainContinuity,
}

impl AssignmentRequestBuilder {
    pub fn new(ctx: PlanningContext) -> Self {
        Self {
            ctx,
            flights: Vec::new(),
            aircraft: Vec::new(),
            tat_maps: TatMaps::default(),
            family_map: HashMap::new(),
            cost_weights: CostWeights::default(),
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            optimality_gap: DEFAULT_OPTIMALITY_GAP,
            chain_continuity: ChainContinuity::Strict,
        }
    }

    pub fn flights(mut self, flights: Vec<ScheduledFlightInstance>) -> Self {
        self.flights = flights;
        self
    }

    pub fn aircraft(mut self, aircraft: Vec<AircraftUnit>) -> Self {
        self.aircraft = aircraft;
        self
    }

    pub fn tat_maps(mut self, tat_maps: TatMaps) -> Self {
        self.tat_maps = tat_maps;
        self
    }

    /// 机型 → 机族替代映射
    pub fn family_map(mut self, family_map: HashMap<String, String>) -> Self {
        self.family_map = family_map;
        self
    }

    pub fn cost_weights(mut self, cost_weights: CostWeights) -> Self {
        self.cost_weights = cost_weights;
        self
    }

    pub fn time_budget_secs(mut self, secs: u64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    pub fn optimality_gap(mut self, gap: f64) -> Self {
        self.optimality_gap = gap;
        self
    }

    pub fn chain_continuity(mut self, mode: ChainContinuity) -> Self {
        self.chain_continuity = mode;
        self
    }

    /// 校验并构建求解请求
    ///
    /// # 校验
    /// 航班与机队中出现的每个机型都必须有计划过站时间条目,
    /// 缺失即拒绝 (BuildError::MissingTatCoverage), 不发起网络调用。
    ///
    /// # 短路
    /// 航班列表为空时直接产出即时最优结果 (BuildOutcome::Immediate)。
    pub fn build(self) -> Result<BuildOutcome, BuildError> {
        if self.flights.is_empty() {
            return Ok(BuildOutcome::Immediate(AssignmentResult::optimal_empty()));
        }

        // BTreeSet 保证错误信息中机型顺序稳定
        let missing_types: Vec<String> = self
            .flights
            .iter()
            .map(|f| f.aircraft_type.as_str())
            .chain(self.aircraft.iter().map(|a| a.aircraft_type.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|t| !self.tat_maps.scheduled.contains_key(*t))
            .map(|t| t.to_string())
            .collect();

        if !missing_types.is_empty() {
            return Err(BuildError::MissingTatCoverage { missing_types });
        }

        Ok(BuildOutcome::Request(AssignmentRequest {
            request_id: Uuid::new_v4().to_string(),
            operator_id: self.ctx.operator_id,
            flights: self.flights,
            aircraft: self.aircraft,
            scheduled_tat: self.tat_maps.scheduled,
            min_tat: self.tat_maps.minimum,
            hard_floor_tat: self.tat_maps.hard_floor,
            family_map: self.family_map,
            cost_weights: self.cost_weights,
            time_budget_secs: self.time_budget_secs,
            optimality_gap: self.optimality_gap,
            chain_continuity: self.chain_continuity,
        }))
    }
}
