// ==========================================
// 航班尾号分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod context;
pub mod fleet;
pub mod flight;
pub mod solve;
pub mod template;
pub mod turnaround;
pub mod types;
pub mod utilization;

// 重导出核心类型
pub use context::PlanningContext;
pub use fleet::AircraftUnit;
pub use flight::ScheduledFlightInstance;
pub use solve::{AssignmentRequest, AssignmentResult, ChainBreak, CostWeights};
pub use template::{
    FlightNumberTemplate, InvalidWeeklyPattern, ScheduleSeason, WeeklyPattern,
};
pub use turnaround::{AirportTatOverride, ResolvedTurnaround, TurnaroundPolicy};
pub use types::{ChainContinuity, RouteKind, RouteTier, SolveStatus, TemplateStatus};
pub use utilization::UtilizationRow;
