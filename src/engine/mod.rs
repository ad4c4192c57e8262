// ==========================================
// 航班尾号分配系统 - 引擎层
// ==========================================
// 职责: 实现排班管线的纯业务引擎
// 红线: 引擎不做 I/O, 不拼 SQL; 唯一的挂起点在 gateway 层
// ==========================================

pub mod calendar;
pub mod interpreter;
pub mod repositories;
pub mod request_builder;
pub mod turnaround_resolver;
pub mod utilization;

// 重导出核心引擎
pub use calendar::{CalendarExpansionEngine, ExpansionContext};
pub use interpreter::{InterpretedResult, ResultInterpreter};
pub use repositories::PlanningRepositories;
pub use request_builder::{
    AssignmentRequestBuilder, BuildError, BuildOutcome, DEFAULT_OPTIMALITY_GAP,
    DEFAULT_TIME_BUDGET_SECS,
};
pub use turnaround_resolver::{TatMaps, TurnaroundPolicyResolver};
pub use utilization::{TailAssignmentSource, UtilizationAggregator};
