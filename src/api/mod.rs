// ==========================================
// 航班尾号分配系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供上层应用调用
// ==========================================

pub mod error;
pub mod planning_api;
pub mod report_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use planning_api::PlanningApi;
pub use report_api::ReportApi;
