// ==========================================
// 航班尾号分配系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口, 屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化, 防止 SQL 注入
// ==========================================

pub mod airport_repo;
pub mod assignment_repo;
pub mod error;
pub mod fleet_repo;
pub mod season_repo;
pub mod template_repo;
pub mod turnaround_repo;

// 重导出核心仓储
pub use airport_repo::{AirportRecord, AirportRepository};
pub use assignment_repo::TailAssignmentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use fleet_repo::AircraftRepository;
pub use season_repo::SeasonRepository;
pub use template_repo::FlightTemplateRepository;
pub use turnaround_repo::TurnaroundPolicyRepository;
