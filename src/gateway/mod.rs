// ==========================================
// 航班尾号分配系统 - 外部集成层
// ==========================================
// 职责: 封装与外部求解服务的集成
// ==========================================

pub mod solver_gateway;

pub use solver_gateway::{SolveService, SolverGateway, SOLVER_CLIENT_CEILING};
