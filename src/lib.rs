// ==========================================
// 航班尾号分配系统 - 核心库
// ==========================================
// 系统定位: 航线网络计划决策支持 (求解算法在外部服务)
// 技术栈: Rust + SQLite + 外部尾号分配求解服务
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 协作数据访问
pub mod repository;

// 引擎层 - 排班管线纯引擎
pub mod engine;

// 外部集成层 - 求解服务网关
pub mod gateway;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施 (连接初始化/PRAGMA/建表统一)
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ChainContinuity, RouteKind, RouteTier, SolveStatus, TemplateStatus};

// 领域实体
pub use domain::{
    AircraftUnit, AssignmentRequest, AssignmentResult, ChainBreak, CostWeights,
    FlightNumberTemplate, PlanningContext, ScheduleSeason, ScheduledFlightInstance,
    TurnaroundPolicy, UtilizationRow, WeeklyPattern,
};

// 引擎
pub use engine::{
    AssignmentRequestBuilder, BuildOutcome, CalendarExpansionEngine, ExpansionContext,
    InterpretedResult, PlanningRepositories, ResultInterpreter, TatMaps,
    TurnaroundPolicyResolver, UtilizationAggregator,
};

// 网关
pub use gateway::{SolveService, SolverGateway, SOLVER_CLIENT_CEILING};

// API
pub use api::{PlanningApi, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "航班尾号分配系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
