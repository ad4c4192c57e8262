// ==========================================
// 航班尾号分配系统 - 管线仓储聚合
// ==========================================
// 职责: 聚合排班管线所需的全部协作仓储
// 目标: 减少 api 层构造函数参数数量, 便于测试注入
// ==========================================

use std::sync::Arc;

use crate::repository::{
    AircraftRepository, AirportRepository, FlightTemplateRepository, SeasonRepository,
    TailAssignmentRepository, TurnaroundPolicyRepository,
};

// ==========================================
// PlanningRepositories - 管线仓储聚合
// ==========================================
/// 排班管线消费的只读协作仓储集合
///
/// 模板/航季/机队/过站策略/机场由各自的管理模块维护,
/// 本核心只通过仓储读取; 尾号分配表在求解成功后回写。
#[derive(Clone)]
pub struct PlanningRepositories {
    /// 航班号模板仓储
    pub template_repo: Arc<FlightTemplateRepository>,
    /// 航季元数据仓储
    pub season_repo: Arc<SeasonRepository>,
    /// 机队仓储
    pub aircraft_repo: Arc<AircraftRepository>,
    /// 过站时间策略仓储
    pub turnaround_repo: Arc<TurnaroundPolicyRepository>,
    /// 机场仓储 (国内/国际属性)
    pub airport_repo: Arc<AirportRepository>,
    /// 尾号分配仓储
    pub assignment_repo: Arc<TailAssignmentRepository>,
}

impl PlanningRepositories {
    pub fn new(
        template_repo: Arc<FlightTemplateRepository>,
        season_repo: Arc<SeasonRepository>,
        aircraft_repo: Arc<AircraftRepository>,
        turnaround_repo: Arc<TurnaroundPolicyRepository>,
        airport_repo: Arc<AirportRepository>,
        assignment_repo: Arc<TailAssignmentRepository>,
    ) -> Self {
        Self {
            template_repo,
            season_repo,
            aircraft_repo,
            turnaround_repo,
            airport_repo,
            assignment_repo,
        }
    }

    /// 基于同一个数据库连接装配全套仓储
    pub fn from_connection(
        conn: Arc<std::sync::Mutex<rusqlite::Connection>>,
    ) -> Self {
        Self {
            template_repo: Arc::new(FlightTemplateRepository::from_connection(conn.clone())),
            season_repo: Arc::new(SeasonRepository::from_connection(conn.clone())),
            aircraft_repo: Arc::new(AircraftRepository::from_connection(conn.clone())),
            turnaround_repo: Arc::new(TurnaroundPolicyRepository::from_connection(conn.clone())),
            airport_repo: Arc::new(AirportRepository::from_connection(conn.clone())),
            assignment_repo: Arc::new(TailAssignmentRepository::from_connection(conn)),
        }
    }
}
