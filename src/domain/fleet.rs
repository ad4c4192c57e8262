// ==========================================
// 航班尾号分配系统 - 机队实体
// ==========================================
// 职责: 定义参与排班的飞机单元
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AircraftUnit - 机队飞机单元
// ==========================================
/// 一架参与排班的飞机
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftUnit {
    /// 机队内序号 (求解服务以此为飞机下标)
    pub fleet_index: i64,
    /// 注册号 (如 VN-A123)
    pub registration: String,
    /// 机型代码 (如 A320, A321)
    pub aircraft_type: String,
    /// 机族分组, 用于机型替代 (如 A32X); None 表示不参与替代
    pub family: Option<String>,
}

impl AircraftUnit {
    pub fn new(
        fleet_index: i64,
        registration: impl Into<String>,
        aircraft_type: impl Into<String>,
        family: Option<String>,
    ) -> Self {
        Self {
            fleet_index,
            registration: registration.into(),
            aircraft_type: aircraft_type.into(),
            family,
        }
    }
}
