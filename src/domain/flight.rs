// ==========================================
// 航班尾号分配系统 - 日期化航班实例
// ==========================================
// 职责: 定义由模板展开得到的具体日期航班实例
// 约束: 派生数据, 随用随算, 本核心不落库
// ==========================================

use crate::domain::types::RouteKind;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduledFlightInstance - 日期化航班实例
// ==========================================
/// 某个具体执行日的航班实例
///
/// 由日历展开引擎从模板投影而来, 除起降时刻按执行日落位外,
/// 其余字段为模板字段的原样投影。实例 id 格式为
/// `{航班号}-{yyyymmdd}`, 在一个求解窗口内唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledFlightInstance {
    /// 实例 id, 如 "VJ123-20240105"
    pub flight_id: String,
    /// 航班号
    pub flight_no: String,
    /// 起飞站三字码
    pub dep_station: String,
    /// 到达站三字码
    pub arr_station: String,
    /// 离港时刻 (起飞站当地时间)
    pub dep_time: NaiveDateTime,
    /// 到港时刻 (到达站当地时间, 已含跨天偏移)
    pub arr_time: NaiveDateTime,
    /// 轮挡时间 (分钟)
    pub block_minutes: i64,
    /// 执行机型
    pub aircraft_type: String,
    /// 是否人工锁定机尾 (硬约束)
    pub pinned: bool,
    /// 锁定的注册号, pinned=true 时有值
    pub pinned_registration: Option<String>,
    /// 航线性质 (国内/国际)
    pub route_kind: RouteKind,
}

impl ScheduledFlightInstance {
    /// 生成实例 id: `{航班号}-{yyyymmdd}`
    pub fn make_flight_id(flight_no: &str, date: NaiveDate) -> String {
        format!("{}-{}", flight_no, date.format("%Y%m%d"))
    }

    /// 实例的执行日期 (离港日)
    pub fn flight_date(&self) -> NaiveDate {
        self.dep_time.date()
    }
}
