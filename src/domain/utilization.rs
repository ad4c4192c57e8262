// ==========================================
// 航班尾号分配系统 - 利用率报表行
// ==========================================
// 职责: 定义按机尾汇总的日利用率输出行
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// UtilizationRow - 机尾日利用率
// ==========================================
/// 某注册号在某日的轮挡分钟与航段数汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationRow {
    /// 注册号
    pub registration: String,
    /// 机型代码
    pub aircraft_type: String,
    /// 执行日期 (离港日)
    pub date: NaiveDate,
    /// 当日轮挡分钟合计
    pub block_minutes: i64,
    /// 当日航段数
    pub sector_count: i64,
}
