// ==========================================
// 航班尾号分配系统 - 航班号模板与班期
// ==========================================
// 职责: 定义周期性航班号模板实体与周班期模式
// 约束: 模板由航季计划模块维护, 排班核心只读
// ==========================================

use crate::domain::types::TemplateStatus;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ==========================================
// WeeklyPattern - 周班期模式
// ==========================================
// 外部格式: 7 字符字符串, 第 i 位 (Mon=1..Sun=7) 仅当字符
// 恰为数字 i 本身时视为执行日, 其余任何字符视为不执行。
// 该"数字等于自身位置"的约定沿自上游排期数据, 刻意原样保留,
// 内部统一转换为显式的 Mon..Sun 布尔集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyPattern {
    days: [bool; 7], // Mon..Sun
}

/// 班期字符串非法 (长度不是 7)
#[derive(Debug, Error)]
#[error("无效的班期字符串: {0:?} (长度必须为 7)")]
pub struct InvalidWeeklyPattern(pub String);

impl WeeklyPattern {
    /// 全周执行 ("1234567")
    pub fn daily() -> Self {
        Self { days: [true; 7] }
    }

    /// 由 Mon..Sun 布尔集合构造
    pub fn from_days(days: [bool; 7]) -> Self {
        Self { days }
    }

    /// 解析外部 7 字符班期字符串
    ///
    /// # 规则
    /// - 第 i 位 (1-indexed) 字符 == 数字 i → 该周几执行
    /// - 其余字符 ('.', '0', 错位数字等) → 不执行
    pub fn parse(s: &str) -> Result<Self, InvalidWeeklyPattern> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 7 {
            return Err(InvalidWeeklyPattern(s.to_string()));
        }

        let mut days = [false; 7];
        for (idx, ch) in chars.iter().enumerate() {
            let expected = char::from_digit(idx as u32 + 1, 10).unwrap();
            days[idx] = *ch == expected;
        }
        Ok(Self { days })
    }

    /// 判定某个 ISO 周几是否执行
    pub fn is_active(&self, weekday: Weekday) -> bool {
        self.days[weekday.number_from_monday() as usize - 1]
    }

    /// 判定某个日期是否为执行日
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active(date.weekday())
    }

    /// 是否没有任何执行日
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| !d)
    }

    /// 序列化回外部字符串格式: 执行日 → 位置数字, 非执行日 → '.'
    pub fn to_pattern_string(&self) -> String {
        self.days
            .iter()
            .enumerate()
            .map(|(idx, active)| {
                if *active {
                    char::from_digit(idx as u32 + 1, 10).unwrap()
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Display for WeeklyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern_string())
    }
}

// 序列化边界保持外部字符串格式
impl Serialize for WeeklyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_pattern_string())
    }
}

impl<'de> Deserialize<'de> for WeeklyPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        WeeklyPattern::parse(&s).map_err(D::Error::custom)
    }
}

// ==========================================
// FlightNumberTemplate - 航班号模板
// ==========================================
/// 周期性航班号模板
///
/// 一条模板描述一个航季内按周班期重复执行的航班号,
/// 由日历展开引擎在日期范围内展开为具体日期的航班实例。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightNumberTemplate {
    /// 模板主键
    pub template_id: String,
    /// 所属航季
    pub season_id: String,
    /// 航班号 (如 VJ123)
    pub flight_no: String,
    /// 起飞站三字码
    pub dep_station: String,
    /// 到达站三字码
    pub arr_station: String,
    /// 计划离港时刻 (起飞站当地时间)
    pub std_local: NaiveTime,
    /// 计划到港时刻 (到达站当地时间)
    pub sta_local: NaiveTime,
    /// 轮挡时间 (分钟)
    pub block_minutes: i64,
    /// 周班期模式
    pub weekly_pattern: WeeklyPattern,
    /// 执行机型
    pub aircraft_type: String,
    /// 服务类型代码 (客运/货运/调机等)
    pub service_type: String,
    /// 生效起始日 (含), None 表示不限
    pub effective_from: Option<NaiveDate>,
    /// 生效截止日 (含), None 表示不限
    pub effective_until: Option<NaiveDate>,
    /// 到达跨天偏移 (红眼/跨日航班为 1)
    pub arrival_day_offset: i64,
    /// 模板生命周期状态
    pub status: TemplateStatus,
    /// 排除日期 (节假日停飞等)
    pub excluded_dates: Vec<NaiveDate>,
}

impl FlightNumberTemplate {
    /// 判定日期是否落在模板生效窗口内 (不含航季边界)
    pub fn effective_on(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.effective_from {
            if date < from {
                return false;
            }
        }
        if let Some(until) = self.effective_until {
            if date > until {
                return false;
            }
        }
        true
    }

    /// 判定日期是否在排除列表中
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded_dates.contains(&date)
    }
}

// ==========================================
// ScheduleSeason - 航季元数据
// ==========================================
/// 航季 (如 S24/W24), 提供展开时与模板生效窗口求交的日期边界
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSeason {
    pub season_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScheduleSeason {
    /// 判定日期是否落在航季边界内 (含两端)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
