// ==========================================
// 测试辅助工厂
// ==========================================
// 提供各集成测试共用的模板/上下文/机队构造函数
// ==========================================
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};
use tail_assignment_aps::domain::fleet::AircraftUnit;
use tail_assignment_aps::domain::template::{
    FlightNumberTemplate, ScheduleSeason, WeeklyPattern,
};
use tail_assignment_aps::domain::types::TemplateStatus;
use tail_assignment_aps::engine::calendar::ExpansionContext;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 创建测试用模板 (VJ123 SGN→HAN, 每日执行, 2024-01 生效)
pub fn vj123_template() -> FlightNumberTemplate {
    FlightNumberTemplate {
        template_id: "T-VJ123".to_string(),
        season_id: "S24".to_string(),
        flight_no: "VJ123".to_string(),
        dep_station: "SGN".to_string(),
        arr_station: "HAN".to_string(),
        std_local: time(8, 0),
        sta_local: time(10, 10),
        block_minutes: 130,
        weekly_pattern: WeeklyPattern::parse("1234567").unwrap(),
        aircraft_type: "A320".to_string(),
        service_type: "J".to_string(),
        effective_from: Some(date(2024, 1, 1)),
        effective_until: Some(date(2024, 1, 31)),
        arrival_day_offset: 0,
        status: TemplateStatus::Published,
        excluded_dates: Vec::new(),
    }
}

/// 派生模板: 改航班号与航线
pub fn template_with(
    flight_no: &str,
    dep: &str,
    arr: &str,
    block_minutes: i64,
) -> FlightNumberTemplate {
    let mut t = vj123_template();
    t.template_id = format!("T-{}", flight_no);
    t.flight_no = flight_no.to_string();
    t.dep_station = dep.to_string();
    t.arr_station = arr.to_string();
    t.block_minutes = block_minutes;
    t
}

/// 创建测试用展开上下文 (S24 航季覆盖全年, 越南国内机场集合)
pub fn base_ctx() -> ExpansionContext {
    let mut seasons = HashMap::new();
    seasons.insert(
        "S24".to_string(),
        ScheduleSeason {
            season_id: "S24".to_string(),
            name: "Summer 2024".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        },
    );

    let domestic_stations: HashSet<String> = ["SGN", "HAN", "DAD", "CXR", "HPH"]
        .into_iter()
        .map(str::to_string)
        .collect();

    ExpansionContext {
        seasons,
        domestic_stations,
        pins: HashMap::new(),
    }
}

/// 创建测试用机队
pub fn test_fleet() -> Vec<AircraftUnit> {
    vec![
        AircraftUnit::new(0, "VN-A123", "A320", Some("A32X".to_string())),
        AircraftUnit::new(1, "VN-A456", "A321", Some("A32X".to_string())),
    ]
}
