// ==========================================
// 仓储层集成测试
// ==========================================
// 测试目标: 验证各仓储的落库/读取往返与共享连接装配
// 手段: tempfile 临时目录 + 真实 SQLite 文件
// ==========================================

mod helpers;

use helpers::{date, test_fleet, vj123_template};
use std::sync::{Arc, Mutex};
use tail_assignment_aps::config::config_manager::ConfigManager;
use tail_assignment_aps::db::{init_schema, open_sqlite_connection};
use tail_assignment_aps::domain::template::ScheduleSeason;
use tail_assignment_aps::domain::turnaround::{AirportTatOverride, TurnaroundPolicy};
use tail_assignment_aps::domain::types::{ChainContinuity, RouteTier, TemplateStatus};
use tail_assignment_aps::repository::airport_repo::{AirportRecord, AirportRepository};
use tail_assignment_aps::repository::assignment_repo::TailAssignmentRepository;
use tail_assignment_aps::repository::fleet_repo::AircraftRepository;
use tail_assignment_aps::repository::season_repo::SeasonRepository;
use tail_assignment_aps::repository::template_repo::FlightTemplateRepository;
use tail_assignment_aps::repository::turnaround_repo::TurnaroundPolicyRepository;

/// 建临时库并初始化 schema, 返回 (目录句柄, 共享连接)
fn setup_db() -> (tempfile::TempDir, Arc<Mutex<rusqlite::Connection>>) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("planning.db");
    let conn = open_sqlite_connection(db_path.to_str().unwrap()).unwrap();
    init_schema(&conn).unwrap();
    (dir, Arc::new(Mutex::new(conn)))
}

// ==========================================
// 航班号模板仓储
// ==========================================

#[test]
fn test_template_round_trip() {
    let (_dir, conn) = setup_db();
    let repo = FlightTemplateRepository::from_connection(conn);

    let mut template = vj123_template();
    template.weekly_pattern =
        tail_assignment_aps::domain::template::WeeklyPattern::parse("12.4567").unwrap();
    template.excluded_dates = vec![date(2024, 1, 6), date(2024, 1, 13)];
    repo.upsert(&template).unwrap();

    let loaded = repo.find_by_id("T-VJ123").unwrap().unwrap();
    assert_eq!(loaded.flight_no, "VJ123");
    assert_eq!(loaded.std_local, helpers::time(8, 0));
    assert_eq!(loaded.weekly_pattern.to_pattern_string(), "12.4567");
    assert_eq!(loaded.excluded_dates, vec![date(2024, 1, 6), date(2024, 1, 13)]);
    assert_eq!(loaded.status, TemplateStatus::Published);
    assert_eq!(loaded.effective_from, Some(date(2024, 1, 1)));
}

#[test]
fn test_template_upsert_replaces_and_delete() {
    let (_dir, conn) = setup_db();
    let repo = FlightTemplateRepository::from_connection(conn);

    let mut template = vj123_template();
    repo.upsert(&template).unwrap();
    template.block_minutes = 140;
    repo.upsert(&template).unwrap();

    assert_eq!(repo.list_all().unwrap().len(), 1);
    assert_eq!(repo.find_by_id("T-VJ123").unwrap().unwrap().block_minutes, 140);

    assert!(repo.delete("T-VJ123").unwrap());
    assert!(!repo.delete("T-VJ123").unwrap());
    assert!(repo.find_by_id("T-VJ123").unwrap().is_none());
}

#[test]
fn test_template_list_by_season() {
    let (_dir, conn) = setup_db();
    let repo = FlightTemplateRepository::from_connection(conn);

    let s24 = vj123_template();
    let mut w24 = vj123_template();
    w24.template_id = "T-VJ200".to_string();
    w24.flight_no = "VJ200".to_string();
    w24.season_id = "W24".to_string();
    repo.upsert(&s24).unwrap();
    repo.upsert(&w24).unwrap();

    let rows = repo.list_by_season("S24").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].flight_no, "VJ123");
}

// ==========================================
// 航季仓储
// ==========================================

#[test]
fn test_season_load_all_keyed_by_id() {
    let (_dir, conn) = setup_db();
    let repo = SeasonRepository::from_connection(conn);

    repo.upsert(&ScheduleSeason {
        season_id: "S24".to_string(),
        name: "Summer 2024".to_string(),
        start_date: date(2024, 3, 31),
        end_date: date(2024, 10, 26),
    })
    .unwrap();
    repo.upsert(&ScheduleSeason {
        season_id: "W24".to_string(),
        name: "Winter 2024".to_string(),
        start_date: date(2024, 10, 27),
        end_date: date(2025, 3, 29),
    })
    .unwrap();

    let seasons = repo.load_all().unwrap();
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons.get("S24").unwrap().end_date, date(2024, 10, 26));
    assert!(repo.find_by_id("X99").unwrap().is_none());
}

// ==========================================
// 机队仓储
// ==========================================

#[test]
fn test_fleet_batch_upsert_preserves_index_order() {
    let (_dir, conn) = setup_db();
    let repo = AircraftRepository::from_connection(conn);

    let mut fleet = test_fleet();
    fleet.reverse(); // 乱序写入
    assert_eq!(repo.batch_upsert(&fleet).unwrap(), 2);

    let loaded = repo.list_all().unwrap();
    assert_eq!(loaded[0].registration, "VN-A123");
    assert_eq!(loaded[1].registration, "VN-A456");

    let unit = repo.find_by_registration("VN-A456").unwrap().unwrap();
    assert_eq!(unit.aircraft_type, "A321");
    assert_eq!(unit.family.as_deref(), Some("A32X"));
}

// ==========================================
// 过站策略仓储 (含分航段组合覆盖 JSON 列)
// ==========================================

#[test]
fn test_turnaround_policy_round_trip_with_tier_overrides() {
    let (_dir, conn) = setup_db();
    let repo = TurnaroundPolicyRepository::from_connection(conn);

    let policy = TurnaroundPolicy::new("A320", 35)
        .with_min(30)
        .with_hard_floor(25)
        .with_tier_override(RouteTier::IntInt, 60)
        .with_tier_override(RouteTier::DomInt, 50);
    repo.upsert_type_policy(&policy).unwrap();
    repo.upsert_airport_override(&AirportTatOverride {
        airport: "HAN".to_string(),
        policy: TurnaroundPolicy::new("A320", 50),
    })
    .unwrap();

    let policies = repo.list_type_policies().unwrap();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].scheduled_tat_min, 35);
    assert_eq!(policies[0].tier_overrides.get(&RouteTier::IntInt), Some(&60));
    assert_eq!(policies[0].tier_overrides.get(&RouteTier::DomInt), Some(&50));

    let overrides = repo.list_airport_overrides().unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].airport, "HAN");
    assert_eq!(overrides[0].policy.scheduled_tat_min, 50);
    assert!(overrides[0].policy.tier_overrides.is_empty());
}

// ==========================================
// 机场仓储
// ==========================================

#[test]
fn test_airport_domestic_station_set() {
    let (_dir, conn) = setup_db();
    let repo = AirportRepository::from_connection(conn);

    for (code, country, domestic) in
        [("SGN", "VN", true), ("HAN", "VN", true), ("BKK", "TH", false)]
    {
        repo.upsert(&AirportRecord {
            code: code.to_string(),
            country_code: country.to_string(),
            is_domestic: domestic,
        })
        .unwrap();
    }

    let domestic = repo.load_domestic_stations().unwrap();
    assert_eq!(domestic.len(), 2);
    assert!(domestic.contains("SGN"));
    assert!(!domestic.contains("BKK"));

    let bkk = repo.find_by_code("BKK").unwrap().unwrap();
    assert!(!bkk.is_domestic);
    assert_eq!(bkk.country_code, "TH");
}

// ==========================================
// 尾号分配仓储
// ==========================================

#[test]
fn test_assignment_save_and_load_range() {
    let (_dir, conn) = setup_db();
    let repo = TailAssignmentRepository::from_connection(conn);

    let mut assignments = std::collections::HashMap::new();
    assignments.insert("VJ123-20240105".to_string(), "VN-A123".to_string());
    assignments.insert("VJ123-20240106".to_string(), "VN-A456".to_string());
    let mut dates = std::collections::HashMap::new();
    dates.insert("VJ123-20240105".to_string(), date(2024, 1, 5));
    dates.insert("VJ123-20240106".to_string(), date(2024, 1, 6));

    assert_eq!(repo.save_assignments(&assignments, &dates).unwrap(), 2);

    // 区间过滤
    let day_one = repo.load_range(date(2024, 1, 5), date(2024, 1, 5)).unwrap();
    assert_eq!(day_one.len(), 1);
    assert_eq!(day_one.get("VJ123-20240105"), Some(&"VN-A123".to_string()));

    let both = repo.load_range(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(both.len(), 2);

    assert_eq!(
        repo.find_registration("VJ123-20240106").unwrap().as_deref(),
        Some("VN-A456")
    );
    assert!(repo.find_registration("VJ999-20240105").unwrap().is_none());
}

#[test]
fn test_assignment_missing_date_rejected() {
    let (_dir, conn) = setup_db();
    let repo = TailAssignmentRepository::from_connection(conn);

    let mut assignments = std::collections::HashMap::new();
    assignments.insert("VJ123-20240105".to_string(), "VN-A123".to_string());
    let dates = std::collections::HashMap::new();

    assert!(repo.save_assignments(&assignments, &dates).is_err());
}

// ==========================================
// 配置管理器
// ==========================================

#[test]
fn test_config_defaults_and_overrides() {
    let (_dir, conn) = setup_db();
    let config = ConfigManager::from_connection(conn).unwrap();

    // 空库: 全部走编译期缺省
    let defaults = config.solver_config().unwrap();
    assert!(defaults.base_url.is_none());
    assert_eq!(defaults.time_budget_secs, 300);
    assert_eq!(defaults.optimality_gap, 0.01);
    assert_eq!(defaults.chain_continuity, ChainContinuity::Strict);
    assert_eq!(defaults.cost_weights.overflow_cost, 10_000.0);

    config
        .set_global_config_value("solver/base_url", "http://solver.local:9000")
        .unwrap();
    config.set_global_config_value("solver/time_budget_secs", "120").unwrap();
    config.set_global_config_value("solver/chain_continuity", "FLEXIBLE").unwrap();
    config.set_global_config_value("cost/overflow", "20000").unwrap();

    let loaded = config.solver_config().unwrap();
    assert_eq!(loaded.base_url.as_deref(), Some("http://solver.local:9000"));
    assert_eq!(loaded.time_budget_secs, 120);
    assert_eq!(loaded.chain_continuity, ChainContinuity::Flexible);
    assert_eq!(loaded.cost_weights.overflow_cost, 20_000.0);
    // 未覆写的键保持缺省
    assert_eq!(loaded.cost_weights.chain_break_cost, 1_000.0);
}

#[test]
fn test_config_value_upsert() {
    let (_dir, conn) = setup_db();
    let config = ConfigManager::from_connection(conn).unwrap();

    assert!(config.get_global_config_value("tat/global_default_min").unwrap().is_none());
    config.set_global_config_value("tat/global_default_min", "45").unwrap();
    config.set_global_config_value("tat/global_default_min", "50").unwrap();
    assert_eq!(
        config.get_global_config_value("tat/global_default_min").unwrap().as_deref(),
        Some("50")
    );
}
