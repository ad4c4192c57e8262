// ==========================================
// ResultInterpreter 解读引擎集成测试
// ==========================================
// 测试目标: 验证结果清洗 (未知 id / 分配溢出冲突)
//           与派生视图 (反向视图 / 断链索引)
// ==========================================

mod helpers;

use helpers::{base_ctx, date, template_with, test_fleet, vj123_template};
use std::collections::HashMap;
use tail_assignment_aps::domain::context::PlanningContext;
use tail_assignment_aps::domain::solve::{AssignmentRequest, AssignmentResult, ChainBreak};
use tail_assignment_aps::domain::types::SolveStatus;
use tail_assignment_aps::engine::calendar::CalendarExpansionEngine;
use tail_assignment_aps::engine::interpreter::ResultInterpreter;
use tail_assignment_aps::engine::request_builder::{AssignmentRequestBuilder, BuildOutcome};
use tail_assignment_aps::engine::turnaround_resolver::TatMaps;

// ==========================================
// 测试辅助
// ==========================================

fn full_tat_maps() -> TatMaps {
    let mut maps = TatMaps::default();
    for t in ["A320", "A321"] {
        maps.scheduled.insert(t.to_string(), 35);
        maps.minimum.insert(t.to_string(), 30);
        maps.hard_floor.insert(t.to_string(), 25);
    }
    maps
}

/// 三航班请求: VJ123 (08:00), VJ124 (11:00), VJ130 (14:00)
fn three_flight_request() -> AssignmentRequest {
    let engine = CalendarExpansionEngine::new();
    let mut back = template_with("VJ124", "HAN", "SGN", 125);
    back.std_local = helpers::time(11, 0);
    back.sta_local = helpers::time(13, 5);
    let mut hop = template_with("VJ130", "SGN", "DAD", 80);
    hop.std_local = helpers::time(14, 0);
    hop.sta_local = helpers::time(15, 20);

    let flights = engine.expand(
        &[vj123_template(), back, hop],
        &base_ctx(),
        date(2024, 1, 5),
        date(2024, 1, 5),
    );
    assert_eq!(flights.len(), 3);

    let outcome = AssignmentRequestBuilder::new(PlanningContext::new("VJ"))
        .flights(flights)
        .aircraft(test_fleet())
        .tat_maps(full_tat_maps())
        .build()
        .unwrap();
    match outcome {
        BuildOutcome::Request(request) => request,
        BuildOutcome::Immediate(_) => panic!("应产出请求"),
    }
}

fn raw_result(assignments: &[(&str, &str)], overflow: &[&str]) -> AssignmentResult {
    AssignmentResult {
        status: SolveStatus::Feasible,
        assignments: assignments
            .iter()
            .map(|(f, r)| (f.to_string(), r.to_string()))
            .collect(),
        overflow: overflow.iter().map(|s| s.to_string()).collect(),
        chain_breaks: Vec::new(),
        objective: 0.0,
        variable_count: 0,
        constraint_count: 0,
        elapsed_ms: 10,
        message: None,
    }
}

// ==========================================
// 未知 id 清洗: 记告警后剔除, 不失败
// ==========================================

#[test]
fn test_unknown_ids_filtered_with_warnings() {
    let request = three_flight_request();
    let raw = raw_result(
        &[
            ("VJ123-20240105", "VN-A123"),
            ("VJ999-20240105", "VN-A456"), // 请求外 id
        ],
        &["GHOST-20240105"], // 请求外 id
    );

    let interpreted = ResultInterpreter::new().interpret(&request, raw);

    assert_eq!(interpreted.result.assignments.len(), 1);
    assert!(interpreted.result.assignments.contains_key("VJ123-20240105"));
    assert!(interpreted.result.overflow.is_empty());
    assert_eq!(interpreted.integrity_warnings.len(), 2);
}

// ==========================================
// 分配与溢出冲突: 保留分配
// ==========================================

#[test]
fn test_assignment_wins_over_overflow_conflict() {
    let request = three_flight_request();
    let raw = raw_result(
        &[("VJ123-20240105", "VN-A123")],
        &["VJ123-20240105", "VJ130-20240105"],
    );

    let interpreted = ResultInterpreter::new().interpret(&request, raw);

    assert_eq!(
        interpreted.result.assignments.get("VJ123-20240105"),
        Some(&"VN-A123".to_string())
    );
    assert_eq!(interpreted.result.overflow, vec!["VJ130-20240105".to_string()]);
    assert_eq!(interpreted.overflow_count, 1);
    assert_eq!(interpreted.integrity_warnings.len(), 1);
}

// ==========================================
// 反向视图: 同机航班按离港时刻排序
// ==========================================

#[test]
fn test_by_registration_sorted_by_departure() {
    let request = three_flight_request();
    // 故意乱序插入
    let raw = raw_result(
        &[
            ("VJ130-20240105", "VN-A123"),
            ("VJ123-20240105", "VN-A123"),
            ("VJ124-20240105", "VN-A123"),
        ],
        &[],
    );

    let interpreted = ResultInterpreter::new().interpret(&request, raw);

    let chain = interpreted.by_registration.get("VN-A123").unwrap();
    assert_eq!(
        chain,
        &vec![
            "VJ123-20240105".to_string(),
            "VJ124-20240105".to_string(),
            "VJ130-20240105".to_string(),
        ]
    );
}

// ==========================================
// 断链索引
// ==========================================

#[test]
fn test_chain_break_index() {
    let request = three_flight_request();
    let mut raw = raw_result(&[("VJ123-20240105", "VN-A123")], &[]);
    raw.chain_breaks = vec![
        ChainBreak {
            flight_id: "VJ130-20240105".to_string(),
            prev_arr: "SGN".to_string(),
            next_dep: "SGN".to_string(),
        },
        ChainBreak {
            flight_id: "UNKNOWN-20240105".to_string(),
            prev_arr: "HAN".to_string(),
            next_dep: "DAD".to_string(),
        },
    ];

    let interpreted = ResultInterpreter::new().interpret(&request, raw);

    assert_eq!(interpreted.result.chain_breaks.len(), 1);
    let cb = interpreted.chain_break_index.get("VJ130-20240105").unwrap();
    assert_eq!(cb.prev_arr, "SGN");
    assert!(!interpreted.chain_break_index.contains_key("UNKNOWN-20240105"));
    assert_eq!(interpreted.integrity_warnings.len(), 1);
}

// ==========================================
// 清洗后不变式: 分配与溢出互斥且都在请求集合内
// ==========================================

#[test]
fn test_cleaned_result_is_disjoint_and_contained() {
    let request = three_flight_request();
    let raw = raw_result(
        &[
            ("VJ123-20240105", "VN-A123"),
            ("VJ124-20240105", "VN-A456"),
            ("EXTRA-20240105", "VN-A456"),
        ],
        &["VJ124-20240105", "VJ130-20240105", "EXTRA2-20240105"],
    );

    let interpreted = ResultInterpreter::new().interpret(&request, raw);

    let known: Vec<String> = request.flight_ids();
    for flight_id in interpreted.result.assignments.keys() {
        assert!(known.contains(flight_id));
        assert!(!interpreted.result.overflow.contains(flight_id));
    }
    for flight_id in &interpreted.result.overflow {
        assert!(known.contains(flight_id));
    }

    let clean: HashMap<String, String> = interpreted.result.assignments.clone();
    assert_eq!(clean.len() + interpreted.result.overflow.len(), 3);
}
