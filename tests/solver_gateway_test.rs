// ==========================================
// SolverGateway 网关集成测试
// ==========================================
// 测试目标: 验证失败分类 (未配置/连接拒绝/非2xx/超时)
//           与成功路径的原样透传
// 手段: 本地 TCP 桩服务, 不依赖外部网络
// ==========================================

mod helpers;

use helpers::{base_ctx, date, template_with, test_fleet, vj123_template};
use std::net::SocketAddr;
use std::time::Duration;
use tail_assignment_aps::domain::context::PlanningContext;
use tail_assignment_aps::domain::solve::AssignmentRequest;
use tail_assignment_aps::domain::types::SolveStatus;
use tail_assignment_aps::engine::calendar::CalendarExpansionEngine;
use tail_assignment_aps::engine::request_builder::{AssignmentRequestBuilder, BuildOutcome};
use tail_assignment_aps::engine::turnaround_resolver::TatMaps;
use tail_assignment_aps::gateway::{SolveService, SolverGateway};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

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

/// 构造一个 5 航班 / 2 飞机的求解请求
fn five_flight_request() -> AssignmentRequest {
    let engine = CalendarExpansionEngine::new();
    let templates = vec![
        vj123_template(),
        template_with("VJ124", "HAN", "SGN", 125),
        template_with("VJ130", "SGN", "DAD", 80),
        template_with("VJ131", "DAD", "SGN", 80),
        template_with("VJ140", "HAN", "DAD", 75),
    ];
    let flights = engine.expand(&templates, &base_ctx(), date(2024, 1, 5), date(2024, 1, 5));
    assert_eq!(flights.len(), 5);

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

/// 启动只接待一个连接的 HTTP 桩服务
///
/// 读完请求头与请求体后, 等待 delay 再写回 response。
async fn spawn_stub(response: String, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // 读取请求头
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_header_end(&buf) {
                break pos;
            }
        };

        // 按 Content-Length 读完请求体
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + 4 + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        tokio::time::sleep(delay).await;
        stream.write_all(response.as_bytes()).await.ok();
        stream.flush().await.ok();
    });

    addr
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

// ==========================================
// 端点未配置: 不发起网络调用
// ==========================================

#[tokio::test]
async fn test_unconfigured_endpoint_returns_error() {
    let gateway = SolverGateway::new(None);
    let request = five_flight_request();

    let result = gateway.solve(&request).await;

    assert_eq!(result.status, SolveStatus::Error);
    assert_eq!(result.message.as_deref(), Some("solver not configured"));
    assert!(result.assignments.is_empty());
    assert_eq!(result.overflow, request.flight_ids());
    assert_eq!(result.elapsed_ms, 0);
}

// ==========================================
// 场景: 连接拒绝 → ERROR, 全部航班溢出
// ==========================================

#[tokio::test]
async fn test_connection_refused_yields_full_overflow() {
    // 绑定后立即释放端口, 保证连接被拒绝
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = SolverGateway::new(Some(format!("http://{}", addr)));
    let request = five_flight_request();

    let result = gateway.solve(&request).await;

    assert_eq!(result.status, SolveStatus::Error);
    assert!(result.assignments.is_empty());
    assert_eq!(result.overflow.len(), 5);
    assert!(result.message.is_some());
}

// ==========================================
// 成功路径: 原样透传
// ==========================================

#[tokio::test]
async fn test_success_response_passed_through() {
    let body = r#"{
        "status": "OPTIMAL",
        "assignments": {"VJ123-20240105": "VN-A123"},
        "overflow": [],
        "chainBreaks": [],
        "objective": 123.5,
        "variableCount": 42,
        "constraintCount": 17,
        "elapsedMs": 880
    }"#;
    let addr = spawn_stub(http_response("200 OK", body), Duration::ZERO).await;

    let gateway = SolverGateway::new(Some(format!("http://{}", addr)));
    let request = five_flight_request();

    let result = gateway.solve(&request).await;

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(
        result.assignments.get("VJ123-20240105"),
        Some(&"VN-A123".to_string())
    );
    // 网关不重算不修正
    assert_eq!(result.objective, 123.5);
    assert_eq!(result.variable_count, 42);
    assert_eq!(result.constraint_count, 17);
    assert_eq!(result.elapsed_ms, 880);
}

// ==========================================
// 非 2xx: 消息内嵌上游状态与响应体
// ==========================================

#[tokio::test]
async fn test_upstream_error_embeds_status_and_body() {
    let addr = spawn_stub(
        http_response("500 Internal Server Error", "model blew up"),
        Duration::ZERO,
    )
    .await;

    let gateway = SolverGateway::new(Some(format!("http://{}", addr)));
    let request = five_flight_request();

    let result = gateway.solve(&request).await;

    assert_eq!(result.status, SolveStatus::Error);
    assert_eq!(result.overflow.len(), 5);
    let message = result.message.unwrap();
    assert!(message.contains("500"), "消息应包含上游状态码: {}", message);
    assert!(message.contains("model blew up"), "消息应包含响应体: {}", message);
}

// ==========================================
// 客户端硬上限: 超时中止并明确标注
// ==========================================

#[tokio::test]
async fn test_client_ceiling_timeout() {
    let body = r#"{"status": "OPTIMAL"}"#;
    // 桩服务延迟 2s, 网关上限压到 100ms
    let addr = spawn_stub(http_response("200 OK", body), Duration::from_secs(2)).await;

    let gateway = SolverGateway::new(Some(format!("http://{}", addr)))
        .with_ceiling(Duration::from_millis(100));
    let request = five_flight_request();

    let result = gateway.solve(&request).await;

    assert_eq!(result.status, SolveStatus::Error);
    assert_eq!(result.overflow.len(), 5);
    let message = result.message.unwrap();
    assert!(message.contains("timeout"), "消息应明确标注超时: {}", message);
}
