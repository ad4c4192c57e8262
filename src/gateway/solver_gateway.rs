// ==========================================
// 航班尾号分配系统 - 求解服务网关
// ==========================================
// 职责: 唯一的外部集成边界, 向求解服务提交请求并
//       对失败做分类
// 红线: 对调用方永不抛错 —— 一切失败都折算为
//       status=ERROR 的终态结果, overflow 缺省为全部
//       提交航班; 不做自动重试 (重试多分钟级求解是
//       调用方层面的策略决定)
// ==========================================

use crate::domain::solve::{AssignmentRequest, AssignmentResult};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// 客户端硬上限: 无论求解服务自身的时间预算为何,
/// 单次调用超过 10 分钟即本地中止
pub const SOLVER_CLIENT_CEILING: Duration = Duration::from_secs(600);

// ==========================================
// SolveService - 求解服务接口
// ==========================================
/// 求解调用的抽象接口
///
/// api 层依赖该 trait 而非具体网关, 测试中以内存桩替代。
/// 实现约定: 永不返回 Err —— 失败以 ERROR 终态结果表达。
#[async_trait]
pub trait SolveService: Send + Sync {
    async fn solve(&self, request: &AssignmentRequest) -> AssignmentResult;
}

// ==========================================
// 网关内部失败分类
// ==========================================
enum GatewayFailure {
    /// 求解服务返回非 2xx
    Upstream { status: u16, body: String },
    /// 传输层失败 (连接拒绝/中断/响应解码失败等)
    Transport(String),
    /// reqwest 自身报告的超时
    Timeout,
}

// ==========================================
// SolverGateway - 求解服务 HTTP 网关
// ==========================================
/// 基于 reqwest 的求解服务客户端
///
/// POST {base_url}/solve, JSON 进出。成功时原样返回求解
/// 服务的响应体, 绝不重算或修正其目标值与决策。外层以
/// tokio::time::timeout 施加客户端硬上限; 返回的 future
/// 被 drop 时, reqwest 会中止在途连接, 两端资源均被释放。
pub struct SolverGateway {
    client: reqwest::Client,
    base_url: Option<String>,
    ceiling: Duration,
}

impl SolverGateway {
    /// 创建网关; base_url 为 None 表示求解端点未配置
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            ceiling: SOLVER_CLIENT_CEILING,
        }
    }

    /// 覆盖客户端硬上限 (测试用)
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// 端点是否已配置
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// 实际发起一次 HTTP 求解调用
    async fn post_solve(&self, url: &str, request: &AssignmentRequest) -> Result<AssignmentResult, GatewayFailure> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayFailure::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<AssignmentResult>()
            .await
            .map_err(|e| GatewayFailure::Transport(format!("响应解码失败: {}", e)))
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> GatewayFailure {
    if err.is_timeout() {
        GatewayFailure::Timeout
    } else {
        GatewayFailure::Transport(err.to_string())
    }
}

#[async_trait]
impl SolveService for SolverGateway {
    /// 提交求解请求
    ///
    /// 失败分类 (全部折算为 ERROR 终态结果, 不抛错):
    /// - 端点未配置 → "solver not configured", 不发起网络调用
    /// - 非 2xx 响应 → 消息内嵌上游状态码与响应体
    /// - 超过客户端硬上限 → 消息明确标注 timeout
    /// - 其他传输失败 → 消息携带底层原因
    #[instrument(skip(self, request), fields(request_id = %request.request_id, flights = request.flights.len()))]
    async fn solve(&self, request: &AssignmentRequest) -> AssignmentResult {
        let Some(base_url) = &self.base_url else {
            warn!("求解端点未配置, 直接返回 ERROR 终态");
            return AssignmentResult::error_with_overflow(
                request.flight_ids(),
                0,
                "solver not configured",
            );
        };

        let url = format!("{}/solve", base_url.trim_end_matches('/'));
        let started = Instant::now();

        let outcome = tokio::time::timeout(self.ceiling, self.post_solve(&url, request)).await;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        match outcome {
            Ok(Ok(result)) => {
                info!(
                    status = %result.status,
                    assigned = result.assignments.len(),
                    overflow = result.overflow.len(),
                    elapsed_ms,
                    "求解服务返回"
                );
                result
            }
            Ok(Err(GatewayFailure::Upstream { status, body })) => {
                warn!(status, elapsed_ms, "求解服务返回非成功状态");
                AssignmentResult::error_with_overflow(
                    request.flight_ids(),
                    elapsed_ms,
                    format!("求解服务返回 HTTP {}: {}", status, body),
                )
            }
            Ok(Err(GatewayFailure::Timeout)) | Err(_) => {
                warn!(ceiling_secs = self.ceiling.as_secs(), elapsed_ms, "求解调用超时中止");
                AssignmentResult::error_with_overflow(
                    request.flight_ids(),
                    elapsed_ms,
                    format!(
                        "timeout: 求解调用超过客户端上限 {}s, 已中止",
                        self.ceiling.as_secs()
                    ),
                )
            }
            Ok(Err(GatewayFailure::Transport(cause))) => {
                warn!(%cause, elapsed_ms, "求解调用传输失败");
                AssignmentResult::error_with_overflow(
                    request.flight_ids(),
                    elapsed_ms,
                    format!("求解调用传输失败: {}", cause),
                )
            }
        }
    }
}
