// ==========================================
// 航班尾号分配系统 - 领域类型定义
// ==========================================
// 职责: 定义排班核心使用的枚举类型
// 约定: 序列化格式 SCREAMING_SNAKE_CASE (与数据库/求解服务一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 航班号模板状态 (Template Status)
// ==========================================
// 生命周期: 草稿 → 就绪 → 发布, 任意阶段可取消
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Draft,     // 草稿
    Ready,     // 就绪
    Published, // 已发布
    Cancelled, // 已取消
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateStatus::Draft => write!(f, "DRAFT"),
            TemplateStatus::Ready => write!(f, "READY"),
            TemplateStatus::Published => write!(f, "PUBLISHED"),
            TemplateStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl TemplateStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "READY" => TemplateStatus::Ready,
            "PUBLISHED" => TemplateStatus::Published,
            "CANCELLED" => TemplateStatus::Cancelled,
            _ => TemplateStatus::Draft, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TemplateStatus::Draft => "DRAFT",
            TemplateStatus::Ready => "READY",
            TemplateStatus::Published => "PUBLISHED",
            TemplateStatus::Cancelled => "CANCELLED",
        }
    }
}

// ==========================================
// 航线性质 (Route Kind)
// ==========================================
// 依据起降两端机场的国内/国际属性判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteKind {
    Domestic,      // 国内航线
    International, // 国际航线
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Domestic => write!(f, "DOMESTIC"),
            RouteKind::International => write!(f, "INTERNATIONAL"),
        }
    }
}

// ==========================================
// 过站航段组合 (Route Tier)
// ==========================================
// 用于过站时间的分航段覆盖: 进港航段性质 × 离港航段性质
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteTier {
    DomDom, // 国内 → 国内
    DomInt, // 国内 → 国际
    IntDom, // 国际 → 国内
    IntInt, // 国际 → 国际
}

impl RouteTier {
    /// 由进港/离港航线性质组合判定
    pub fn from_legs(inbound: RouteKind, outbound: RouteKind) -> Self {
        match (inbound, outbound) {
            (RouteKind::Domestic, RouteKind::Domestic) => RouteTier::DomDom,
            (RouteKind::Domestic, RouteKind::International) => RouteTier::DomInt,
            (RouteKind::International, RouteKind::Domestic) => RouteTier::IntDom,
            (RouteKind::International, RouteKind::International) => RouteTier::IntInt,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RouteTier::DomDom => "DOM_DOM",
            RouteTier::DomInt => "DOM_INT",
            RouteTier::IntDom => "INT_DOM",
            RouteTier::IntInt => "INT_INT",
        }
    }
}

impl fmt::Display for RouteTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 求解终态 (Solve Status)
// ==========================================
// 四个终态, 无后续迁移; Optimal/Feasible/Infeasible 来自求解服务
// 原样透传, Error 由本地在无法取得有效响应时合成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,    // 最优解
    Feasible,   // 可行解
    Infeasible, // 无可行解
    Error,      // 本地合成的失败终态
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// 链条连续性模式 (Chain Continuity)
// ==========================================
// Strict: 同一飞机相邻航班必须站点衔接
// Flexible: 允许断链, 以 chain_break_cost 计罚
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainContinuity {
    Strict,
    Flexible,
}

impl fmt::Display for ChainContinuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainContinuity::Strict => write!(f, "STRICT"),
            ChainContinuity::Flexible => write!(f, "FLEXIBLE"),
        }
    }
}

impl ChainContinuity {
    /// 从字符串解析模式
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "FLEXIBLE" => ChainContinuity::Flexible,
            _ => ChainContinuity::Strict, // 默认值
        }
    }
}
