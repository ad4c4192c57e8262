// ==========================================
// 航班尾号分配系统 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型, 转换 Repository 错误为
//       用户可理解的错误消息
// 红线: 传输/超时/上游 HTTP 失败不在此出现 —— 它们以
//       status=ERROR 的终态结果返回, 不作为 Rust 错误
//       向上传播; 此处只承载调用方可修复的拒绝
// ==========================================

use crate::engine::request_builder::BuildError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 配置错误 (调用方可修复, 发生在任何网络调用之前)
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigurationError(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field={}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// ==========================================
// 从 BuildError 转换 (过站时间覆盖缺失等)
// ==========================================
impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        ApiError::ConfigurationError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
