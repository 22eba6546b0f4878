//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kabu_core::market::error::MarketError;
use kabu_market::analysis::AnalysisError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("{0}")]
    NotFound(String),

    /// 上游限流 (429)
    #[error("{0}")]
    RateLimited(String),

    /// 上游不可用 (503)
    #[error("{0}")]
    Unavailable(String),

    /// 请求参数错误 (400)
    #[error("{0}")]
    BadRequest(String),

    /// 其他错误 (500)，信息原样透传给客户端
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} {}", status, self);
        } else {
            tracing::warn!("{} {}", status, self);
        }

        let body = Json(ApiErrorResponse::from_msg(self.to_string()));
        (status, body).into_response()
    }
}

/// 从 `MarketError` 转换
impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::NotFound(msg) => ApiError::NotFound(msg),
            MarketError::RateLimited(msg) => ApiError::RateLimited(msg),
            MarketError::Unavailable(msg) => ApiError::Unavailable(msg),
            other @ MarketError::Parse(_) => ApiError::Internal(other.to_string()),
        }
    }
}

/// 从 `AnalysisError` 转换：分析链路的任何失败都是 500
impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
