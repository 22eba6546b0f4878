//! # DTO (Data Transfer Object) 层
//!
//! 接口专用的请求/响应包装结构。行情实体本身 (`Candle`、`Quote` 等)
//! 定义在 `kabu-core` 中并直接派生 `ToSchema`。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kabu_core::market::entity::QuoteSummary;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 存活探针响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Stock API Server with Alpha Vantage")]
    pub message: String,
}

/// 图表接口查询参数
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartQuery {
    /// 区间提示 (如 `1M`、`1Y`)，原样回显，不参与过滤
    pub range_period: Option<String>,
}

/// 批量报价查询参数
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuotesQuery {
    /// 逗号分隔的代码列表，如 `AAPL,MSFT`
    pub symbols: Option<String>,
}

/// 批量报价响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuotesResponse {
    pub quotes: Vec<QuoteSummary>,
}

/// AI 分析响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    /// LLM 生成的原始文本
    pub analysis: String,
}

/// 失败响应体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "Stock symbol ZZZZ not found")]
    pub detail: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { detail: msg.into() }
    }
}
