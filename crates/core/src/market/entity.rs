use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 上涨日成交量柱颜色
pub const VOLUME_UP_COLOR: &str = "rgba(38, 166, 154, 0.4)";
/// 下跌日成交量柱颜色
pub const VOLUME_DOWN_COLOR: &str = "rgba(239, 83, 80, 0.4)";

/// 报价占位字段：板块
pub const PLACEHOLDER_SECTOR: &str = "Technology";
/// 报价占位字段：市值
pub const PLACEHOLDER_MARKET_CAP: u64 = 1_000_000_000_000;

/// # Summary
/// 单根日 K 线，价格已按复权因子调整。
///
/// # Invariants
/// - `high >= max(open, close)` 且 `low <= min(open, close)`，由数据源保证，本系统不做校验。
/// - 所有价格保留两位小数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Candle {
    // 交易日 (YYYY-MM-DD)
    #[schema(example = "2024-03-05")]
    pub time: String,
    #[schema(example = 170.12)]
    pub open: f64,
    #[schema(example = 172.5)]
    pub high: f64,
    #[schema(example = 169.8)]
    pub low: f64,
    #[schema(example = 171.93)]
    pub close: f64,
}

/// # Summary
/// 单日成交量柱。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VolumeBar {
    #[schema(example = "2024-03-05")]
    pub time: String,
    #[schema(example = 53_000_000)]
    pub value: u64,
    // 涨跌颜色，取值为 VOLUME_UP_COLOR 或 VOLUME_DOWN_COLOR
    #[schema(example = "rgba(38, 166, 154, 0.4)")]
    pub color: String,
}

/// # Summary
/// 图表接口的完整载荷。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub candle_data: Vec<Candle>,
    pub volume_data: Vec<VolumeBar>,
    /// 客户端请求的区间提示，原样回显，不参与过滤
    pub requested_range: Option<String>,
    #[schema(example = "daily")]
    pub data_type: String,
}

/// # Summary
/// 单只证券的完整报价。
///
/// # Invariants
/// - `name`、`sector`、`market_cap` 是固定占位值，并非真实数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(example = "AAPL Inc.")]
    pub name: String,
    #[schema(example = "Technology")]
    pub sector: String,
    #[schema(example = 171.93)]
    pub price: f64,
    #[schema(example = 2.11)]
    pub change: f64,
    #[schema(example = 1.23)]
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    #[schema(example = 1_000_000_000_000_u64)]
    pub market_cap: u64,
}

/// # Summary
/// 批量报价接口返回的精简报价。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    #[schema(example = "MSFT")]
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// # Summary
/// 客户端提交的价格点，一般直接取自图表接口的 K 线。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    #[schema(example = "2024-03-05")]
    pub time: String,
    #[schema(example = 171.93)]
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// # Summary
/// 分析请求的时间区间 (ISO 日期字符串)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    #[schema(example = "2024-01-02")]
    pub start_time: String,
    #[schema(example = "2024-03-05")]
    pub end_time: String,
}

/// # Summary
/// 由价格序列推导出的统计摘要，用于拼装提示词。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub start_price: f64,
    pub end_price: f64,
    pub high: f64,
    pub low: f64,
    /// `(high - low) / low * 100`，保留两位小数
    pub volatility: f64,
}

/// # Summary
/// AI 分析请求。
///
/// # Invariants
/// - `price_data` 按时间升序排列，首尾分别视为区间起止价。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 用户的自由文本问题
    #[schema(example = "Why did the price drop in February?")]
    pub user_query: String,
    pub time_range: TimeRange,
    pub price_data: Vec<PricePoint>,
}
