use axum::Json;
use axum::extract::{Path, Query, State};
use kabu_core::market::entity::{ChartData, Quote};
use kabu_market::quote::parse_symbol_list;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ChartQuery, QuotesQuery, QuotesResponse};

/// 获取日线图表数据
///
/// 总是返回完整的日线复权历史，`range_period` 仅原样回显。
#[utoipa::path(
    get,
    path = "/api/stock/{symbol}/chart",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码"),
        ChartQuery
    ),
    responses(
        (status = 200, description = "获取成功", body = ChartData),
        (status = 404, description = "代码不存在或无数据", body = ApiErrorResponse),
        (status = 429, description = "上游限流", body = ApiErrorResponse),
        (status = 503, description = "上游不可用", body = ApiErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartData>, ApiError> {
    let chart = state.market.chart(&symbol, query.range_period).await?;
    Ok(Json(chart))
}

/// 获取单只证券报价
///
/// `name`、`sector`、`marketCap` 为固定占位值。
#[utoipa::path(
    get,
    path = "/api/stock/{symbol}/quote",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "获取成功", body = Quote),
        (status = 404, description = "代码不存在或无数据", body = ApiErrorResponse),
        (status = 429, description = "上游限流", body = ApiErrorResponse),
        (status = 503, description = "上游不可用", body = ApiErrorResponse)
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let quote = state.market.quote(&symbol).await?;
    Ok(Json(quote))
}

/// 批量获取精简报价
///
/// 逐个串行请求，单只失败会被跳过；全部失败时返回 404。
#[utoipa::path(
    get,
    path = "/api/stocks/quotes",
    tag = "行情 (Market)",
    params(QuotesQuery),
    responses(
        (status = 200, description = "至少一只成功", body = QuotesResponse),
        (status = 400, description = "缺少 symbols 参数", body = ApiErrorResponse),
        (status = 404, description = "全部失败", body = ApiErrorResponse)
    )
)]
pub async fn get_quotes(
    State(state): State<AppState>,
    Query(query): Query<QuotesQuery>,
) -> Result<Json<QuotesResponse>, ApiError> {
    let raw = query
        .symbols
        .ok_or_else(|| ApiError::BadRequest("Missing required query parameter: symbols".into()))?;

    let symbols = parse_symbol_list(&raw);
    let quotes = state.market.quotes(&symbols).await?;
    Ok(Json(QuotesResponse { quotes }))
}
