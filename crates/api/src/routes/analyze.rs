use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use kabu_core::market::entity::AnalyzeRequest;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{AnalyzeResponse, ApiErrorResponse};

/// 对一段价格走势生成 AI 分析
///
/// 请求体非法、价格序列为空或 LLM 调用失败均返回 500 并透传错误信息。
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "分析 (Analyze)",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "分析成功", body = AnalyzeResponse),
        (status = 500, description = "分析失败", body = ApiErrorResponse)
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Internal(e.body_text()))?;
    let analysis = state.analysis.analyze(&request).await?;
    Ok(Json(AnalyzeResponse { analysis }))
}
