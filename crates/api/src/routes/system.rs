use axum::Json;

use crate::types::RootResponse;

/// 服务存活探针
#[utoipa::path(
    get,
    path = "/",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务在线", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Stock API Server with Alpha Vantage".to_string(),
    })
}
