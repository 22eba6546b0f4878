//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI 与静态资源、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kabu_market::analysis::AnalysisService;
use kabu_market::service::MarketService;

use crate::routes::{analyze, stock, system};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 两个服务在服务启动前由 DI 容器注入，生命周期与进程等同，之后只读。
#[derive(Clone)]
pub struct AppState {
    /// 行情服务 (图表、报价)
    pub market: Arc<MarketService>,
    /// AI 分析服务
    pub analysis: Arc<AnalysisService>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kabu 行情中转 API",
        version = "0.1.0",
        description = "转发并整形第三方行情数据与 LLM 分析结果的 RESTful API。",
        license(name = "MIT")
    ),
    tags(
        (name = "系统 (System)", description = "存活探针"),
        (name = "行情 (Market)", description = "日线图表、单只与批量报价"),
        (name = "分析 (Analyze)", description = "基于 LLM 的价格区间分析")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树。
///
/// # Logic
/// 1. 注册全部业务路由并收集 OpenAPI 文档。
/// 2. 挂载 Swagger UI 与 `/static` 静态资源目录。
/// 3. 应用全开放 CORS 与请求追踪中间件。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `static_dir` - 静态资源所在目录
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    // 1. 业务路由 (本服务无鉴权)
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(system::root))
        .routes(routes!(stock::get_chart))
        .routes(routes!(stock::get_quote))
        .routes(routes!(stock::get_quotes))
        .routes(routes!(analyze::analyze))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (仅适用于本地/开发环境：允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI、静态资源并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，直到收到 Ctrl-C。
///
/// # Arguments
/// * `listener` - 已绑定的 TCP 监听器
/// * `app` - `build_router` 产出的路由
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// 绑定端口并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8000"`
/// * `static_dir` - 静态资源所在目录
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
    static_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state, static_dir);

    tracing::info!("🚀 Kabu API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = TcpListener::bind(bind_addr).await?;
    serve(listener, app).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时保持运行，由外部终止进程
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received. Exiting...");
}
