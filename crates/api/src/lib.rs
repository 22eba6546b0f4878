//! # `kabu-api` - HTTP API 网关
//!
//! 本 crate 是 Kabu 行情中转服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端图表页面的 HTTP 请求并校验路径/查询/请求体
//! - 调用下层 `MarketService` 和 `AnalysisService` 完成业务操作
//! - 将领域错误映射为 HTTP 状态码

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
