use thiserror::Error;

/// # Summary
/// 行情域错误枚举，对应数据源的三类哨兵信号以及网络与解析问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - `Display` 文本即返回给客户端的 `detail`。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    // 未知代码或数据源缺少预期的载荷键
    #[error("{0}")]
    NotFound(String),
    // 数据源的配额/频率限制信号
    #[error("{0}")]
    RateLimited(String),
    // 网络失败或超时
    #[error("{0}")]
    Unavailable(String),
    // 载荷字段缺失或格式不合法
    #[error("Parse error: {0}")]
    Parse(String),
}
