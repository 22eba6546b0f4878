use thiserror::Error;

/// # Summary
/// LLM 调用错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("LLM network error: {0}")]
    Network(String),
    /// 服务端返回非 2xx 状态
    #[error("LLM API error: {0}")]
    Api(String),
    #[error("LLM returned an empty completion")]
    EmptyResponse,
}
