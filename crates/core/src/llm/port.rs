use crate::llm::entity::CompletionOptions;
use crate::llm::error::LlmError;
use async_trait::async_trait;

/// # Summary
/// 文本补全服务接口，提示词的内容对实现者不透明。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 不做任何重试。
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// # Summary
    /// 对给定提示词生成回复。
    ///
    /// # Arguments
    /// * `prompt` - 完整的用户提示词。
    /// * `options` - 长度上限与采样温度。
    ///
    /// # Returns
    /// * 成功返回生成的文本。
    /// * 失败返回 `Err(LlmError)`。
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, LlmError>;
}
