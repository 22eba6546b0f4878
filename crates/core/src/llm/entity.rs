use crate::config::LlmConfig;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单次补全调用的生成参数。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// 生成文本的 token 上限
    pub max_tokens: u32,
    /// 采样温度，取低值以偏向确定性输出
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

impl From<&LlmConfig> for CompletionOptions {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}
