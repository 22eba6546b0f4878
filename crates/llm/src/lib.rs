//! # `kabu-llm` - 文本补全服务接入
//!
//! 提供 `LlmProvider` 端口的 OpenAI 兼容 (`/chat/completions`) 实现。

pub mod openai;
