//! # `kabu-core` - 领域核心
//!
//! 只包含实体、错误枚举、外部依赖的端口 (Trait) 与全局配置结构，
//! 不依赖任何具体的 HTTP 客户端或 Web 框架实现。

pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod llm {
    pub mod entity;
    pub mod error;
    pub mod port;
}
