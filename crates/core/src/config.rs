use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 行情数据源 API Key 的环境变量名
pub const MARKET_API_KEY_ENV: &str = "ALPHA_VANTAGE_PREM_API_KEY";
/// LLM 服务 API Key 的环境变量名
pub const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// # Summary
/// 配置加载错误。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 必需的密钥未通过环境变量提供
    #[error("{0} not found in environment variables")]
    MissingSecret(&'static str),
    /// 配置源读取或反序列化失败
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

/// 全局应用配置
///
/// # Invariants
/// - 启动时组装一次，之后只读注入到各组件的构造函数中。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub market: MarketDataConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静态资源目录，挂载在 `/static` 下
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 默认日志过滤级别，`RUST_LOG` 存在时以其为准
    pub level: String,
    /// 日志文件目录，为空则只输出到控制台
    pub dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: "static".to_string(),
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.3,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// # Summary
    /// 注入两个必需的密钥，任一缺失即失败。
    ///
    /// # Logic
    /// 1. 通过 `lookup` 读取行情与 LLM 的 API Key (通常是 `std::env::var`)。
    /// 2. 空白值视同缺失。
    ///
    /// # Arguments
    /// * `lookup`: 按变量名取值的函数，便于测试时替换环境。
    ///
    /// # Returns
    /// 成功返回带密钥的配置，否则返回 `ConfigError::MissingSecret`。
    pub fn with_secrets<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingSecret(name))
        };

        self.market.api_key = read(MARKET_API_KEY_ENV)?;
        self.llm.api_key = read(LLM_API_KEY_ENV)?;
        Ok(self)
    }

    /// 监听地址，如 `"0.0.0.0:8000"`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.market.timeout_secs, 15);
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_with_secrets_ok() {
        let env = env_of(&[(MARKET_API_KEY_ENV, "av-key"), (LLM_API_KEY_ENV, " sk-key ")]);
        let config = AppConfig::default()
            .with_secrets(|k| env.get(k).cloned())
            .unwrap();
        assert_eq!(config.market.api_key, "av-key");
        assert_eq!(config.llm.api_key, "sk-key");
    }

    #[test]
    fn test_missing_market_key_fails_fast() {
        let env = env_of(&[(LLM_API_KEY_ENV, "sk-key")]);
        let err = AppConfig::default()
            .with_secrets(|k| env.get(k).cloned())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(MARKET_API_KEY_ENV)));
        assert_eq!(
            err.to_string(),
            "ALPHA_VANTAGE_PREM_API_KEY not found in environment variables"
        );
    }

    #[test]
    fn test_blank_llm_key_is_missing() {
        let env = env_of(&[(MARKET_API_KEY_ENV, "av-key"), (LLM_API_KEY_ENV, "   ")]);
        let err = AppConfig::default()
            .with_secrets(|k| env.get(k).cloned())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(LLM_API_KEY_ENV)));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let env = env_of(&[(MARKET_API_KEY_ENV, "av-key"), (LLM_API_KEY_ENV, "sk-key")]);
        let config = AppConfig::default()
            .with_secrets(|k| env.get(k).cloned())
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("av-key"));
        assert!(!json.contains("sk-key"));
    }
}
