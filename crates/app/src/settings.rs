use config::{Config, Environment, File};
use kabu_core::config::{AppConfig, ConfigError};
use std::collections::HashMap;
use std::path::Path;

/// 默认配置文件路径 (可缺省)
pub const DEFAULT_CONFIG_FILE: &str = "config/kabu.toml";

/// # Summary
/// 组装全局配置。
///
/// # Logic
/// 1. 以内置默认值为底。
/// 2. 叠加可选的配置文件。
/// 3. 叠加 `KABU__SECTION__KEY` 形式的环境变量。
/// 4. 注入两个必需的密钥，缺失即失败。
///
/// # Arguments
/// * `file`: 配置文件路径，不存在时忽略。
/// * `env`: 替代进程环境的变量表，`None` 表示读取真实环境 (测试用)。
/// * `lookup`: 读取密钥的函数。
///
/// # Returns
/// 成功返回只读的 `AppConfig`，否则返回 `ConfigError`。
pub fn load_config<F>(
    file: &Path,
    env: Option<HashMap<String, String>>,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let load_err = |e: config::ConfigError| ConfigError::Load(e.to_string());

    let defaults = Config::try_from(&AppConfig::default()).map_err(load_err)?;
    let config: AppConfig = Config::builder()
        .add_source(defaults)
        .add_source(File::from(file).required(false))
        .add_source(
            Environment::with_prefix("KABU")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .map_err(load_err)?
        .try_deserialize()
        .map_err(load_err)?;

    config.with_secrets(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabu_core::config::{LLM_API_KEY_ENV, MARKET_API_KEY_ENV};

    fn secrets(name: &str) -> Option<String> {
        match name {
            MARKET_API_KEY_ENV => Some("av-key".to_string()),
            LLM_API_KEY_ENV => Some("sk-key".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_when_no_sources() {
        let config = load_config(Path::new("does/not/exist.toml"), Some(HashMap::new()), secrets).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.market.timeout_secs, 15);
        assert_eq!(config.market.api_key, "av-key");
        assert_eq!(config.llm.api_key, "sk-key");
    }

    #[test]
    fn test_file_and_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kabu.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\nstatic_dir = \"public\"\n\n[llm]\nmodel = \"gpt-test\"\n",
        )
        .unwrap();

        let env = HashMap::from([("KABU__SERVER__PORT".to_string(), "9100".to_string())]);
        let config = load_config(&path, Some(env), secrets).unwrap();

        // 环境变量优先于文件
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.llm.model, "gpt-test");
        assert_eq!(config.llm.max_tokens, 500);
    }

    #[test]
    fn test_missing_secret_fails() {
        let err = load_config(Path::new("does/not/exist.toml"), Some(HashMap::new()), |_| None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(_)));
    }
}
