use async_trait::async_trait;
use kabu_core::common::install_crypto_provider;
use kabu_core::config::MarketDataConfig;
use kabu_core::market::error::MarketError;
use kabu_core::market::port::MarketDataProvider;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 未知代码等调用错误的哨兵键
pub const ERROR_MESSAGE_KEY: &str = "Error Message";
/// 配额耗尽的哨兵键
pub const NOTE_KEY: &str = "Note";
/// 调用频率限制的哨兵键
pub const INFORMATION_KEY: &str = "Information";

/// # Summary
/// 数据源响应体的归类结果，将传输与语义解释解耦。
///
/// # Invariants
/// - 三个哨兵键互斥，按 `Error Message` → `Note` → `Information` 的顺序检查。
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// 正常数据载荷，未经修改
    Data(Value),
    /// `Error Message`：代码不存在或参数非法
    UnknownSymbol(String),
    /// `Note`：配额耗尽
    RateLimited(String),
    /// `Information`：调用频率过高
    Throttled(String),
}

impl ProviderReply {
    /// # Summary
    /// 检查响应体中的哨兵键并归类。
    ///
    /// # Logic
    /// 1. 非对象载荷直接视为数据。
    /// 2. 依次查找三个哨兵键，命中即返回对应变体并携带数据源原文。
    ///
    /// # Arguments
    /// * `body`: 已解码的 JSON 响应体。
    ///
    /// # Returns
    /// 归类后的 `ProviderReply`。
    pub fn classify(body: Value) -> Self {
        let sentinel = |key: &str| {
            body.get(key).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        };

        if let Some(msg) = sentinel(ERROR_MESSAGE_KEY) {
            return ProviderReply::UnknownSymbol(msg);
        }
        if let Some(msg) = sentinel(NOTE_KEY) {
            return ProviderReply::RateLimited(msg);
        }
        if let Some(msg) = sentinel(INFORMATION_KEY) {
            return ProviderReply::Throttled(msg);
        }
        ProviderReply::Data(body)
    }

    /// # Summary
    /// 将归类结果转换为行情域结果。
    ///
    /// # Arguments
    /// * `symbol`: 本次请求的证券代码，用于拼装错误信息。
    pub fn into_result(self, symbol: &str) -> Result<Value, MarketError> {
        match self {
            ProviderReply::Data(body) => Ok(body),
            ProviderReply::UnknownSymbol(msg) => {
                tracing::warn!("Alpha Vantage error for {}: {}", symbol, msg);
                Err(MarketError::NotFound(format!("Stock symbol {} not found", symbol)))
            }
            ProviderReply::RateLimited(msg) => {
                tracing::warn!("Alpha Vantage note: {}", msg);
                Err(MarketError::RateLimited("API rate limit exceeded".to_string()))
            }
            ProviderReply::Throttled(msg) => {
                tracing::warn!("Alpha Vantage information: {}", msg);
                Err(MarketError::RateLimited(
                    "API call frequency limit reached".to_string(),
                ))
            }
        }
    }
}

/// # Summary
/// Alpha Vantage 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，超时在构造时固定。
/// - API Key 只出现在请求参数中，不写入日志。
#[derive(Clone)]
pub struct AlphaVantageProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// query 端点地址
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    /// # Summary
    /// 根据配置创建提供者。
    ///
    /// # Logic
    /// 1. 注册 rustls 加密后端。
    /// 2. 按 `timeout_secs` 配置请求超时 (默认 15 秒)。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 行情数据源配置，必须已注入 API Key。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `MarketError::Unavailable`。
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketError> {
        install_crypto_provider();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn unavailable(err: reqwest::Error) -> MarketError {
        tracing::error!("Alpha Vantage request error: {}", err);
        MarketError::Unavailable("External API service unavailable".to_string())
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    /// # Summary
    /// 调用 Alpha Vantage 的函数式接口。
    ///
    /// # Logic
    /// 1. 组装 `function`、`symbol`、额外参数与 `apikey`。
    /// 2. 发起 GET 请求，超时或传输失败统一视为服务不可用。
    /// 3. 解码 JSON 并记录顶层键。
    /// 4. 经哨兵归类后返回。
    async fn fetch(
        &self,
        function: &str,
        symbol: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<Value, MarketError> {
        tracing::info!(
            "Alpha Vantage API call: {} for {} with params: {:?}",
            function,
            symbol,
            extra_params
        );

        let mut params: Vec<(&str, &str)> = Vec::with_capacity(extra_params.len() + 3);
        params.push(("function", function));
        params.push(("symbol", symbol));
        params.extend_from_slice(extra_params);
        params.push(("apikey", self.api_key.as_str()));

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(Self::unavailable)?;

        let body: Value = resp.json().await.map_err(Self::unavailable)?;

        match body.as_object() {
            Some(obj) => tracing::debug!(
                "Alpha Vantage response keys: {:?}",
                obj.keys().collect::<Vec<_>>()
            ),
            None => tracing::debug!("Alpha Vantage response keys: Not a dict"),
        }

        ProviderReply::classify(body).into_result(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_plain_data() {
        let body = json!({"Global Quote": {"01. symbol": "AAPL"}});
        assert_eq!(
            ProviderReply::classify(body.clone()),
            ProviderReply::Data(body)
        );
    }

    #[test]
    fn test_classify_sentinels() {
        assert_eq!(
            ProviderReply::classify(json!({"Error Message": "Invalid API call"})),
            ProviderReply::UnknownSymbol("Invalid API call".into())
        );
        assert_eq!(
            ProviderReply::classify(json!({"Note": "5 calls per minute"})),
            ProviderReply::RateLimited("5 calls per minute".into())
        );
        assert_eq!(
            ProviderReply::classify(json!({"Information": "premium endpoint"})),
            ProviderReply::Throttled("premium endpoint".into())
        );
    }

    #[test]
    fn test_classify_error_key_takes_precedence() {
        let body = json!({"Note": "limit", "Error Message": "bad symbol", "Information": "x"});
        assert!(matches!(
            ProviderReply::classify(body),
            ProviderReply::UnknownSymbol(_)
        ));

        let body = json!({"Information": "x", "Note": "limit"});
        assert!(matches!(
            ProviderReply::classify(body),
            ProviderReply::RateLimited(_)
        ));
    }

    #[test]
    fn test_classify_non_object_is_data() {
        assert_eq!(
            ProviderReply::classify(json!([1, 2, 3])),
            ProviderReply::Data(json!([1, 2, 3]))
        );
    }

    #[test]
    fn test_into_result_maps_to_market_error() {
        assert_eq!(
            ProviderReply::UnknownSymbol("x".into()).into_result("ZZZZ"),
            Err(MarketError::NotFound("Stock symbol ZZZZ not found".into()))
        );
        assert_eq!(
            ProviderReply::RateLimited("x".into()).into_result("AAPL"),
            Err(MarketError::RateLimited("API rate limit exceeded".into()))
        );
        assert_eq!(
            ProviderReply::Throttled("x".into()).into_result("AAPL"),
            Err(MarketError::RateLimited("API call frequency limit reached".into()))
        );
    }
}
