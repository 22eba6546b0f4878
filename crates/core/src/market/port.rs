use crate::market::error::MarketError;
use async_trait::async_trait;
use serde_json::Value;

/// # Summary
/// 行情数据源接口 (单一 query 端点的函数式 API)。
///
/// # Invariants
/// - 实现者必须在返回前完成哨兵键检查：返回 `Ok` 的载荷不含错误/限流信号。
/// - 实现者不对载荷结构做进一步校验。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 调用数据源的某个函数并返回原始 JSON 载荷。
    ///
    /// # Logic
    /// 1. 以 `function`、`symbol`、`extra_params` 与 API Key 构建 GET 请求。
    /// 2. 在固定超时内完成请求并解码 JSON。
    /// 3. 将哨兵键归类为对应的 `MarketError`。
    ///
    /// # Arguments
    /// * `function`: 数据源函数名，如 `GLOBAL_QUOTE`。
    /// * `symbol`: 已规范化的证券代码。
    /// * `extra_params`: 额外的查询参数。
    ///
    /// # Returns
    /// 成功返回未经修改的 JSON 载荷。
    async fn fetch(
        &self,
        function: &str,
        symbol: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<Value, MarketError>;
}
