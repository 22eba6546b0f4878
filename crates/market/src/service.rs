use crate::chart::{DAILY_ADJUSTED_FUNCTION, build_chart};
use crate::quote::{GLOBAL_QUOTE_FUNCTION, build_quote, build_quote_summary};
use kabu_core::common::normalize_symbol;
use kabu_core::market::entity::{ChartData, Quote, QuoteSummary};
use kabu_core::market::error::MarketError;
use kabu_core::market::port::MarketDataProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// # Summary
/// 行情领域服务，组合数据源端口与转换函数。
///
/// # Invariants
/// - 无内部可变状态，可在多个请求间共享。
/// - 所有上游错误原样向上传播，仅批量报价会吞掉单只证券的失败。
pub struct MarketService {
    // 原始行情数据源驱动
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// # Summary
    /// 获取全历史日线图表数据。
    ///
    /// # Logic
    /// 1. 无论 `range_period` 为何，总是请求完整日线复权序列。
    /// 2. 转换为 K 线与成交量柱，并回显 `range_period`。
    ///
    /// # Arguments
    /// * `symbol`: 原始证券代码，内部转为大写。
    /// * `range_period`: 客户端的区间提示。
    pub async fn chart(
        &self,
        symbol: &str,
        range_period: Option<String>,
    ) -> Result<ChartData, MarketError> {
        let normalized = normalize_symbol(symbol);
        info!("Chart request: symbol={}, range={:?}", normalized, range_period);

        let payload = self
            .provider
            .fetch(DAILY_ADJUSTED_FUNCTION, &normalized, &[("outputsize", "full")])
            .await?;

        // 错误信息沿用客户端的原始写法
        build_chart(symbol, &payload, range_period)
    }

    /// # Summary
    /// 获取单只证券的完整报价。
    ///
    /// # Arguments
    /// * `symbol`: 原始证券代码，请求上游前转为大写，错误信息保留原样。
    pub async fn quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        let normalized = normalize_symbol(symbol);
        info!("Fetching quote for {}", normalized);

        let payload = self
            .provider
            .fetch(GLOBAL_QUOTE_FUNCTION, &normalized, &[])
            .await?;

        build_quote(symbol, &payload)
    }

    async fn quote_summary(&self, symbol: &str) -> Result<QuoteSummary, MarketError> {
        let payload = self.provider.fetch(GLOBAL_QUOTE_FUNCTION, symbol, &[]).await?;
        build_quote_summary(symbol, &payload)
    }

    /// # Summary
    /// 批量获取精简报价 (尽力而为)。
    ///
    /// # Logic
    /// 1. 按输入顺序逐个串行请求。
    /// 2. 单只证券失败只记录日志并跳过，不向调用方透出细节。
    /// 3. 全部失败时返回 NotFound。
    ///
    /// # Arguments
    /// * `symbols`: 已规范化的代码列表。
    ///
    /// # Returns
    /// 成功的子集 (保持输入顺序)。
    pub async fn quotes(&self, symbols: &[String]) -> Result<Vec<QuoteSummary>, MarketError> {
        info!("Fetching quotes for symbols: {:?}", symbols);

        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.quote_summary(symbol).await {
                Ok(quote) => quotes.push(quote),
                Err(e) => warn!("Error fetching {}: {}", symbol, e),
            }
        }

        if quotes.is_empty() {
            return Err(MarketError::NotFound(
                "No valid quotes found for provided symbols".to_string(),
            ));
        }
        Ok(quotes)
    }
}
