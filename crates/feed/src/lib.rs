//! # `kabu-feed` - 行情数据源接入
//!
//! 提供 `MarketDataProvider` 端口的 Alpha Vantage 实现。

pub mod alpha_vantage;
