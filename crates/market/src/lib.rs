//! # `kabu-market` - 行情转换与分析
//!
//! - `chart` / `quote`：把数据源载荷转换为前端图表与报价结构的纯函数。
//! - `analysis`：价格序列统计、提示词拼装与 LLM 分析服务。
//! - `service`：组合数据源端口与转换函数的行情服务。

pub mod analysis;
pub mod chart;
mod field;
pub mod quote;
pub mod service;
