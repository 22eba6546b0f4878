use crate::field::round2;
use chrono::NaiveDate;
use kabu_core::llm::entity::CompletionOptions;
use kabu_core::llm::error::LlmError;
use kabu_core::llm::port::LlmProvider;
use kabu_core::market::entity::{AnalyzeRequest, PricePoint, PriceSummary, TimeRange};
use std::sync::Arc;
use thiserror::Error;

/// # Summary
/// 分析流程错误，API 层统一映射为 500 并透传信息。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("priceData must contain at least one price point")]
    EmptyPriceData,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// # Summary
/// 计算区间波动率 `(high - low) / low * 100`，保留两位小数。
///
/// # Invariants
/// - `low == 0` 时返回 0，避免除零。
pub fn volatility(high: f64, low: f64) -> f64 {
    if low == 0.0 {
        return 0.0;
    }
    round2((high - low) / low * 100.0)
}

/// # Summary
/// 统计价格序列的首尾价、最高最低价与波动率。
///
/// # Logic
/// 1. 首个点的收盘价为起始价，最后一个点的收盘价为结束价。
/// 2. 最高/最低价在全部收盘价上取。
///
/// # Returns
/// 序列为空时返回 `AnalysisError::EmptyPriceData`。
pub fn summarize(points: &[PricePoint]) -> Result<PriceSummary, AnalysisError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(AnalysisError::EmptyPriceData),
    };

    let (high, low) = points.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(hi, lo), p| (hi.max(p.close), lo.min(p.close)),
    );

    Ok(PriceSummary {
        start_price: first.close,
        end_price: last.close,
        high,
        low,
        volatility: volatility(high, low),
    })
}

/// # Summary
/// 把 `YYYY-MM-DD` 转为 `DD-MM-YYYY`，其他形态原样返回。
pub fn format_date(raw: &str) -> String {
    let shaped = raw.len() == 10 && raw.as_bytes().get(4) == Some(&b'-') && raw.as_bytes().get(7) == Some(&b'-');
    if !shaped {
        return raw.to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// # Summary
/// 按固定模板拼装提示词。
///
/// # Arguments
/// * `symbol`: 证券代码。
/// * `range`: 客户端选定的时间区间。
/// * `summary`: 价格统计摘要。
/// * `user_query`: 用户的原始问题。
pub fn build_prompt(
    symbol: &str,
    range: &TimeRange,
    summary: &PriceSummary,
    user_query: &str,
) -> String {
    let change = summary.end_price - summary.start_price;
    let change_percent = if summary.start_price == 0.0 {
        0.0
    } else {
        round2(change / summary.start_price * 100.0)
    };

    format!(
        "Analyze the stock {symbol} for the period from {start} to {end}.\n\
         \n\
         Price data for this period:\n\
         - Start price: ${start_price:.2}\n\
         - End price: ${end_price:.2}\n\
         - Change: ${change:.2} ({change_percent:.2}%)\n\
         - Period high: ${high:.2}\n\
         - Period low: ${low:.2}\n\
         - Volatility (high-low range): {volatility:.2}%\n\
         \n\
         User question: {user_query}\n\
         \n\
         Provide a concise analysis that answers the question, referencing notable price movements, \
         relevant market events or news for {symbol} during this period, and the overall trend. \
         Keep the answer under 200 words.",
        symbol = symbol,
        start = format_date(&range.start_time),
        end = format_date(&range.end_time),
        start_price = summary.start_price,
        end_price = summary.end_price,
        change = change,
        change_percent = change_percent,
        high = summary.high,
        low = summary.low,
        volatility = summary.volatility,
        user_query = user_query,
    )
}

/// # Summary
/// 基于 LLM 的价格区间分析服务。
///
/// # Invariants
/// - 不调用行情数据源，只使用客户端提交的价格序列。
/// - 生成参数在构造时固定。
pub struct AnalysisService {
    llm: Arc<dyn LlmProvider>,
    options: CompletionOptions,
}

impl AnalysisService {
    pub fn new(llm: Arc<dyn LlmProvider>, options: CompletionOptions) -> Self {
        Self { llm, options }
    }

    /// # Summary
    /// 对一段价格走势生成文字分析。
    ///
    /// # Logic
    /// 1. 统计价格序列。
    /// 2. 拼装提示词。
    /// 3. 调用 LLM 并原样返回生成文本，不重试。
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<String, AnalysisError> {
        let summary = summarize(&request.price_data)?;
        let prompt = build_prompt(
            &request.symbol,
            &request.time_range,
            &summary,
            &request.user_query,
        );

        tracing::info!(
            "Analyzing {} over {} points ({} -> {})",
            request.symbol,
            request.price_data.len(),
            request.time_range.start_time,
            request.time_range.end_time
        );

        let analysis = self.llm.complete(&prompt, &self.options).await?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint {
                time: format!("2024-01-{:02}", i + 1),
                close: *c,
                open: None,
                high: None,
                low: None,
                volume: None,
            })
            .collect()
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&points(&[100.0, 150.0, 90.0])).unwrap();
        assert_eq!(summary.start_price, 100.0);
        assert_eq!(summary.end_price, 90.0);
        assert_eq!(summary.high, 150.0);
        assert_eq!(summary.low, 90.0);
        assert_eq!(summary.volatility, 66.67);
    }

    #[test]
    fn test_summarize_single_point() {
        let summary = summarize(&points(&[42.0])).unwrap();
        assert_eq!(summary.start_price, 42.0);
        assert_eq!(summary.end_price, 42.0);
        assert_eq!(summary.volatility, 0.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Err(AnalysisError::EmptyPriceData));
    }

    #[test]
    fn test_volatility_zero_low() {
        assert_eq!(volatility(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "05-03-2024");
        assert_eq!(format_date("2024/03/05"), "2024/03/05");
        assert_eq!(format_date("2024-3-5"), "2024-3-5");
        assert_eq!(format_date("2024-13-45"), "2024-13-45");
        assert_eq!(format_date("2024-03-05T10:00:00Z"), "2024-03-05T10:00:00Z");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_build_prompt_embeds_figures() {
        let range = TimeRange {
            start_time: "2024-01-01".into(),
            end_time: "2024-03-05".into(),
        };
        let summary = summarize(&points(&[100.0, 150.0, 90.0])).unwrap();
        let prompt = build_prompt("AAPL", &range, &summary, "Why the drop?");

        assert!(prompt.contains("AAPL"));
        assert!(prompt.contains("from 01-01-2024 to 05-03-2024"));
        assert!(prompt.contains("Start price: $100.00"));
        assert!(prompt.contains("End price: $90.00"));
        assert!(prompt.contains("Period high: $150.00"));
        assert!(prompt.contains("Period low: $90.00"));
        assert!(prompt.contains("66.67%"));
        assert!(prompt.contains("User question: Why the drop?"));
    }
}
