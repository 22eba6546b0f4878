use crate::field::{f64_field, round2, u64_field};
use kabu_core::common::normalize_symbol;
use kabu_core::market::entity::{
    PLACEHOLDER_MARKET_CAP, PLACEHOLDER_SECTOR, Quote, QuoteSummary,
};
use kabu_core::market::error::MarketError;
use serde_json::Value;

/// 实时报价接口名
pub const GLOBAL_QUOTE_FUNCTION: &str = "GLOBAL_QUOTE";
/// 报价记录所在的载荷键
pub const GLOBAL_QUOTE_KEY: &str = "Global Quote";

const SYMBOL: &str = "01. symbol";
const OPEN: &str = "02. open";
const HIGH: &str = "03. high";
const LOW: &str = "04. low";
const PRICE: &str = "05. price";
const VOLUME: &str = "06. volume";
const CHANGE: &str = "09. change";
const CHANGE_PERCENT: &str = "10. change percent";

/// # Summary
/// 解析百分比字符串，去掉末尾的 `%`。
///
/// # Arguments
/// * `raw`: 如 `"1.23%"` 或 `"-0.5%"`。
pub fn parse_percent(raw: &str) -> Result<f64, MarketError> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| MarketError::Parse(format!("invalid percent '{}'", raw)))
}

/// # Summary
/// 拆分逗号分隔的代码列表。
///
/// # Logic
/// 1. 按 `,` 拆分，逐个去除空白并转为大写。
/// 2. 丢弃空项，保留原始顺序与重复项。
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_symbol)
        .filter(|s| !s.is_empty())
        .collect()
}

/// # Summary
/// 取出并校验 `Global Quote` 记录。
///
/// # Logic
/// 1. 缺少 `Global Quote` 键 → NotFound("No quote data found")。
/// 2. 记录为空或缺少 `01. symbol` → NotFound("Invalid quote data")。
fn quote_record<'a>(symbol: &str, payload: &'a Value) -> Result<&'a Value, MarketError> {
    let record = payload
        .get(GLOBAL_QUOTE_KEY)
        .ok_or_else(|| MarketError::NotFound(format!("No quote data found for {}", symbol)))?;

    match record.as_object() {
        Some(obj) if obj.contains_key(SYMBOL) => Ok(record),
        _ => Err(MarketError::NotFound(format!(
            "Invalid quote data for {}",
            symbol
        ))),
    }
}

/// # Summary
/// 将报价载荷转换为批量接口使用的精简报价。
///
/// # Arguments
/// * `symbol`: 已规范化的证券代码。
/// * `payload`: 数据源返回的原始载荷。
pub fn build_quote_summary(symbol: &str, payload: &Value) -> Result<QuoteSummary, MarketError> {
    let record = quote_record(symbol, payload)?;
    summary_from_record(symbol, record)
}

fn summary_from_record(symbol: &str, record: &Value) -> Result<QuoteSummary, MarketError> {
    let percent = record
        .get(CHANGE_PERCENT)
        .and_then(Value::as_str)
        .ok_or_else(|| MarketError::Parse(format!("missing field '{}'", CHANGE_PERCENT)))?;

    Ok(QuoteSummary {
        symbol: symbol.to_string(),
        price: round2(f64_field(record, PRICE)?),
        change: round2(f64_field(record, CHANGE)?),
        change_percent: round2(parse_percent(percent)?),
    })
}

/// # Summary
/// 将报价载荷转换为完整报价。
///
/// # Logic
/// 1. 校验 `Global Quote` 记录，错误信息保留客户端传入的原始写法。
/// 2. 价格类字段保留两位小数，成交量取整数。
/// 3. 代码与名称使用规范化后的代码，板块、市值填充固定占位值。
///
/// # Arguments
/// * `requested`: 客户端传入的原始证券代码 (如路径参数 `aapl`)。
/// * `payload`: 数据源返回的原始载荷。
pub fn build_quote(requested: &str, payload: &Value) -> Result<Quote, MarketError> {
    let symbol = normalize_symbol(requested);
    let record = quote_record(requested, payload)?;
    let summary = summary_from_record(&symbol, record)?;

    Ok(Quote {
        name: format!("{} Inc.", symbol),
        sector: PLACEHOLDER_SECTOR.to_string(),
        price: summary.price,
        change: summary.change,
        change_percent: summary.change_percent,
        open: round2(f64_field(record, OPEN)?),
        high: round2(f64_field(record, HIGH)?),
        low: round2(f64_field(record, LOW)?),
        volume: u64_field(record, VOLUME)?,
        market_cap: PLACEHOLDER_MARKET_CAP,
        symbol: summary.symbol,
    })
}
