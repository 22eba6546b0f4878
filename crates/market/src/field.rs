use kabu_core::market::error::MarketError;
use serde_json::Value;

/// # Summary
/// 保留两位小数。
///
/// # Logic
/// 按二进制精确值做十进制舍入，恰为一半时取偶数位 (`0.125` -> `0.12`)。
pub(crate) fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse::<f64>().unwrap_or(value)
}

/// # Summary
/// 读取数值字段。数据源以字符串承载数字，同时兼容原生 JSON 数字。
pub(crate) fn f64_field(row: &Value, key: &str) -> Result<f64, MarketError> {
    match row.get(key) {
        Some(v) => value_to_f64(v, key),
        None => Err(MarketError::Parse(format!("missing field '{}'", key))),
    }
}

/// 读取可选数值字段，缺失时返回 `default`
pub(crate) fn f64_field_or(row: &Value, key: &str, default: f64) -> Result<f64, MarketError> {
    match row.get(key) {
        Some(v) => value_to_f64(v, key),
        None => Ok(default),
    }
}

pub(crate) fn u64_field(row: &Value, key: &str) -> Result<u64, MarketError> {
    let invalid = || MarketError::Parse(format!("invalid integer in '{}'", key));
    match row.get(key) {
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid()),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(invalid),
        Some(_) => Err(invalid()),
        None => Err(MarketError::Parse(format!("missing field '{}'", key))),
    }
}

fn value_to_f64(value: &Value, key: &str) -> Result<f64, MarketError> {
    let invalid = || MarketError::Parse(format!("invalid number in '{}'", key));
    match value {
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        _ => Err(invalid()),
    }
}
