use crate::field::{f64_field, f64_field_or, round2, u64_field};
use kabu_core::market::entity::{
    Candle, ChartData, VOLUME_DOWN_COLOR, VOLUME_UP_COLOR, VolumeBar,
};
use kabu_core::market::error::MarketError;
use serde_json::Value;

/// 日线复权接口名
pub const DAILY_ADJUSTED_FUNCTION: &str = "TIME_SERIES_DAILY_ADJUSTED";
/// 日线时间序列所在的载荷键
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
/// `dataType` 字段的固定取值
pub const DAILY_DATA_TYPE: &str = "daily";

const OPEN: &str = "1. open";
const HIGH: &str = "2. high";
const LOW: &str = "3. low";
const CLOSE: &str = "4. close";
const ADJUSTED_CLOSE: &str = "5. adjusted close";
const VOLUME: &str = "6. volume";
const SPLIT_COEFFICIENT: &str = "8. split coefficient";

/// # Summary
/// 计算复权因子。
///
/// # Logic
/// 1. 原始收盘价非零时取 `adjusted_close / raw_close`。
/// 2. 否则退回拆股系数。
pub fn adjustment_factor(raw_close: f64, adjusted_close: f64, split_coefficient: f64) -> f64 {
    if raw_close != 0.0 {
        adjusted_close / raw_close
    } else {
        split_coefficient
    }
}

/// # Summary
/// 将单个交易日记录转换为 K 线与成交量柱。
///
/// # Logic
/// 1. 读取原始收盘价、复权收盘价与拆股系数 (缺失时为 1.0)。
/// 2. 开/高/低价乘以复权因子，收盘价直接取复权收盘价，均保留两位小数。
/// 3. 以未取整的复权开盘价比较涨跌，决定成交量柱颜色。
///
/// # Arguments
/// * `date`: 交易日 (YYYY-MM-DD)。
/// * `row`: 数据源的单日记录。
///
/// # Returns
/// 字段缺失或非数值时返回 `MarketError::Parse`。
pub fn convert_daily_row(date: &str, row: &Value) -> Result<(Candle, VolumeBar), MarketError> {
    let split_coefficient = f64_field_or(row, SPLIT_COEFFICIENT, 1.0)?;
    let adjusted_close = f64_field(row, ADJUSTED_CLOSE)?;
    let raw_close = f64_field(row, CLOSE)?;
    let factor = adjustment_factor(raw_close, adjusted_close, split_coefficient);

    let adjusted_open = f64_field(row, OPEN)? * factor;

    let candle = Candle {
        time: date.to_string(),
        open: round2(adjusted_open),
        high: round2(f64_field(row, HIGH)? * factor),
        low: round2(f64_field(row, LOW)? * factor),
        close: round2(adjusted_close),
    };

    let color = if adjusted_close >= adjusted_open {
        VOLUME_UP_COLOR
    } else {
        VOLUME_DOWN_COLOR
    };

    let volume = VolumeBar {
        time: date.to_string(),
        value: u64_field(row, VOLUME)?,
        color: color.to_string(),
    };

    Ok((candle, volume))
}

/// # Summary
/// 将日线复权载荷转换为图表数据。
///
/// # Logic
/// 1. 取出 `Time Series (Daily)`，缺失则视为无数据。
/// 2. 日期按字典序升序排列 (ISO 日期下即时间顺序)。
/// 3. 逐日转换并汇总，`requested_range` 原样回显。
///
/// # Arguments
/// * `symbol`: 客户端传入的原始证券代码，仅用于错误信息。
/// * `payload`: 数据源返回的原始载荷。
/// * `requested_range`: 客户端传入的区间提示，不参与过滤。
///
/// # Returns
/// 成功返回 `ChartData`，缺少时间序列时返回 `MarketError::NotFound`。
pub fn build_chart(
    symbol: &str,
    payload: &Value,
    requested_range: Option<String>,
) -> Result<ChartData, MarketError> {
    let series = payload
        .get(DAILY_SERIES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| MarketError::NotFound(format!("No chart data found for {}", symbol)))?;

    tracing::debug!("Daily data points: {}", series.len());

    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort();

    let mut candle_data = Vec::with_capacity(dates.len());
    let mut volume_data = Vec::with_capacity(dates.len());
    for date in dates {
        let (candle, volume) = convert_daily_row(date, &series[date.as_str()])?;
        candle_data.push(candle);
        volume_data.push(volume);
    }

    tracing::debug!(
        "Final data: {} candles, {} volume points",
        candle_data.len(),
        volume_data.len()
    );

    Ok(ChartData {
        candle_data,
        volume_data,
        requested_range,
        data_type: DAILY_DATA_TYPE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(open: &str, high: &str, low: &str, close: &str, adj: &str, split: Option<&str>) -> Value {
        let mut r = json!({
            "1. open": open,
            "2. high": high,
            "3. low": low,
            "4. close": close,
            "5. adjusted close": adj,
            "6. volume": "1000",
            "7. dividend amount": "0.0000",
        });
        if let Some(s) = split {
            r["8. split coefficient"] = json!(s);
        }
        r
    }

    #[test]
    fn test_adjustment_factor() {
        assert_eq!(adjustment_factor(200.0, 100.0, 1.0), 0.5);
        assert_eq!(adjustment_factor(0.0, 100.0, 4.0), 4.0);
        assert_eq!(adjustment_factor(0.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_convert_scales_open_high_low() {
        let r = row("200.00", "210.00", "190.00", "200.00", "100.00", Some("1.0"));
        let (candle, volume) = convert_daily_row("2020-08-28", &r).unwrap();
        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.high, 105.0);
        assert_eq!(candle.low, 95.0);
        assert_eq!(candle.close, 100.0);
        assert_eq!(volume.value, 1000);
        // 复权收盘 == 复权开盘 视为上涨
        assert_eq!(volume.color, VOLUME_UP_COLOR);
    }

    #[test]
    fn test_convert_zero_close_uses_split_coefficient() {
        let r = row("10.00", "12.00", "9.00", "0", "11.00", Some("2.0"));
        let (candle, _) = convert_daily_row("2020-08-31", &r).unwrap();
        assert_eq!(candle.open, 20.0);
        assert_eq!(candle.high, 24.0);
        assert_eq!(candle.low, 18.0);
        assert_eq!(candle.close, 11.0);

        // 缺少拆股系数时默认为 1.0
        let r = row("10.00", "12.00", "9.00", "0", "11.00", None);
        let (candle, _) = convert_daily_row("2020-08-31", &r).unwrap();
        assert_eq!(candle.open, 10.0);
    }

    #[test]
    fn test_convert_down_day_color() {
        let r = row("105.00", "106.00", "99.00", "100.00", "100.00", None);
        let (_, volume) = convert_daily_row("2024-01-02", &r).unwrap();
        assert_eq!(volume.color, VOLUME_DOWN_COLOR);
    }

    #[test]
    fn test_convert_rounds_to_two_decimals() {
        let r = row("123.456", "130.0", "120.0", "125.0", "124.987", None);
        let (candle, _) = convert_daily_row("2024-01-02", &r).unwrap();
        assert_eq!(candle.close, 124.99);
        assert_eq!(candle.open, round2(123.456 * (124.987 / 125.0)));
    }

    #[test]
    fn test_convert_bad_number_is_parse_error() {
        let r = row("abc", "1", "1", "1", "1", None);
        assert!(matches!(
            convert_daily_row("2024-01-02", &r),
            Err(MarketError::Parse(_))
        ));
    }

    #[test]
    fn test_build_chart_sorted_and_complete() {
        let payload = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2024-03-05": row("1", "1", "1", "1", "1", None),
                "2023-12-29": row("1", "1", "1", "1", "1", None),
                "2024-01-02": row("1", "1", "1", "1", "1", None),
            }
        });
        let chart = build_chart("IBM", &payload, Some("1Y".into())).unwrap();
        let dates: Vec<&str> = chart.candle_data.iter().map(|c| c.time.as_str()).collect();
        assert_eq!(dates, vec!["2023-12-29", "2024-01-02", "2024-03-05"]);
        let vol_dates: Vec<&str> = chart.volume_data.iter().map(|v| v.time.as_str()).collect();
        assert_eq!(vol_dates, dates);
        assert_eq!(chart.requested_range.as_deref(), Some("1Y"));
        assert_eq!(chart.data_type, "daily");
    }

    #[test]
    fn test_build_chart_missing_series() {
        let err = build_chart("IBM", &json!({"Meta Data": {}}), None).unwrap_err();
        assert_eq!(err, MarketError::NotFound("No chart data found for IBM".into()));
    }

    #[test]
    fn test_build_chart_missing_series_keeps_raw_symbol() {
        let err = build_chart("ibm", &json!({}), None).unwrap_err();
        assert_eq!(err, MarketError::NotFound("No chart data found for ibm".into()));
    }

    #[test]
    fn test_chart_serializes_camel_case() {
        let payload = json!({"Time Series (Daily)": {"2024-01-02": row("1", "1", "1", "1", "1", None)}});
        let chart = build_chart("IBM", &payload, None).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert!(json.get("candleData").is_some());
        assert!(json.get("volumeData").is_some());
        assert_eq!(json["requestedRange"], Value::Null);
        assert_eq!(json["dataType"], "daily");
    }
}
