//! 本地 CSV 行情加载。
//!
//! 表头至少包含 `datetime`（或 `time`）与 `open/high/low/close`，
//! 也接受 `open_price` 等带后缀的列名。

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use smc::Candle;

use crate::MarketError;

#[derive(Debug, Deserialize)]
struct CsvCandleRow {
	#[serde(alias = "time")]
	datetime: String,
	#[serde(alias = "open_price")]
	open: f64,
	#[serde(alias = "high_price")]
	high: f64,
	#[serde(alias = "low_price")]
	low: f64,
	#[serde(alias = "close_price")]
	close: f64,
}

pub fn load_candles_csv(file_path: impl AsRef<Path>) -> Result<Vec<Candle>, MarketError> {
	let file_path = file_path.as_ref();
	let mut reader = csv::Reader::from_path(file_path)?;
	let mut out = Vec::new();

	for row in reader.deserialize::<CsvCandleRow>() {
		let row = row?;
		let datetime = parse_datetime(&row.datetime)?;
		out.push(Candle::new(row.open, row.high, row.low, row.close).with_timestamp(datetime));
	}

	tracing::debug!(path = %file_path.display(), count = out.len(), "candles loaded from csv");
	Ok(out)
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>, MarketError> {
	let value = value.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
		return Ok(dt.with_timezone(&Utc));
	}

	let patterns = ["%Y-%m-%d %H:%M:%S%.f", "%Y/%m/%d %H:%M:%S%.f", "%Y%m%d%H%M%S%.f"];
	for pattern in patterns {
		if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
			return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
		}
	}

	// 纯数字视为 epoch 毫秒
	if let Ok(millis) = value.parse::<i64>() {
		if let Some(dt) = DateTime::<Utc>::from_timestamp_millis(millis) {
			return Ok(dt);
		}
	}

	Err(MarketError::Parse(format!("invalid datetime: {value}")))
}
