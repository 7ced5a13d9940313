//! K 线记录与交易所响应解析。
//!
//! 交易所返回 array-of-arrays：每行依次为
//! `[open_time, open, high, low, close, volume, close_time, quote_volume,
//! trades, taker_buy_base_volume, taker_buy_quote_volume, ...]`，
//! 价格/成交量字段为字符串，时间与笔数为整数。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smc::Candle;

use crate::{Interval, MarketError};

/// 单次请求允许的最大 K 线数量。
pub const MAX_KLINE_LIMIT: u16 = 1000;

const KLINE_COLUMNS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kline {
	/// 开盘时间（epoch 毫秒）。
	pub open_time: i64,
	pub open: f64,
	pub high: f64,
	pub low: f64,
	pub close: f64,
	pub volume: f64,
	/// 收盘时间（epoch 毫秒）。
	pub close_time: i64,
	pub quote_volume: f64,
	pub trades: u64,
	pub taker_buy_base_volume: f64,
	pub taker_buy_quote_volume: f64,
}

impl Kline {
	pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::from_timestamp_millis(self.open_time)
	}

	/// 转换为指标计算使用的 `Candle`，时间戳取开盘时间。
	pub fn to_candle(&self) -> Candle {
		Candle {
			open: self.open,
			high: self.high,
			low: self.low,
			close: self.close,
			timestamp: self.open_datetime(),
		}
	}

	fn from_row(row_index: usize, row: &[Value]) -> Result<Self, MarketError> {
		if row.len() < KLINE_COLUMNS {
			return Err(MarketError::Parse(format!(
				"row {row_index}: expected at least {KLINE_COLUMNS} columns, got {}",
				row.len()
			)));
		}

		Ok(Self {
			open_time: integer(row_index, row, 0)?,
			open: number(row_index, row, 1)?,
			high: number(row_index, row, 2)?,
			low: number(row_index, row, 3)?,
			close: number(row_index, row, 4)?,
			volume: number(row_index, row, 5)?,
			close_time: integer(row_index, row, 6)?,
			quote_volume: number(row_index, row, 7)?,
			trades: u64::try_from(integer(row_index, row, 8)?).map_err(|_| {
				MarketError::Parse(format!("row {row_index}: negative trade count"))
			})?,
			taker_buy_base_volume: number(row_index, row, 9)?,
			taker_buy_quote_volume: number(row_index, row, 10)?,
		})
	}
}

pub fn to_candles(klines: &[Kline]) -> Vec<Candle> {
	klines.iter().map(Kline::to_candle).collect()
}

/// K 线请求参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRequest {
	pub symbol: String,
	pub interval: Interval,
	pub limit: u16,
}

impl KlineRequest {
	/// 使用默认 limit（1000）创建请求，symbol 统一转为大写。
	pub fn new(symbol: impl Into<String>, interval: Interval) -> Self {
		Self {
			symbol: symbol.into().trim().to_ascii_uppercase(),
			interval,
			limit: MAX_KLINE_LIMIT,
		}
	}

	pub fn with_limit(mut self, limit: u16) -> Self {
		self.limit = limit;
		self
	}

	pub fn validate(&self) -> Result<(), MarketError> {
		if self.symbol.is_empty() {
			return Err(MarketError::InvalidRequest("symbol must not be empty".to_string()));
		}
		if self.limit == 0 || self.limit > MAX_KLINE_LIMIT {
			return Err(MarketError::InvalidRequest(format!(
				"limit must be within 1..={MAX_KLINE_LIMIT}, got {}",
				self.limit
			)));
		}
		Ok(())
	}
}

/// 解析交易所 kline 响应体。
pub fn parse_klines(body: &str) -> Result<Vec<Kline>, MarketError> {
	let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;
	rows.iter()
		.enumerate()
		.map(|(row_index, row)| Kline::from_row(row_index, row))
		.collect()
}

fn number(row_index: usize, row: &[Value], column: usize) -> Result<f64, MarketError> {
	let parsed = match &row[column] {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok(),
		_ => None,
	};
	parsed.ok_or_else(|| {
		MarketError::Parse(format!(
			"row {row_index} column {column}: not a number: {}",
			row[column]
		))
	})
}

fn integer(row_index: usize, row: &[Value], column: usize) -> Result<i64, MarketError> {
	let parsed = match &row[column] {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse::<i64>().ok(),
		_ => None,
	};
	parsed.ok_or_else(|| {
		MarketError::Parse(format!(
			"row {row_index} column {column}: not an integer: {}",
			row[column]
		))
	})
}
