//! 行情获取错误定义。

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum MarketError {
	/// 请求参数不合法（symbol 为空、limit 越界等）。
	InvalidRequest(String),
	/// 传输层失败（连接、超时、读取响应体）。
	Http(reqwest::Error),
	/// 交易所返回非 2xx 状态。
	Status { status: u16, body: String },
	/// 响应体无法解析为 kline 数组。
	Parse(String),
	/// 解析成功但数据违反时序/价格约束。
	Invalid(String),
	Io(std::io::Error),
	Csv(csv::Error),
}

impl Display for MarketError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest(msg) => write!(f, "invalid kline request: {msg}"),
			Self::Http(e) => write!(f, "http error: {e}"),
			Self::Status { status, body } => write!(f, "exchange returned status {status}: {body}"),
			Self::Parse(msg) => write!(f, "kline parse error: {msg}"),
			Self::Invalid(msg) => write!(f, "invalid kline data: {msg}"),
			Self::Io(e) => write!(f, "io error: {e}"),
			Self::Csv(e) => write!(f, "csv error: {e}"),
		}
	}
}

impl std::error::Error for MarketError {}

impl From<reqwest::Error> for MarketError {
	fn from(value: reqwest::Error) -> Self {
		Self::Http(value)
	}
}

impl From<serde_json::Error> for MarketError {
	fn from(value: serde_json::Error) -> Self {
		Self::Parse(value.to_string())
	}
}

impl From<std::io::Error> for MarketError {
	fn from(value: std::io::Error) -> Self {
		Self::Io(value)
	}
}

impl From<csv::Error> for MarketError {
	fn from(value: csv::Error) -> Self {
		Self::Csv(value)
	}
}
