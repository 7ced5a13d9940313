//! 交易所 REST 客户端（只读 kline 接口）。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Kline, KlineRequest, MarketError, parse_klines, validate_klines};

const KLINES_PATH: &str = "/api/v3/uiKlines";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	pub base_url: String,
	pub timeout_ms: u64,
	pub user_agent: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: "https://api.binance.com".to_string(),
			timeout_ms: 10_000,
			user_agent: concat!("smc-market/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}
}

impl ClientConfig {
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}
}

#[derive(Debug, Clone)]
pub struct BinanceClient {
	config: ClientConfig,
	http: reqwest::Client,
}

impl BinanceClient {
	pub fn new(config: ClientConfig) -> Result<Self, MarketError> {
		let http = reqwest::Client::builder()
			.timeout(Duration::from_millis(config.timeout_ms))
			.user_agent(&config.user_agent)
			.build()?;
		Ok(Self { config, http })
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	fn klines_url(&self) -> String {
		format!("{}{}", self.config.base_url.trim_end_matches('/'), KLINES_PATH)
	}

	/// 拉取一段 K 线，返回前会做时序/价格校验。
	pub async fn fetch_klines(&self, request: &KlineRequest) -> Result<Vec<Kline>, MarketError> {
		request.validate()?;

		let url = self.klines_url();
		tracing::debug!(
			url = %url,
			symbol = %request.symbol,
			interval = %request.interval,
			limit = request.limit,
			"fetching klines"
		);

		let limit = request.limit.to_string();
		let response = self
			.http
			.get(&url)
			.query(&[
				("symbol", request.symbol.as_str()),
				("interval", request.interval.as_str()),
				("limit", limit.as_str()),
			])
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;
		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), symbol = %request.symbol, "kline request rejected");
			return Err(MarketError::Status {
				status: status.as_u16(),
				body,
			});
		}

		let klines = parse_klines(&body)?;
		validate_klines(&klines)?;
		tracing::debug!(count = klines.len(), symbol = %request.symbol, "klines received");
		Ok(klines)
	}
}
