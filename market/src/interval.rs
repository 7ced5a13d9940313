//! K 线周期枚举（与交易所 `interval` 参数一一对应）。

use serde::{Deserialize, Serialize};

use crate::MarketError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
	S1,
	M1,
	M3,
	M5,
	M15,
	M30,
	H1,
	H2,
	H4,
	H6,
	H8,
	H12,
	D1,
	D3,
	W1,
	Mo1,
}

impl Interval {
	pub const ALL: [Interval; 16] = [
		Self::S1,
		Self::M1,
		Self::M3,
		Self::M5,
		Self::M15,
		Self::M30,
		Self::H1,
		Self::H2,
		Self::H4,
		Self::H6,
		Self::H8,
		Self::H12,
		Self::D1,
		Self::D3,
		Self::W1,
		Self::Mo1,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::S1 => "1s",
			Self::M1 => "1m",
			Self::M3 => "3m",
			Self::M5 => "5m",
			Self::M15 => "15m",
			Self::M30 => "30m",
			Self::H1 => "1h",
			Self::H2 => "2h",
			Self::H4 => "4h",
			Self::H6 => "6h",
			Self::H8 => "8h",
			Self::H12 => "12h",
			Self::D1 => "1d",
			Self::D3 => "3d",
			Self::W1 => "1w",
			Self::Mo1 => "1M",
		}
	}

	/// `1m` 为分钟、`1M` 为月，因此只对首尾空白做规整，不做大小写折叠。
	pub fn parse(value: &str) -> Result<Self, MarketError> {
		let value = value.trim();
		Self::ALL
			.into_iter()
			.find(|x| x.as_str() == value)
			.ok_or_else(|| MarketError::InvalidRequest(format!("unknown interval: {value}")))
	}
}

impl std::fmt::Display for Interval {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
