//! K 线数据校验。
//!
//! 指标算法假设输入按时间升序、相邻下标即相邻周期，
//! 因此在交给指标层之前拒绝乱序或价格异常的数据。

use crate::{Kline, MarketError};

pub fn validate_kline(kline: &Kline) -> bool {
	kline.open.is_finite()
		&& kline.high.is_finite()
		&& kline.low.is_finite()
		&& kline.close.is_finite()
		&& kline.volume.is_finite()
		&& kline.high >= kline.low
		&& kline.open_time < kline.close_time
}

pub fn validate_klines(klines: &[Kline]) -> Result<(), MarketError> {
	for (index, kline) in klines.iter().enumerate() {
		if !validate_kline(kline) {
			return Err(MarketError::Invalid(format!(
				"row {index}: malformed kline at open_time {}",
				kline.open_time
			)));
		}
	}

	for (index, pair) in klines.windows(2).enumerate() {
		if pair[1].open_time <= pair[0].open_time {
			return Err(MarketError::Invalid(format!(
				"row {}: open_time {} is not after {}",
				index + 1,
				pair[1].open_time,
				pair[0].open_time
			)));
		}
	}
	Ok(())
}
