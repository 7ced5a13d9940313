//! `market` crate 入口。
//!
//! 职责：从交易所 REST 接口或本地 CSV 获取 K 线，并转换为 `smc::Candle`。
//! 该文件只做模块装配与统一导出，具体实现位于各子模块。
//!
//! 模块分工：
//! - `interval`：K 线周期枚举。
//! - `kline`：`Kline` 记录、请求参数与响应解析。
//! - `validation`：时序/价格校验。
//! - `client`：异步 REST 客户端。
//! - `csv_source`：本地 CSV 加载。
//!
//! 快速示例：
//! ```rust
//! use market::{Interval, KlineRequest, parse_klines, to_candles};
//!
//! let request = KlineRequest::new("btcusdt", Interval::parse("4h").unwrap()).with_limit(2);
//! assert_eq!(request.symbol, "BTCUSDT");
//! assert!(request.validate().is_ok());
//!
//! let body = r#"[[1700000000000,"1.0","2.0","0.5","1.5","10",1700000059999,"15",3,"5","7.5","0"]]"#;
//! let candles = to_candles(&parse_klines(body).unwrap());
//! assert_eq!(candles[0].high, 2.0);
//! ```

mod client;
mod csv_source;
mod error;
mod interval;
mod kline;
mod validation;

pub use client::{BinanceClient, ClientConfig};
pub use csv_source::load_candles_csv;
pub use error::MarketError;
pub use interval::Interval;
pub use kline::{Kline, KlineRequest, MAX_KLINE_LIMIT, parse_klines, to_candles};
pub use validation::{validate_kline, validate_klines};
