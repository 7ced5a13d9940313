use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwingKind {
    High,
    Low,
    #[default]
    None,
}

impl SwingKind {
    /// 1 for a swing high, -1 for a swing low.
    pub fn sign(self) -> Option<i32> {
        match self {
            Self::High => Some(1),
            Self::Low => Some(-1),
            Self::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Low => "Low",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    #[default]
    None,
}

impl Bias {
    pub fn sign(self) -> Option<i32> {
        match self {
            Self::Bullish => Some(1),
            Self::Bearish => Some(-1),
            Self::None => None,
        }
    }

    pub fn is_some(self) -> bool {
        self != Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::None => "None",
        }
    }
}

pub struct Const;

impl Const {
    pub const DEFAULT_SWING_LENGTH: usize = 50;
    pub const CHOCH_PATTERN_LEN: usize = 4;
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorError {
    InvalidArgument(String),
    Misaligned { expected: usize, actual: usize },
    WorkerPanicked(&'static str),
}

impl Display for IndicatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(v) => write!(f, "invalid argument: {v}"),
            Self::Misaligned { expected, actual } => {
                write!(f, "series misaligned: expected {expected} rows, got {actual}")
            }
            Self::WorkerPanicked(v) => write!(f, "indicator worker panicked: {v}"),
        }
    }
}

impl std::error::Error for IndicatorError {}

#[derive(Debug)]
pub enum DataError {
    InvalidDatetime(String),
    UnsupportedFormat(String),
    Indicator(IndicatorError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Polars(polars::error::PolarsError),
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDatetime(v) => write!(f, "invalid datetime: {v}"),
            Self::UnsupportedFormat(v) => write!(f, "unsupported file format: {v}"),
            Self::Indicator(e) => write!(f, "indicator error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
            Self::Polars(e) => write!(f, "polars error: {e}"),
        }
    }
}

impl std::error::Error for DataError {}

impl From<IndicatorError> for DataError {
    fn from(value: IndicatorError) -> Self {
        Self::Indicator(value)
    }
}

impl From<std::io::Error> for DataError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for DataError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<polars::error::PolarsError> for DataError {
    fn from(value: polars::error::PolarsError) -> Self {
        Self::Polars(value)
    }
}
