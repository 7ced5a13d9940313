use std::fmt::{Display, Formatter};

use serde::Serialize;
use smc::{Analysis, AnalysisSummary, Bias, Candle, IndicatorError};

use crate::ChartOptions;

#[derive(Debug, Clone, Serialize)]
pub struct OverlayPayload {
    pub symbol: String,
    pub interval: String,
    pub options: ChartOptions,
    pub candles: Vec<CandlePoint>,
    pub swings: Vec<SwingMarker>,
    pub structure: Vec<StructureLine>,
    pub gaps: Vec<GapBox>,
    pub summary: AnalysisSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingMarker {
    pub index: usize,
    pub time: i64,
    pub price: f64,
    pub kind: String,
}

/// A BOS or CHoCH drawn from the swing that supplied the level to the candle
/// that broke it. Without a level (first break of a side) `t0 == t1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureLine {
    pub index: usize,
    pub kind: String,
    pub direction: String,
    pub level: Option<f64>,
    pub t0: i64,
    pub t1: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapBox {
    pub index: usize,
    pub direction: String,
    pub t0: i64,
    pub t1: i64,
    pub top: f64,
    pub bottom: f64,
    pub mitigated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    MissingTimestamp(usize),
    Indicator(IndicatorError),
}

impl Display for OverlayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTimestamp(index) => write!(f, "candle {index} has no timestamp"),
            Self::Indicator(e) => write!(f, "indicator error: {e}"),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<IndicatorError> for OverlayError {
    fn from(value: IndicatorError) -> Self {
        Self::Indicator(value)
    }
}

pub fn build_overlay(
    symbol: &str,
    interval: &str,
    candles: &[Candle],
    analysis: &Analysis,
    options: &ChartOptions,
) -> Result<OverlayPayload, OverlayError> {
    analysis.swings.check_against(candles)?;
    analysis.structure.check_against(candles)?;
    analysis.gaps.check_against(candles)?;

    let times = candles
        .iter()
        .enumerate()
        .map(|(index, candle)| {
            candle
                .timestamp
                .map(|t| t.timestamp())
                .ok_or(OverlayError::MissingTimestamp(index))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let last_time = times.last().copied().unwrap_or_default();

    let candle_points = candles
        .iter()
        .zip(&times)
        .map(|(candle, &time)| CandlePoint {
            time,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
        })
        .collect();

    let mut swings = Vec::new();
    if options.show_swings {
        for (index, swing) in analysis.swings.iter().enumerate() {
            let Some(price) = swing.level.filter(|_| swing.is_swing()) else {
                continue;
            };
            swings.push(SwingMarker {
                index,
                time: times[index],
                price,
                kind: swing.kind.as_str().to_string(),
            });
        }
    }

    let mut structure = Vec::new();
    if options.show_structure {
        for (index, row) in analysis.structure.iter().enumerate() {
            let t1 = times[row.broken_at.unwrap_or(index)];
            let t0 = row.origin.map(|x| times[x]).unwrap_or(t1);
            for (kind, bias) in [("BOS", row.bos), ("CHoCH", row.choch)] {
                if bias == Bias::None {
                    continue;
                }
                structure.push(StructureLine {
                    index,
                    kind: kind.to_string(),
                    direction: bias.as_str().to_string(),
                    level: row.level,
                    t0,
                    t1,
                });
            }
        }
    }

    let mut gaps = Vec::new();
    if options.show_gaps {
        for (index, gap) in analysis.gaps.iter().enumerate() {
            let Some((top, bottom)) = gap.bounds() else {
                continue;
            };
            gaps.push(GapBox {
                index,
                direction: gap.kind.as_str().to_string(),
                t0: times[index],
                t1: gap.mitigated_at.map(|x| times[x]).unwrap_or(last_time),
                top,
                bottom,
                mitigated: gap.is_mitigated(),
            });
        }
    }

    tracing::debug!(
        symbol,
        interval,
        swings = swings.len(),
        structure = structure.len(),
        gaps = gaps.len(),
        "overlay built"
    );

    Ok(OverlayPayload {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        options: options.clone(),
        candles: candle_points,
        swings,
        structure,
        gaps,
        summary: analysis.summary(),
    })
}
