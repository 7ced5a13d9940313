use serde::Serialize;
use tracing::debug;

use crate::bar::Candle;
use crate::constant::{Const, SwingKind};
use crate::series::Aligned;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SwingPoint {
    pub kind: SwingKind,
    pub level: Option<f64>,
}

impl SwingPoint {
    pub const NONE: Self = Self {
        kind: SwingKind::None,
        level: None,
    };

    pub fn high(level: f64) -> Self {
        Self {
            kind: SwingKind::High,
            level: Some(level),
        }
    }

    pub fn low(level: f64) -> Self {
        Self {
            kind: SwingKind::Low,
            level: Some(level),
        }
    }

    pub fn is_swing(&self) -> bool {
        self.kind != SwingKind::None
    }
}

/// Marks candles whose high (or low) is the extreme of the symmetric window
/// `[i - window_size, i + window_size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingDetector {
    window_size: usize,
}

impl Default for SwingDetector {
    fn default() -> Self {
        Self::new(Const::DEFAULT_SWING_LENGTH)
    }
}

impl SwingDetector {
    /// `window_size = 0` is accepted: with an empty window every candle is
    /// its own extreme and the high check wins, so every index is a swing high.
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn detect(&self, candles: &[Candle]) -> Aligned<SwingPoint> {
        let window = self.window_size;
        let mut rows = vec![SwingPoint::NONE; candles.len()];

        for pivot in window..candles.len().saturating_sub(window) {
            let neighbours = &candles[pivot - window..=pivot + window];
            let candle = &candles[pivot];

            // ties do not disqualify, so the pivot itself can stay in the slice
            if !neighbours.iter().any(|other| other.high > candle.high) {
                rows[pivot] = SwingPoint::high(candle.high);
            } else if !neighbours.iter().any(|other| other.low < candle.low) {
                rows[pivot] = SwingPoint::low(candle.low);
            }
        }

        debug!(
            window,
            candles = candles.len(),
            swings = rows.iter().filter(|x| x.is_swing()).count(),
            "swing detection finished"
        );
        Aligned::from_values(rows)
    }
}

pub fn detect_swings(candles: &[Candle], window_size: usize) -> Aligned<SwingPoint> {
    SwingDetector::new(window_size).detect(candles)
}
