use serde::Serialize;
use tracing::debug;

use crate::bar::Candle;
use crate::constant::Bias;
use crate::series::Aligned;

/// Fair value gap stored at the middle candle of its 3-candle pattern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Gap {
    pub kind: Bias,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub mitigated_at: Option<usize>,
}

impl Gap {
    pub const NONE: Self = Self {
        kind: Bias::None,
        top: None,
        bottom: None,
        mitigated_at: None,
    };

    fn open(kind: Bias, top: f64, bottom: f64) -> Self {
        Self {
            kind,
            top: Some(top),
            bottom: Some(bottom),
            mitigated_at: None,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_mitigated(&self) -> bool {
        self.mitigated_at.is_some()
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.kind, self.top, self.bottom) {
            (Bias::None, _, _) => None,
            (_, Some(top), Some(bottom)) => Some((top, bottom)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapDetector {
    join_consecutive: bool,
}

impl GapDetector {
    pub fn new(join_consecutive: bool) -> Self {
        Self { join_consecutive }
    }

    pub fn join_consecutive(&self) -> bool {
        self.join_consecutive
    }

    pub fn detect(&self, candles: &[Candle]) -> Aligned<Gap> {
        let mut gaps = find_gaps(candles);
        if self.join_consecutive {
            gaps = join_consecutive(gaps);
        }
        let gaps = mark_mitigation(candles, gaps);

        debug!(
            candles = candles.len(),
            join = self.join_consecutive,
            gaps = gaps.iter().filter(|x| x.is_gap()).count(),
            mitigated = gaps.iter().filter(|x| x.is_mitigated()).count(),
            "gap detection finished"
        );
        Aligned::from_values(gaps)
    }
}

pub fn detect_gaps(candles: &[Candle], join_consecutive: bool) -> Aligned<Gap> {
    GapDetector::new(join_consecutive).detect(candles)
}

fn find_gaps(candles: &[Candle]) -> Vec<Gap> {
    let mut gaps = vec![Gap::NONE; candles.len()];
    for (offset, window) in candles.windows(3).enumerate() {
        let (prev, current, next) = (&window[0], &window[1], &window[2]);
        let is_bullish = current.is_bullish();

        if is_bullish && prev.high < next.low {
            gaps[offset + 1] = Gap::open(Bias::Bullish, next.low, prev.high);
        } else if !is_bullish && prev.low > next.high {
            gaps[offset + 1] = Gap::open(Bias::Bearish, prev.low, next.high);
        }
    }
    gaps
}

/// Folds each run of same-kind gaps onto the last index of the run. The
/// running accumulation always merges into the next index, never backwards.
fn join_consecutive(gaps: Vec<Gap>) -> Vec<Gap> {
    let mut joined: Vec<Gap> = Vec::with_capacity(gaps.len());
    for gap in gaps {
        if let Some(prev) = joined.last_mut() {
            if let (Some((prev_top, prev_bottom)), Some((top, bottom))) =
                (prev.bounds(), gap.bounds())
            {
                if prev.kind == gap.kind {
                    let merged = Gap::open(gap.kind, prev_top.max(top), prev_bottom.min(bottom));
                    *prev = Gap::NONE;
                    joined.push(merged);
                    continue;
                }
            }
        }
        joined.push(gap);
    }
    joined
}

fn mark_mitigation(candles: &[Candle], gaps: Vec<Gap>) -> Vec<Gap> {
    gaps.into_iter()
        .enumerate()
        .map(|(index, gap)| {
            let Some((top, bottom)) = gap.bounds() else {
                return gap;
            };
            let mitigated_at = (index + 2..candles.len()).find(|&j| match gap.kind {
                Bias::Bullish => candles[j].low <= top,
                Bias::Bearish => candles[j].high >= bottom,
                Bias::None => false,
            });
            Gap { mitigated_at, ..gap }
        })
        .collect()
}
