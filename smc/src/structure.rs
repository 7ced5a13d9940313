use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::bar::Candle;
use crate::constant::{Bias, Const, IndicatorError, SwingKind};
use crate::series::Aligned;
use crate::swing::{SwingDetector, SwingPoint};

/// BOS / CHoCH record for one candle.
///
/// `level` is the swing level that was broken (BOS) or the second point of
/// the CHoCH pattern, and `origin` is the index of the swing that level came
/// from. When both a BOS and a CHoCH fire on the same candle the CHoCH level
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StructureBreak {
    pub bos: Bias,
    pub choch: Bias,
    pub level: Option<f64>,
    pub broken_at: Option<usize>,
    pub origin: Option<usize>,
}

impl StructureBreak {
    pub fn is_break(&self) -> bool {
        self.bos.is_some() || self.choch.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SwingRef {
    index: usize,
    level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureBreakAnalyzer {
    swing_length: usize,
    close_break: bool,
}

impl Default for StructureBreakAnalyzer {
    fn default() -> Self {
        Self {
            swing_length: Const::DEFAULT_SWING_LENGTH,
            close_break: true,
        }
    }
}

impl StructureBreakAnalyzer {
    pub fn new(swing_length: usize, close_break: bool) -> Result<Self, IndicatorError> {
        if swing_length == 0 {
            return Err(IndicatorError::InvalidArgument(
                "swing_length must be positive".to_string(),
            ));
        }
        Ok(Self {
            swing_length,
            close_break,
        })
    }

    pub fn swing_length(&self) -> usize {
        self.swing_length
    }

    /// Accepted for configuration compatibility. Breaks are always measured
    /// on swing levels, never on candle closes.
    pub fn close_break(&self) -> bool {
        self.close_break
    }

    pub fn analyze(&self, candles: &[Candle]) -> Aligned<StructureBreak> {
        let swings = SwingDetector::new(self.swing_length).detect(candles);
        analyze_swings(&swings)
    }
}

pub fn detect_structure_breaks(
    candles: &[Candle],
    swing_length: usize,
    close_break: bool,
) -> Result<Aligned<StructureBreak>, IndicatorError> {
    Ok(StructureBreakAnalyzer::new(swing_length, close_break)?.analyze(candles))
}

/// Classifies breaks from an already computed swing series.
pub fn analyze_swings(swings: &Aligned<SwingPoint>) -> Aligned<StructureBreak> {
    let mut rows = vec![StructureBreak::default(); swings.len()];
    let mut last_high: Option<SwingRef> = None;
    let mut last_low: Option<SwingRef> = None;
    let mut recent: VecDeque<(SwingKind, SwingRef)> =
        VecDeque::with_capacity(Const::CHOCH_PATTERN_LEN + 1);

    for (index, swing) in swings.iter().enumerate() {
        let Some(level) = swing.level else {
            continue;
        };
        let current = SwingRef { index, level };
        let row = &mut rows[index];

        match swing.kind {
            SwingKind::High => {
                // the first high has nothing to compare against and always breaks
                if last_high.is_none_or(|prev| level > prev.level) {
                    row.bos = Bias::Bullish;
                    row.level = last_high.map(|prev| prev.level);
                    row.origin = last_high.map(|prev| prev.index);
                    row.broken_at = Some(index);
                }
                last_high = Some(current);
            }
            SwingKind::Low => {
                if last_low.is_none_or(|prev| level < prev.level) {
                    row.bos = Bias::Bearish;
                    row.level = last_low.map(|prev| prev.level);
                    row.origin = last_low.map(|prev| prev.index);
                    row.broken_at = Some(index);
                }
                last_low = Some(current);
            }
            SwingKind::None => continue,
        }

        recent.push_back((swing.kind, current));
        if recent.len() > Const::CHOCH_PATTERN_LEN {
            recent.pop_front();
        }
        if recent.len() == Const::CHOCH_PATTERN_LEN {
            if let Some((choch, pivot)) = classify_choch(&recent) {
                row.choch = choch;
                row.level = Some(pivot.level);
                row.origin = Some(pivot.index);
            }
        }
    }

    debug!(
        swings = swings.iter().filter(|x| x.is_swing()).count(),
        bos = rows.iter().filter(|x| x.bos.is_some()).count(),
        choch = rows.iter().filter(|x| x.choch.is_some()).count(),
        "structure analysis finished"
    );
    Aligned::from_values(rows)
}

fn classify_choch(recent: &VecDeque<(SwingKind, SwingRef)>) -> Option<(Bias, SwingRef)> {
    let (k1, s1) = recent[0];
    let (k2, s2) = recent[1];
    let (k3, s3) = recent[2];
    let (k4, s4) = recent[3];
    let kinds = [k1, k2, k3, k4];

    use SwingKind::{High, Low};
    if kinds == [Low, High, Low, High]
        && s4.level > s2.level
        && s2.level > s1.level
        && s1.level > s3.level
    {
        return Some((Bias::Bullish, s2));
    }
    if kinds == [High, Low, High, Low]
        && s4.level < s2.level
        && s2.level < s1.level
        && s1.level < s3.level
    {
        return Some((Bias::Bearish, s2));
    }
    None
}
