use std::ops::Index;

use serde::Serialize;

use crate::bar::Candle;
use crate::constant::IndicatorError;

/// Per-candle output sequence, one value per input candle.
///
/// Values are positional: `series[i]` describes `candles[i]`. Every detector
/// returns an `Aligned` built from the same slice it scanned, and consumers
/// that pair a series with candles go through [`Aligned::zip`] or
/// [`Aligned::check_against`] so a length mismatch is reported instead of
/// silently truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Aligned<T> {
    values: Vec<T>,
}

impl<T> Aligned<T> {
    pub fn new(values: Vec<T>, candles: &[Candle]) -> Result<Self, IndicatorError> {
        check_len(candles.len(), values.len())?;
        Ok(Self { values })
    }

    pub(crate) fn from_values(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<T> {
        self.values
    }

    pub fn check_against(&self, candles: &[Candle]) -> Result<(), IndicatorError> {
        check_len(candles.len(), self.values.len())
    }

    pub fn zip<'a>(
        &'a self,
        candles: &'a [Candle],
    ) -> Result<impl Iterator<Item = (usize, &'a Candle, &'a T)> + 'a, IndicatorError> {
        self.check_against(candles)?;
        Ok(candles
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .map(|(index, (candle, value))| (index, candle, value)))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Aligned<U> {
        Aligned {
            values: self.values.iter().map(f).collect(),
        }
    }
}

impl<T> Index<usize> for Aligned<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<'a, T> IntoIterator for &'a Aligned<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), IndicatorError> {
    if expected == actual {
        Ok(())
    } else {
        Err(IndicatorError::Misaligned { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::Aligned;
    use crate::{Candle, IndicatorError};

    #[test]
    fn new_rejects_length_mismatch() {
        let candles = vec![Candle::new(1.0, 2.0, 0.5, 1.5); 3];
        let err = Aligned::new(vec![0u8; 2], &candles).expect_err("must reject short series");
        assert_eq!(err, IndicatorError::Misaligned { expected: 3, actual: 2 });
    }

    #[test]
    fn zip_pairs_values_with_candles_by_index() {
        let candles = vec![
            Candle::new(1.0, 2.0, 0.5, 1.5),
            Candle::new(1.5, 3.0, 1.0, 2.5),
        ];
        let series = Aligned::new(vec!["a", "b"], &candles).expect("aligned");
        let rows = series
            .zip(&candles)
            .expect("same length")
            .map(|(i, c, v)| (i, c.high, *v))
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![(0, 2.0, "a"), (1, 3.0, "b")]);
        assert!(series.zip(&candles[..1]).is_err());
    }
}
