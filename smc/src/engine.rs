use std::fs::{File, create_dir_all};
use std::path::Path;

use polars::df;
use polars::prelude::{DataFrame, ParquetWriter};
use serde::Serialize;
use tracing::info;

use crate::bar::Candle;
use crate::config::IndicatorConfig;
use crate::constant::{Bias, DataError, IndicatorError, SwingKind};
use crate::fvg::{Gap, GapDetector};
use crate::series::Aligned;
use crate::structure::{analyze_swings, StructureBreak};
use crate::swing::{SwingDetector, SwingPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub swings: Aligned<SwingPoint>,
    pub structure: Aligned<StructureBreak>,
    pub gaps: Aligned<Gap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnalysisSummary {
    pub candles: usize,
    pub swing_highs: usize,
    pub swing_lows: usize,
    pub bullish_bos: usize,
    pub bearish_bos: usize,
    pub bullish_choch: usize,
    pub bearish_choch: usize,
    pub open_gaps: usize,
    pub mitigated_gaps: usize,
}

pub struct AnalysisEngine {
    config: IndicatorConfig,
}

impl AnalysisEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Runs the gap detector on a scoped worker while the swing/structure
    /// chain runs on the calling thread. Both only read `candles`.
    pub fn analyze(&self, candles: &[Candle]) -> Result<Analysis, IndicatorError> {
        let swing_detector = SwingDetector::new(self.config.swing_length);
        let gap_detector = GapDetector::new(self.config.join_consecutive);

        let (swings, structure, gaps) = crossbeam::scope(|scope| {
            let gap_worker = scope.spawn(|_| gap_detector.detect(candles));
            let swings = swing_detector.detect(candles);
            let structure = analyze_swings(&swings);
            let gaps = gap_worker
                .join()
                .map_err(|_| IndicatorError::WorkerPanicked("gap detector"))?;
            Ok::<_, IndicatorError>((swings, structure, gaps))
        })
        .map_err(|_| IndicatorError::WorkerPanicked("analysis scope"))??;

        let analysis = Analysis {
            swings,
            structure,
            gaps,
        };
        let summary = analysis.summary();
        info!(
            candles = summary.candles,
            swing_length = self.config.swing_length,
            swing_highs = summary.swing_highs,
            swing_lows = summary.swing_lows,
            bos = summary.bullish_bos + summary.bearish_bos,
            choch = summary.bullish_choch + summary.bearish_choch,
            open_gaps = summary.open_gaps,
            mitigated_gaps = summary.mitigated_gaps,
            "analysis finished"
        );
        Ok(analysis)
    }
}

impl Analysis {
    pub fn len(&self) -> usize {
        self.swings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swings.is_empty()
    }

    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            candles: self.len(),
            ..AnalysisSummary::default()
        };
        for swing in &self.swings {
            match swing.kind {
                SwingKind::High => summary.swing_highs += 1,
                SwingKind::Low => summary.swing_lows += 1,
                SwingKind::None => {}
            }
        }
        for row in &self.structure {
            match row.bos {
                Bias::Bullish => summary.bullish_bos += 1,
                Bias::Bearish => summary.bearish_bos += 1,
                Bias::None => {}
            }
            match row.choch {
                Bias::Bullish => summary.bullish_choch += 1,
                Bias::Bearish => summary.bearish_choch += 1,
                Bias::None => {}
            }
        }
        for gap in self.gaps.iter().filter(|x| x.is_gap()) {
            if gap.is_mitigated() {
                summary.mitigated_gaps += 1;
            } else {
                summary.open_gaps += 1;
            }
        }
        summary
    }

    /// One row per candle. Directions are encoded 1 / -1 / null.
    pub fn dataframe(&self, candles: &[Candle]) -> Result<DataFrame, DataError> {
        self.swings.check_against(candles)?;
        self.structure.check_against(candles)?;
        self.gaps.check_against(candles)?;

        let index: Vec<u64> = (0..candles.len() as u64).collect();
        let time: Vec<Option<i64>> = candles
            .iter()
            .map(|x| x.timestamp.map(|t| t.timestamp_millis()))
            .collect();
        let open: Vec<f64> = candles.iter().map(|x| x.open).collect();
        let high: Vec<f64> = candles.iter().map(|x| x.high).collect();
        let low: Vec<f64> = candles.iter().map(|x| x.low).collect();
        let close: Vec<f64> = candles.iter().map(|x| x.close).collect();

        let swing: Vec<Option<i32>> = self.swings.iter().map(|x| x.kind.sign()).collect();
        let swing_level: Vec<Option<f64>> = self.swings.iter().map(|x| x.level).collect();

        let bos: Vec<Option<i32>> = self.structure.iter().map(|x| x.bos.sign()).collect();
        let choch: Vec<Option<i32>> = self.structure.iter().map(|x| x.choch.sign()).collect();
        let structure_level: Vec<Option<f64>> = self.structure.iter().map(|x| x.level).collect();
        let broken_at: Vec<Option<u64>> = self
            .structure
            .iter()
            .map(|x| x.broken_at.map(|v| v as u64))
            .collect();
        let origin: Vec<Option<u64>> = self
            .structure
            .iter()
            .map(|x| x.origin.map(|v| v as u64))
            .collect();

        let fvg: Vec<Option<i32>> = self.gaps.iter().map(|x| x.kind.sign()).collect();
        let fvg_top: Vec<Option<f64>> = self.gaps.iter().map(|x| x.top).collect();
        let fvg_bottom: Vec<Option<f64>> = self.gaps.iter().map(|x| x.bottom).collect();
        let mitigated_at: Vec<Option<u64>> = self
            .gaps
            .iter()
            .map(|x| x.mitigated_at.map(|v| v as u64))
            .collect();

        let frame = df!(
            "index" => index,
            "time" => time,
            "open" => open,
            "high" => high,
            "low" => low,
            "close" => close,
            "swing" => swing,
            "swing_level" => swing_level,
            "bos" => bos,
            "choch" => choch,
            "structure_level" => structure_level,
            "broken_at" => broken_at,
            "origin" => origin,
            "fvg" => fvg,
            "fvg_top" => fvg_top,
            "fvg_bottom" => fvg_bottom,
            "mitigated_at" => mitigated_at
        )?;
        Ok(frame)
    }

    pub fn write_parquet(&self, candles: &[Candle], path: impl AsRef<Path>) -> Result<(), DataError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|x| !x.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        let mut frame = self.dataframe(candles)?;
        let mut file = File::create(path)?;
        ParquetWriter::new(&mut file).finish(&mut frame)?;
        Ok(())
    }
}
