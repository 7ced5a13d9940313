pub mod bar;
pub mod config;
pub mod constant;
pub mod engine;
pub mod fvg;
pub mod logging;
pub mod series;
pub mod structure;
pub mod swing;

pub use bar::Candle;
pub use config::{IndicatorConfig, IndicatorConfigPatch, IndicatorProfileConfig};
pub use constant::{Bias, Const, DataError, IndicatorError, SwingKind};
pub use engine::{Analysis, AnalysisEngine, AnalysisSummary};
pub use fvg::{detect_gaps, Gap, GapDetector};
pub use logging::{init_logging, init_logging_with_level};
pub use series::Aligned;
pub use structure::{
    analyze_swings, detect_structure_breaks, StructureBreak, StructureBreakAnalyzer,
};
pub use swing::{detect_swings, SwingDetector, SwingPoint};
