mod options;
mod overlay;

pub use options::ChartOptions;
pub use overlay::{
    build_overlay, CandlePoint, GapBox, OverlayError, OverlayPayload, StructureLine, SwingMarker,
};
