use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smc::DataError;

/// Rendering hints shipped alongside the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub up_color: String,
    pub down_color: String,
    pub bullish_gap_color: String,
    pub bearish_gap_color: String,
    pub show_swings: bool,
    pub show_structure: bool,
    pub show_gaps: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            up_color: "#26a69a".to_string(),
            down_color: "#ef5350".to_string(),
            bullish_gap_color: "rgba(38, 166, 154, 0.25)".to_string(),
            bearish_gap_color: "rgba(239, 83, 80, 0.25)".to_string(),
            show_swings: true,
            show_structure: true,
            show_gaps: true,
        }
    }
}

impl ChartOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }
}
