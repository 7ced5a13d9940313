use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constant::{Const, DataError, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub swing_length: usize,
    /// Carried for compatibility; breaks are measured on swing levels only.
    pub close_break: bool,
    pub join_consecutive: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IndicatorConfigPatch {
    pub swing_length: Option<usize>,
    pub close_break: Option<bool>,
    pub join_consecutive: Option<bool>,
}

/// Layered overrides keyed by interval label, symbol and `symbol.interval`
/// (either side may be `*`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicatorProfileConfig {
    #[serde(default)]
    pub default: IndicatorConfigPatch,
    #[serde(default)]
    pub interval: HashMap<String, IndicatorConfigPatch>,
    #[serde(default)]
    pub symbol: HashMap<String, IndicatorConfigPatch>,
    #[serde(default)]
    pub symbol_interval: HashMap<String, IndicatorConfigPatch>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            swing_length: Const::DEFAULT_SWING_LENGTH,
            close_break: true,
            join_consecutive: false,
        }
    }
}

impl IndicatorConfig {
    pub fn apply_patch(mut self, patch: IndicatorConfigPatch) -> Self {
        if let Some(v) = patch.swing_length {
            self.swing_length = v;
        }
        if let Some(v) = patch.close_break {
            self.close_break = v;
        }
        if let Some(v) = patch.join_consecutive {
            self.join_consecutive = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.swing_length == 0 {
            return Err(IndicatorError::InvalidArgument(
                "swing_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        let patch: IndicatorConfigPatch = serde_yaml::from_str(yaml)?;
        Ok(Self::default().apply_patch(patch))
    }
}

impl IndicatorProfileConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|x| x.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw),
            other => Err(DataError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn resolve_for(&self, symbol: &str, interval: &str) -> IndicatorConfig {
        let symbol_norm = symbol_key(symbol);
        let interval_norm = interval_key(interval);
        let symbol_interval = format!("{symbol_norm}.{interval_norm}");
        let symbol_wild = format!("{symbol_norm}.*");
        let interval_wild = format!("*.{interval_norm}");

        let mut config = IndicatorConfig::default().apply_patch(self.default);

        if let Some(patch) = find_patch(&self.interval, &interval_norm, interval_key) {
            config = config.apply_patch(*patch);
        }
        if let Some(patch) = find_patch(&self.symbol, &symbol_norm, symbol_key) {
            config = config.apply_patch(*patch);
        }
        for key in [&interval_wild, &symbol_wild, &symbol_interval] {
            if let Some(patch) = find_patch(&self.symbol_interval, key, symbol_interval_key) {
                config = config.apply_patch(*patch);
            }
        }

        config
    }
}

fn symbol_key(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

// `1m` and `1M` are different intervals, so interval keys keep their case.
fn interval_key(value: &str) -> String {
    value.trim().to_string()
}

fn symbol_interval_key(value: &str) -> String {
    match value.trim().split_once('.') {
        Some((symbol, interval)) => format!("{}.{}", symbol_key(symbol), interval_key(interval)),
        None => symbol_key(value),
    }
}

fn find_patch<'a>(
    map: &'a HashMap<String, IndicatorConfigPatch>,
    key: &str,
    normalize: fn(&str) -> String,
) -> Option<&'a IndicatorConfigPatch> {
    map.iter()
        .find(|(k, _)| normalize(k) == key)
        .map(|(_, v)| v)
}
