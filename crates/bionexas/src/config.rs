use omics::heatmap::{DEFAULT_COLS, DEFAULT_ROWS};
use omics::volcano::{DEFAULT_POINT_COUNT, SLIDER_MAX};
use omics::{Condition, NormalizationMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "BIONEXAS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "bionexas.json";

/// When a chart resamples its synthetic data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Every redraw draws a new sample.
    #[default]
    AlwaysRegenerate,
    /// Keep the last sample until an explicit regenerate.
    RegenerateOnDemand,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub network: NetworkConfig,
    pub volcano: VolcanoConfig,
    pub heatmap: HeatmapConfig,
    pub panels: PanelConfig,
    /// Fixed RNG seed for the synthetic charts; `None` seeds from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub condition: Condition,
    pub threshold: u8,
    pub preview_condition: Condition,
    pub preview_threshold: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            condition: Condition::Inflammation,
            threshold: 35,
            preview_condition: Condition::Inflammation,
            preview_threshold: 55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolcanoConfig {
    pub fold_change_slider: u32,
    pub p_value_slider: u32,
    pub slider_max: u32,
    pub point_count: usize,
    pub freshness: Freshness,
}

impl Default for VolcanoConfig {
    fn default() -> Self {
        Self {
            fold_change_slider: 100,
            p_value_slider: 130,
            slider_max: SLIDER_MAX,
            point_count: DEFAULT_POINT_COUNT,
            freshness: Freshness::AlwaysRegenerate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub mode: NormalizationMode,
    pub rows: usize,
    pub cols: usize,
    pub freshness: Freshness,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            mode: NormalizationMode::ZScore,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            freshness: Freshness::AlwaysRegenerate,
        }
    }
}

/// Which render surfaces exist. A disabled panel turns its controller
/// operations into no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub preview: bool,
    pub network: bool,
    pub volcano: bool,
    pub heatmap: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            preview: true,
            network: true,
            volcano: true,
            heatmap: true,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings path: `$BIONEXAS_CONFIG` if set, else `bionexas.json` in the
    /// working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path` when it exists, falling back to defaults (with a
    /// warning) when it cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded settings");
                config
            }
            Err(e) => {
                tracing::warn!("{e}. Using default settings.");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_control_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.network.threshold, 35);
        assert_eq!(config.network.condition, Condition::Inflammation);
        assert_eq!(config.network.preview_threshold, 55);
        assert_eq!(config.volcano.fold_change_slider, 100);
        assert_eq!(config.volcano.p_value_slider, 130);
        assert_eq!(config.volcano.point_count, 240);
        assert_eq!(config.heatmap.mode, NormalizationMode::ZScore);
        assert_eq!(config.heatmap.freshness, Freshness::AlwaysRegenerate);
        assert!(config.panels.network);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = DashboardConfig::from_json(
            r#"{
                "network": { "condition": "baseline" },
                "heatmap": { "freshness": "regenerate_on_demand", "mode": "raw" },
                "seed": 17
            }"#,
        )
        .unwrap();

        assert_eq!(config.network.condition, Condition::Baseline);
        assert_eq!(config.network.threshold, 35);
        assert_eq!(config.heatmap.mode, NormalizationMode::Raw);
        assert_eq!(config.heatmap.freshness, Freshness::RegenerateOnDemand);
        assert_eq!(config.heatmap.rows, 14);
        assert_eq!(config.seed, Some(17));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let mut config = DashboardConfig::default();
        config.volcano.fold_change_slider = 220;
        config.panels.heatmap = false;

        let path = std::env::temp_dir().join("bionexas_config_test.json");
        config.save(&path).expect("save settings");
        let loaded = DashboardConfig::load(&path).expect("load settings");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let path = std::env::temp_dir().join("bionexas_config_broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            DashboardConfig::load_or_default(&path),
            DashboardConfig::default()
        );
        std::fs::remove_file(&path).ok();
    }
}
