use crate::config::DashboardConfig;
use omics::dataset::MAX_SCORE;
use omics::format::format_score;
use omics::{Condition, NormalizationMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Network,
    Volcano,
    Heatmap,
}

/// Current control values plus UI-only state. Views read from here;
/// controllers never do.
#[derive(Debug, Clone)]
pub struct Store {
    pub config: DashboardConfig,
    pub condition: Condition,
    pub threshold: u8,
    pub threshold_label: String,
    pub fold_change_slider: u32,
    pub p_value_slider: u32,
    pub heatmap_mode: NormalizationMode,
    pub heatmap_hovered_cell: Option<(usize, usize)>,
    pub active_tab: ActiveTab,
    pub error_message: Option<String>,
}

impl Store {
    pub fn new(config: DashboardConfig) -> Self {
        let threshold = config.network.threshold.min(MAX_SCORE);
        Self {
            condition: config.network.condition,
            threshold,
            threshold_label: format_score(threshold),
            fold_change_slider: config.volcano.fold_change_slider,
            p_value_slider: config.volcano.p_value_slider,
            heatmap_mode: config.heatmap.mode,
            heatmap_hovered_cell: None,
            active_tab: ActiveTab::Network,
            error_message: None,
            config,
        }
    }

    /// The loaded configuration with the current control values written
    /// back into it.
    pub fn snapshot_config(&self) -> DashboardConfig {
        let mut config = self.config.clone();
        config.network.condition = self.condition;
        config.network.threshold = self.threshold;
        config.volcano.fold_change_slider = self.fold_change_slider;
        config.volcano.p_value_slider = self.p_value_slider;
        config.heatmap.mode = self.heatmap_mode;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_from_config_controls() {
        let store = Store::new(DashboardConfig::default());
        assert_eq!(store.condition, Condition::Inflammation);
        assert_eq!(store.threshold, 35);
        assert_eq!(store.threshold_label, "0.35");
        assert_eq!(store.heatmap_mode, NormalizationMode::ZScore);
        assert_eq!(store.active_tab, ActiveTab::Network);
    }

    #[test]
    fn loaded_threshold_is_clamped_to_max_score() {
        let mut config = DashboardConfig::default();
        config.network.threshold = 200;
        let store = Store::new(config);
        assert_eq!(store.threshold, 100);
        assert_eq!(store.threshold_label, "1.00");
    }

    #[test]
    fn snapshot_captures_current_controls() {
        let mut store = Store::new(DashboardConfig::default());
        store.threshold = 70;
        store.p_value_slider = 12;
        store.heatmap_mode = NormalizationMode::Raw;

        let config = store.snapshot_config();
        assert_eq!(config.network.threshold, 70);
        assert_eq!(config.volcano.p_value_slider, 12);
        assert_eq!(config.heatmap.mode, NormalizationMode::Raw);
        assert_eq!(config.panels, store.config.panels);
    }
}
