use crate::effects::Effect;
use crate::store::{ActiveTab, Store};
use omics::format::format_score;
use omics::{Condition, NormalizationMode, ProteinId};
use std::path::PathBuf;

/// Everything the UI can ask for. Each variant names the control that
/// changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Network controls
    /// Pick the condition whose edges the main network shows
    SetCondition { condition: Condition },
    /// Move the edge score threshold slider
    SetEdgeThreshold { threshold: u8 },
    /// Fit the main network and clear focus
    ResetNetwork,
    /// Click on the main network canvas, with the protein under the pointer
    NodeClicked { hit: Option<ProteinId> },
    /// Double click on the main network canvas
    CanvasDoubleClicked,

    // Volcano controls
    SetFoldChangeSlider { value: u32 },
    SetPValueSlider { value: u32 },
    RegenerateVolcano,

    // Heatmap controls
    SetHeatmapMode { mode: NormalizationMode },
    RegenerateHeatmap,
    SetHeatmapHoveredCell { cell: Option<(usize, usize)> },

    // UI State Actions
    SetActiveTab { tab: ActiveTab },

    // File Operations
    /// Save current control values as settings
    SaveSettings { path: PathBuf },
    /// Replace settings and controls from a file
    LoadSettings { path: PathBuf },
    /// Clear any error message
    ClearErrorMessage,
}

/// Apply a single action to the store and return the effects it needs.
pub fn update(store: &mut Store, action: Action) -> Vec<Effect> {
    match action {
        Action::SetCondition { condition } => {
            if store.condition == condition {
                return vec![];
            }
            store.condition = condition;
            vec![Effect::RebuildNetwork]
        }
        Action::SetEdgeThreshold { threshold } => {
            let threshold = threshold.min(omics::dataset::MAX_SCORE);
            store.threshold = threshold;
            store.threshold_label = format_score(threshold);
            vec![Effect::RebuildNetwork]
        }
        Action::ResetNetwork => vec![Effect::ResetNetwork],
        Action::NodeClicked { hit } => vec![Effect::ClickNetwork { hit }],
        Action::CanvasDoubleClicked => vec![Effect::DefocusNetwork],

        Action::SetFoldChangeSlider { value } => {
            store.fold_change_slider = value;
            vec![Effect::RedrawVolcano { resample: false }]
        }
        Action::SetPValueSlider { value } => {
            store.p_value_slider = value;
            vec![Effect::RedrawVolcano { resample: false }]
        }
        Action::RegenerateVolcano => vec![Effect::RedrawVolcano { resample: true }],

        Action::SetHeatmapMode { mode } => {
            store.heatmap_mode = mode;
            vec![Effect::RedrawHeatmap { resample: false }]
        }
        Action::RegenerateHeatmap => vec![Effect::RedrawHeatmap { resample: true }],
        Action::SetHeatmapHoveredCell { cell } => {
            store.heatmap_hovered_cell = cell;
            vec![]
        }

        Action::SetActiveTab { tab } => {
            store.active_tab = tab;
            vec![]
        }

        Action::SaveSettings { path } => vec![Effect::SaveSettings { path }],
        Action::LoadSettings { path } => vec![Effect::LoadSettings { path }],
        Action::ClearErrorMessage => {
            store.error_message = None;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn store() -> Store {
        Store::new(DashboardConfig::default())
    }

    #[test]
    fn threshold_label_updates_before_rebuild_runs() {
        let mut s = store();
        let effects = update(&mut s, Action::SetEdgeThreshold { threshold: 72 });

        assert_eq!(s.threshold, 72);
        assert_eq!(s.threshold_label, "0.72");
        assert_eq!(effects, vec![Effect::RebuildNetwork]);
    }

    #[test]
    fn threshold_above_hundred_is_clamped() {
        let mut s = store();
        update(&mut s, Action::SetEdgeThreshold { threshold: 180 });
        assert_eq!(s.threshold, 100);
        assert_eq!(s.threshold_label, "1.00");
    }

    #[test]
    fn condition_change_rebuilds_only_when_different() {
        let mut s = store();
        assert!(update(&mut s, Action::SetCondition { condition: Condition::Inflammation }).is_empty());
        assert_eq!(
            update(&mut s, Action::SetCondition { condition: Condition::Baseline }),
            vec![Effect::RebuildNetwork]
        );
        assert_eq!(s.condition, Condition::Baseline);
    }

    #[test]
    fn dispatch_table_maps_controls_to_effects() {
        let mut s = store();
        let cases = [
            (Action::ResetNetwork, vec![Effect::ResetNetwork]),
            (
                Action::NodeClicked { hit: Some(3) },
                vec![Effect::ClickNetwork { hit: Some(3) }],
            ),
            (Action::CanvasDoubleClicked, vec![Effect::DefocusNetwork]),
            (
                Action::SetFoldChangeSlider { value: 120 },
                vec![Effect::RedrawVolcano { resample: false }],
            ),
            (
                Action::SetPValueSlider { value: 40 },
                vec![Effect::RedrawVolcano { resample: false }],
            ),
            (
                Action::RegenerateVolcano,
                vec![Effect::RedrawVolcano { resample: true }],
            ),
            (
                Action::SetHeatmapMode { mode: NormalizationMode::Raw },
                vec![Effect::RedrawHeatmap { resample: false }],
            ),
            (
                Action::RegenerateHeatmap,
                vec![Effect::RedrawHeatmap { resample: true }],
            ),
            (Action::SetActiveTab { tab: ActiveTab::Heatmap }, vec![]),
        ];

        for (action, expected) in cases {
            assert_eq!(update(&mut s, action.clone()), expected, "{action:?}");
        }
        assert_eq!(s.fold_change_slider, 120);
        assert_eq!(s.p_value_slider, 40);
        assert_eq!(s.heatmap_mode, NormalizationMode::Raw);
        assert_eq!(s.active_tab, ActiveTab::Heatmap);
    }

    #[test]
    fn file_actions_defer_to_effects() {
        let mut s = store();
        let path = PathBuf::from("settings.json");
        assert_eq!(
            update(&mut s, Action::SaveSettings { path: path.clone() }),
            vec![Effect::SaveSettings { path: path.clone() }]
        );
        assert_eq!(
            update(&mut s, Action::LoadSettings { path: path.clone() }),
            vec![Effect::LoadSettings { path }]
        );

        s.error_message = Some("boom".into());
        update(&mut s, Action::ClearErrorMessage);
        assert_eq!(s.error_message, None);
    }
}
