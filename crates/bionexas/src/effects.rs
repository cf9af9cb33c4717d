use crate::config::DashboardConfig;
use crate::state::Views;
use crate::store::Store;
use omics::ProteinId;
use std::path::PathBuf;

/// Deferred work produced by the reducer: controller rebuilds and file IO.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Rebuild the main network for the current condition and threshold
    RebuildNetwork,
    /// Fit the main network and clear focus
    ResetNetwork,
    /// Route a canvas click to the selection highlighter
    ClickNetwork { hit: Option<ProteinId> },
    /// Return the main network to neutral
    DefocusNetwork,
    RedrawVolcano { resample: bool },
    RedrawHeatmap { resample: bool },
    /// Save current settings to disk
    SaveSettings { path: PathBuf },
    /// Load settings from disk and rebuild every view
    LoadSettings { path: PathBuf },
}

/// Execute a single effect against the store and the controllers.
pub fn run(store: &mut Store, views: &mut Views, effect: Effect) {
    match effect {
        Effect::RebuildNetwork => {
            views.network.rebuild_main(store.condition, store.threshold);
        }
        Effect::ResetNetwork => views.network.reset_view(),
        Effect::ClickNetwork { hit } => views.network.click_main(hit),
        Effect::DefocusNetwork => views.network.double_click_main(),
        Effect::RedrawVolcano { resample } => {
            views
                .volcano
                .redraw(store.fold_change_slider, store.p_value_slider, resample);
        }
        Effect::RedrawHeatmap { resample } => {
            views.heatmap.redraw(store.heatmap_mode, resample);
        }
        Effect::SaveSettings { path } => {
            if let Err(e) = store.snapshot_config().save(&path) {
                tracing::warn!("{e}");
                store.error_message = Some(e.to_string());
            } else {
                tracing::info!(path = %path.display(), "saved settings");
            }
        }
        Effect::LoadSettings { path } => match DashboardConfig::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded settings");
                let tab = store.active_tab;
                *store = Store::new(config);
                store.active_tab = tab;
                *views = Views::new(store);
            }
            Err(e) => {
                tracing::warn!("{e}");
                store.error_message = Some(e.to_string());
            }
        },
    }
}
