use crate::actions::{self, Action};
use crate::effects::{self, Effect};
use crate::heatmap::HeatmapController;
use crate::network::NetworkController;
use crate::store::Store;
use crate::volcano::VolcanoController;
use omics::InteractionDataset;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The three chart controllers. Built together from a store and replaced
/// together when settings are reloaded.
pub struct Views {
    pub network: NetworkController,
    pub volcano: VolcanoController,
    pub heatmap: HeatmapController,
}

impl Views {
    /// Build every controller and draw the initial charts.
    pub fn new(store: &Store) -> Self {
        let config = &store.config;
        let network = NetworkController::new(
            InteractionDataset::builtin(),
            &config.network,
            &config.panels,
            store.condition,
            store.threshold,
        );

        let mut volcano =
            VolcanoController::new(chart_rng(config.seed, 0), &config.volcano, config.panels.volcano);
        volcano.redraw(store.fold_change_slider, store.p_value_slider, true);

        let mut heatmap =
            HeatmapController::new(chart_rng(config.seed, 1), &config.heatmap, config.panels.heatmap);
        heatmap.redraw(store.heatmap_mode, true);

        Self {
            network,
            volcano,
            heatmap,
        }
    }
}

/// Per-chart RNG: derived from the configured seed when there is one, else
/// seeded from the OS.
fn chart_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

pub struct State {
    pub store: Store,
    pub views: Views,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(store: Store) -> Self {
        let views = Views::new(&store);
        Self {
            store,
            views,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.store, &mut self.views, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DashboardConfig, Freshness, PanelConfig};
    use omics::{Condition, NormalizationMode};

    fn seeded() -> State {
        let config = DashboardConfig {
            seed: Some(7),
            ..DashboardConfig::default()
        };
        State::new(Store::new(config))
    }

    fn flush(state: &mut State) {
        state.flush_actions();
        state.flush_effects();
    }

    #[test]
    fn startup_draws_every_view() {
        let state = seeded();
        assert_eq!(state.views.network.main().unwrap().view.edge_count(), 11);
        assert_eq!(state.views.volcano.figure().unwrap().points.len(), 240);
        assert_eq!(state.views.heatmap.matrix().unwrap().rows(), 14);
    }

    #[test]
    fn seeded_views_are_reproducible() {
        let a = seeded();
        let b = seeded();
        assert_eq!(a.views.volcano.figure(), b.views.volcano.figure());
        assert_eq!(a.views.heatmap.matrix(), b.views.heatmap.matrix());
    }

    #[test]
    fn slider_moves_rebuild_main_network_last_write_wins() {
        let mut state = seeded();
        state.dispatch(Action::SetCondition { condition: Condition::Baseline });
        state.dispatch(Action::SetEdgeThreshold { threshold: 60 });
        state.dispatch(Action::SetEdgeThreshold { threshold: 50 });
        flush(&mut state);

        let main = state.views.network.main().unwrap();
        assert_eq!(main.condition, Condition::Baseline);
        assert_eq!(main.threshold, 50);
        assert_eq!(main.view.edge_count(), 2);
        assert_eq!(state.store.threshold_label, "0.50");
    }

    #[test]
    fn clicks_reach_the_highlighter() {
        let mut state = seeded();
        state.dispatch(Action::NodeClicked { hit: Some(2) });
        flush(&mut state);
        let focused = |s: &State| s.views.network.main().unwrap().highlighter().unwrap().focused();
        assert_eq!(focused(&state), Some(2));

        state.dispatch(Action::CanvasDoubleClicked);
        flush(&mut state);
        assert_eq!(focused(&state), None);
    }

    #[test]
    fn chart_controls_redraw_their_views() {
        let mut state = seeded();
        state.dispatch(Action::SetFoldChangeSlider { value: 250 });
        state.dispatch(Action::SetHeatmapMode { mode: NormalizationMode::Raw });
        flush(&mut state);

        assert_eq!(state.views.volcano.figure().unwrap().thresholds.fold_change, 2.5);
        assert_eq!(
            state.views.heatmap.matrix(),
            state.views.heatmap.raw()
        );
    }

    #[test]
    fn settings_round_trip_through_effects() {
        let path = std::env::temp_dir().join("bionexas_state_settings.json");
        let mut state = seeded();
        state.dispatch(Action::SetEdgeThreshold { threshold: 66 });
        state.dispatch(Action::SaveSettings { path: path.clone() });
        flush(&mut state);

        let mut other = seeded();
        other.dispatch(Action::LoadSettings { path: path.clone() });
        flush(&mut other);
        std::fs::remove_file(&path).ok();

        assert_eq!(other.store.threshold, 66);
        assert_eq!(other.store.threshold_label, "0.66");
        assert_eq!(other.views.network.main().unwrap().threshold, 66);
        assert_eq!(other.store.error_message, None);
    }

    #[test]
    fn failed_load_reports_error_and_keeps_views() {
        let mut state = seeded();
        state.dispatch(Action::LoadSettings {
            path: std::env::temp_dir().join("bionexas_missing_settings.json"),
        });
        flush(&mut state);

        assert!(state.store.error_message.is_some());
        assert_eq!(state.views.network.main().unwrap().threshold, 35);
    }

    #[test]
    fn disabled_panels_are_silent_no_ops() {
        let config = DashboardConfig {
            seed: Some(1),
            panels: PanelConfig {
                preview: false,
                network: false,
                volcano: false,
                heatmap: false,
            },
            ..DashboardConfig::default()
        };
        let mut state = State::new(Store::new(config));
        for action in [
            Action::SetEdgeThreshold { threshold: 90 },
            Action::ResetNetwork,
            Action::NodeClicked { hit: Some(1) },
            Action::RegenerateVolcano,
            Action::RegenerateHeatmap,
        ] {
            state.dispatch(action);
        }
        flush(&mut state);

        assert!(state.views.network.main().is_none());
        assert!(state.views.volcano.figure().is_none());
        assert!(state.views.heatmap.matrix().is_none());
        assert_eq!(state.store.threshold_label, "0.90");
    }

    #[test]
    fn on_demand_volcano_keeps_points_across_slider_moves() {
        let mut config = DashboardConfig {
            seed: Some(3),
            ..DashboardConfig::default()
        };
        config.volcano.freshness = Freshness::RegenerateOnDemand;
        let mut state = State::new(Store::new(config));
        let before = state.views.volcano.figure().unwrap().points.clone();

        state.dispatch(Action::SetPValueSlider { value: 0 });
        flush(&mut state);
        assert_eq!(state.views.volcano.figure().unwrap().points, before);

        state.dispatch(Action::RegenerateVolcano);
        flush(&mut state);
        assert_ne!(state.views.volcano.figure().unwrap().points, before);
    }
}
