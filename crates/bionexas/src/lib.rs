pub mod actions;
pub mod app;
pub mod charts;
pub mod config;
pub mod effects;
pub mod graph_view;
pub mod heatmap;
pub mod layout_circular;
pub mod native;
pub mod network;
pub mod node_shapes;
pub mod state;
pub mod store;
pub mod volcano;
pub mod web;

use app::DashboardApp;
use config::DashboardConfig;
use state::State;
use store::Store;

/// Build the dashboard: settings from disk (or defaults), then every view.
pub fn create_app(_cc: &eframe::CreationContext<'_>) -> DashboardApp {
    let config = load_startup_config();
    tracing::info!(seed = ?config.seed, "starting dashboard");
    DashboardApp::new(State::new(Store::new(config)))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_startup_config() -> DashboardConfig {
    DashboardConfig::load_or_default(&DashboardConfig::default_path())
}

#[cfg(target_arch = "wasm32")]
fn load_startup_config() -> DashboardConfig {
    DashboardConfig::default()
}

/// Route `tracing` output to stderr, filtered by `RUST_LOG` (default
/// `info`).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Forward log records to the browser console and install the panic hook.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
