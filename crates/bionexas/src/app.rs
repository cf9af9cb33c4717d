use crate::actions::Action;
use crate::graph_view::NetworkGraphView;
use crate::heatmap::show_heatmap;
use crate::layout_circular::LayoutStateRing;
use crate::network::{MAIN_VIEW_ID, NetworkInstance, PREVIEW_VIEW_ID};
use crate::node_shapes::to_color32;
use crate::state::State;
use crate::store::ActiveTab;
use crate::volcano::show_volcano;
use eframe::egui;
use egui_graphs::{SettingsInteraction, SettingsNavigation, SettingsStyle, reset_layout};
use omics::style::group_fill;
use omics::{Condition, NormalizationMode, ProteinGroup, Regulation};

const PREVIEW_HEIGHT: f32 = 220.0;

pub struct DashboardApp {
    state: State,
}

impl DashboardApp {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut tab = self.state.store.active_tab;
                ui.selectable_value(&mut tab, ActiveTab::Network, "Interaction network");
                ui.selectable_value(&mut tab, ActiveTab::Volcano, "Volcano plot");
                ui.selectable_value(&mut tab, ActiveTab::Heatmap, "Heatmap");
                if tab != self.state.store.active_tab {
                    self.state.dispatch(Action::SetActiveTab { tab });
                }
            });
        });

        match self.state.store.active_tab {
            ActiveTab::Network => self.render_network_tab(ctx),
            ActiveTab::Volcano => self.render_volcano_tab(ctx),
            ActiveTab::Heatmap => self.render_heatmap_tab(ctx),
        }

        if let Some(error) = self.state.store.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.dispatch(Action::ClearErrorMessage);
                    }
                });
        }

        self.state.flush_actions();
        self.state.flush_effects();
        self.state.views.network.after_draw();
    }
}

impl DashboardApp {
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        if ui.button("Save settings").clicked() {
                            ui.close();
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .save_file()
                            {
                                self.state.dispatch(Action::SaveSettings { path });
                            }
                        }

                        if ui.button("Load settings").clicked() {
                            ui.close();
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .pick_file()
                            {
                                self.state.dispatch(Action::LoadSettings { path });
                            }
                        }
                    }
                    #[cfg(target_arch = "wasm32")]
                    ui.label("Settings files are only available on desktop");
                });
            });
        });
    }

    fn render_network_tab(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("network_controls")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Network");
                ui.separator();

                let mut condition = self.state.store.condition;
                egui::ComboBox::from_label("Condition")
                    .selected_text(condition.display_name())
                    .show_ui(ui, |ui| {
                        for c in Condition::ALL {
                            ui.selectable_value(&mut condition, c, c.display_name());
                        }
                    });
                if condition != self.state.store.condition {
                    self.state.dispatch(Action::SetCondition { condition });
                }

                let mut threshold = self.state.store.threshold;
                ui.horizontal(|ui| {
                    let slider = egui::Slider::new(&mut threshold, 0..=100).show_value(false);
                    if ui.add(slider).changed() {
                        self.state.dispatch(Action::SetEdgeThreshold { threshold });
                    }
                    ui.label(format!("min score {}", self.state.store.threshold_label));
                });

                if ui.button("Reset view").clicked() {
                    self.state.dispatch(Action::ResetNetwork);
                }

                ui.separator();
                ui.label("Preview");
                if let Some(stats) = self.state.views.network.stats() {
                    ui.label(format!("{} proteins, {} interactions", stats.nodes, stats.edges));
                }
                if let Some(preview) = self.state.views.network.preview_mut() {
                    ui.allocate_ui(egui::Vec2::new(ui.available_width(), PREVIEW_HEIGHT), |ui| {
                        draw_network(ui, preview, PREVIEW_VIEW_ID, false);
                    });
                }

                ui.separator();
                for group in ProteinGroup::ALL {
                    ui.horizontal(|ui| {
                        ui.colored_label(to_color32(group_fill(group)), "●");
                        ui.label(group.as_str());
                    });
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.label("Double click the canvas to clear focus");
                    ui.label("Click a protein to focus its neighbours");
                    ui.separator();
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(8.0))
            .show(ctx, |ui| {
                let Some(main) = self.state.views.network.main_mut() else {
                    ui.label("Network panel disabled");
                    return;
                };
                let response = draw_network(ui, main, MAIN_VIEW_ID, true);
                let hit = main.hovered_protein();
                if response.double_clicked() {
                    self.state.dispatch(Action::CanvasDoubleClicked);
                } else if response.clicked() {
                    self.state.dispatch(Action::NodeClicked { hit });
                }
            });
    }

    fn render_volcano_tab(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("volcano_controls")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Volcano");
                ui.separator();
                let max = self.state.views.volcano.slider_max();

                let mut fold_change = self.state.store.fold_change_slider;
                ui.label("Fold-change cutoff");
                if ui
                    .add(egui::Slider::new(&mut fold_change, 0..=max).show_value(false))
                    .changed()
                {
                    self.state.dispatch(Action::SetFoldChangeSlider { value: fold_change });
                }
                ui.label(self.state.views.volcano.fold_change_label());

                let mut p_value = self.state.store.p_value_slider;
                ui.label("p-value cutoff");
                if ui
                    .add(egui::Slider::new(&mut p_value, 0..=max).show_value(false))
                    .changed()
                {
                    self.state.dispatch(Action::SetPValueSlider { value: p_value });
                }
                ui.label(self.state.views.volcano.p_value_label());

                ui.separator();
                if ui.button("Regenerate").clicked() {
                    self.state.dispatch(Action::RegenerateVolcano);
                }

                if let Some(figure) = self.state.views.volcano.figure() {
                    ui.separator();
                    ui.label(format!("Up: {}", figure.count(Regulation::Up)));
                    ui.label(format!("Down: {}", figure.count(Regulation::Down)));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.views.volcano.figure() {
            Some(figure) => show_volcano(ui, figure),
            None => {
                ui.label("Volcano panel disabled");
            }
        });
    }

    fn render_heatmap_tab(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("heatmap_controls")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Heatmap");
                ui.separator();

                let mut mode = self.state.store.heatmap_mode;
                egui::ComboBox::from_label("Normalization")
                    .selected_text(mode.display_name())
                    .show_ui(ui, |ui| {
                        for m in NormalizationMode::ALL {
                            ui.selectable_value(&mut mode, m, m.display_name());
                        }
                    });
                if mode != self.state.store.heatmap_mode {
                    self.state.dispatch(Action::SetHeatmapMode { mode });
                }

                ui.separator();
                if ui.button("Regenerate").clicked() {
                    self.state.dispatch(Action::RegenerateHeatmap);
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(8.0))
            .show(ctx, |ui| {
                let Some(matrix) = self.state.views.heatmap.matrix() else {
                    ui.label("Heatmap panel disabled");
                    return;
                };
                let prev = self.state.store.heatmap_hovered_cell;
                let hovered = show_heatmap(ui, matrix, prev);
                if hovered != prev {
                    self.state.dispatch(Action::SetHeatmapHoveredCell { cell: hovered });
                }
            });
    }
}

/// Draw one network instance, placing nodes and fitting the viewport when
/// the instance asks for it.
fn draw_network(
    ui: &mut egui::Ui,
    instance: &mut NetworkInstance,
    id: &str,
    interactive: bool,
) -> egui::Response {
    if instance.layout_pending {
        reset_layout::<LayoutStateRing>(ui, Some(id.to_string()));
        instance.layout_pending = false;
    }

    let fit = instance.fit_pending;
    instance.fit_pending = false;

    let interactions = SettingsInteraction::new()
        .with_dragging_enabled(interactive)
        .with_hover_enabled(true)
        .with_node_clicking_enabled(interactive)
        .with_node_selection_enabled(interactive);
    let navigations = SettingsNavigation::new()
        .with_fit_to_screen_enabled(fit || !interactive)
        .with_zoom_and_pan_enabled(interactive && !fit);
    let styles = SettingsStyle::new().with_labels_always(true);

    let response = ui.add(
        &mut NetworkGraphView::new(&mut instance.display)
            .with_id(Some(id.to_string()))
            .with_interactions(&interactions)
            .with_navigations(&navigations)
            .with_styles(&styles),
    );

    let tooltip = instance
        .hovered_protein()
        .and_then(|id| instance.view.node(id))
        .map(|node| {
            let edges: Vec<String> = instance
                .view
                .edges_of(node.id)
                .map(|e| e.tooltip.clone())
                .collect();
            if edges.is_empty() {
                node.tooltip.clone()
            } else {
                format!("{}\n{}", node.tooltip, edges.join("\n"))
            }
        });
    match tooltip {
        Some(text) => response.on_hover_text(text),
        None => response,
    }
}
