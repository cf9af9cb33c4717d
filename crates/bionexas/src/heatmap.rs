use crate::charts::{PlotSurface, plot_or_log};
use crate::config::{Freshness, HeatmapConfig};
use eframe::egui;
use omics::heatmap::{generate, normalize};
use omics::{HeatmapMatrix, NormalizationMode};
use rand::rngs::StdRng;

const COLOR_SCALE_MESH_POINTS: usize = 10;
const COLOR_SCALE_HEIGHT: f32 = 18.0;
const COLOR_SCALE_LABEL_HEIGHT: f32 = 15.0;

/// Owns the heatmap surface, the raw sample and the RNG it came from.
pub struct HeatmapController {
    rng: StdRng,
    freshness: Freshness,
    rows: usize,
    cols: usize,
    raw: Option<HeatmapMatrix>,
    surface: Option<PlotSurface<HeatmapMatrix>>,
}

impl HeatmapController {
    pub fn new(rng: StdRng, config: &HeatmapConfig, enabled: bool) -> Self {
        if !enabled {
            tracing::debug!("heatmap panel disabled");
        }
        Self {
            rng,
            freshness: config.freshness,
            rows: config.rows,
            cols: config.cols,
            raw: None,
            surface: enabled.then(PlotSurface::default),
        }
    }

    /// Redraw under `mode`, drawing a new raw matrix when `resample` is set,
    /// when the policy always regenerates, or when there is none yet.
    pub fn redraw(&mut self, mode: NormalizationMode, resample: bool) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("heatmap panel disabled, skipping redraw");
            return;
        };

        let fresh =
            resample || self.freshness == Freshness::AlwaysRegenerate || self.raw.is_none();
        if fresh {
            self.raw = Some(generate(&mut self.rng, self.rows, self.cols));
        }
        let Some(raw) = self.raw.clone() else {
            return;
        };

        tracing::debug!(?mode, fresh, "redrawing heatmap");
        plot_or_log(surface, normalize(raw, mode), "heatmap");
    }

    pub fn matrix(&self) -> Option<&HeatmapMatrix> {
        self.surface.as_ref().and_then(|s| s.current())
    }

    pub fn raw(&self) -> Option<&HeatmapMatrix> {
        self.raw.as_ref()
    }
}

/// Map `value` onto [0, 1] within `range`. A flat range maps to the middle.
pub fn color_position(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if (hi - lo).abs() < 1e-12 {
        return 0.5;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

fn viridis(t: f64) -> egui::Color32 {
    let c = colorous::VIRIDIS.eval_continuous(t.clamp(0.0, 1.0));
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn contrasting_text_color(bg: egui::Color32) -> egui::Color32 {
    let r = bg.r() as f64 / 255.0;
    let g = bg.g() as f64 / 255.0;
    let b = bg.b() as f64 / 255.0;
    let luminance = 0.299 * r + 0.587 * g + 0.114 * b;
    if luminance > 0.5 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

fn render_color_scale(ui: &mut egui::Ui, range: (f64, f64), scale_width: f32) {
    let (lo, hi) = range;
    if (hi - lo).abs() < 1e-12 {
        return;
    }

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing = egui::Vec2::splat(0.0);

        let (rect, _response) = ui.allocate_exact_size(
            egui::Vec2::new(scale_width, COLOR_SCALE_HEIGHT),
            egui::Sense::hover(),
        );
        let origin = rect.min;

        let mut mesh = egui::Mesh::default();
        for i in 0..COLOR_SCALE_MESH_POINTS {
            let t = i as f32 / (COLOR_SCALE_MESH_POINTS - 1) as f32;
            let x = origin.x + t * scale_width;
            let color = viridis(t as f64);
            mesh.colored_vertex(egui::pos2(x, origin.y), color);
            mesh.colored_vertex(egui::pos2(x, origin.y + COLOR_SCALE_HEIGHT), color);
        }
        for i in 0..(COLOR_SCALE_MESH_POINTS - 1) {
            let base = (i * 2) as u32;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }
        ui.painter().add(egui::Shape::mesh(mesh));

        ui.allocate_space(egui::Vec2::new(scale_width, COLOR_SCALE_LABEL_HEIGHT));

        for pos in [0.0_f32, 0.25, 0.5, 0.75, 1.0] {
            let x = origin.x + pos * scale_width;
            let value = lo + pos as f64 * (hi - lo);
            let tick_top = origin.y + COLOR_SCALE_HEIGHT;
            let tick_bottom = tick_top + 5.0;
            ui.painter().line_segment(
                [egui::pos2(x, tick_top), egui::pos2(x, tick_bottom)],
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
            );
            ui.painter().text(
                egui::pos2(x, tick_bottom + 2.0),
                egui::Align2::CENTER_TOP,
                format!("{value:.1}"),
                egui::FontId::proportional(9.0),
                egui::Color32::GRAY,
            );
        }
    });
}

/// Paint the matrix as a labelled grid with a color scale underneath.
/// Returns the cell under the pointer as (column, row).
pub fn show_heatmap(
    ui: &mut egui::Ui,
    matrix: &HeatmapMatrix,
    prev_hovered_cell: Option<(usize, usize)>,
) -> Option<(usize, usize)> {
    let Some(range) = matrix.value_range() else {
        ui.label("No data to display");
        return None;
    };

    let available_rect = ui.available_rect_before_wrap();
    let label_height = 20.0;
    let label_width = 48.0;

    let available_width = available_rect.width() - label_width - 2.0;
    let available_height = available_rect.height()
        - label_height
        - 12.0
        - COLOR_SCALE_HEIGHT
        - COLOR_SCALE_LABEL_HEIGHT
        - 5.0;

    let cell_width = available_width / matrix.cols() as f32;
    let cell_height = available_height / matrix.rows() as f32;
    let cell_size = cell_width.min(cell_height).max(10.0);

    let mut hovered = None;

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing = egui::Vec2::ZERO;

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = egui::Vec2::ZERO;
            ui.add_space(label_width);
            for (c, label) in matrix.column_labels.iter().enumerate() {
                let highlighted = prev_hovered_cell.is_some_and(|(hc, _)| hc == c);
                let color = if highlighted {
                    egui::Color32::WHITE
                } else {
                    ui.style().visuals.text_color()
                };
                ui.add_sized(
                    [cell_size, label_height],
                    egui::Label::new(egui::RichText::new(label.as_str()).color(color).size(10.0)),
                );
            }
        });

        for (r, row) in matrix.values.rows().into_iter().enumerate() {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = egui::Vec2::ZERO;

                let highlighted = prev_hovered_cell.is_some_and(|(_, hr)| hr == r);
                let color = if highlighted {
                    egui::Color32::WHITE
                } else {
                    ui.style().visuals.text_color()
                };
                let label = matrix.row_labels.get(r).map_or("", String::as_str);
                ui.add_sized(
                    [label_width, cell_size],
                    egui::Label::new(egui::RichText::new(label).color(color).size(10.0)),
                );

                for (c, &value) in row.iter().enumerate() {
                    let cell_color = viridis(color_position(value, range));
                    let (rect, response) = ui.allocate_exact_size(
                        egui::Vec2::new(cell_size, cell_size),
                        egui::Sense::hover(),
                    );

                    let fill = if response.hovered() {
                        hovered = Some((c, r));
                        egui::Color32::from_rgb(
                            cell_color.r().saturating_add(40),
                            cell_color.g().saturating_add(40),
                            cell_color.b().saturating_add(40),
                        )
                    } else {
                        cell_color
                    };

                    ui.painter().rect_filled(rect, 0.0, fill);
                    ui.painter().rect_stroke(
                        rect,
                        0.0,
                        egui::Stroke::new(0.5, egui::Color32::from_gray(40)),
                        egui::epaint::StrokeKind::Outside,
                    );

                    if response.hovered() {
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{value:.2}"),
                            egui::FontId::proportional(9.0),
                            contrasting_text_color(cell_color),
                        );
                    }
                }
            });
        }

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = egui::Vec2::ZERO;
            ui.add_space(label_width);
            render_color_scale(ui, range, cell_size * matrix.cols() as f32);
        });
    });

    hovered
}
