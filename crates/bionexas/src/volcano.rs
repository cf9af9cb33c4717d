use crate::charts::{PlotSurface, plot_or_log};
use crate::config::{Freshness, VolcanoConfig};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use omics::format::{format_fold_change, format_p_value, volcano_point_tooltip};
use omics::volcano::{X_EXTENT, Y_EXTENT, generate};
use omics::{Regulation, VolcanoFigure, VolcanoPoint, VolcanoThresholds};
use rand::rngs::StdRng;

const POINT_RADIUS: f32 = 2.5;

/// Owns the volcano surface and the RNG its samples come from.
pub struct VolcanoController {
    rng: StdRng,
    freshness: Freshness,
    point_count: usize,
    slider_max: u32,
    sample: Option<Vec<VolcanoPoint>>,
    surface: Option<PlotSurface<VolcanoFigure>>,
    fold_change_label: String,
    p_value_label: String,
}

impl VolcanoController {
    pub fn new(rng: StdRng, config: &VolcanoConfig, enabled: bool) -> Self {
        if !enabled {
            tracing::debug!("volcano panel disabled");
        }
        Self {
            rng,
            freshness: config.freshness,
            point_count: config.point_count,
            slider_max: config.slider_max,
            sample: None,
            surface: enabled.then(PlotSurface::default),
            fold_change_label: String::new(),
            p_value_label: String::new(),
        }
    }

    pub fn slider_max(&self) -> u32 {
        self.slider_max
    }

    /// Redraw for the given slider positions. A new sample is drawn when
    /// `resample` is set, when the policy always regenerates, or when there
    /// is no sample yet.
    pub fn redraw(&mut self, fold_change_slider: u32, p_value_slider: u32, resample: bool) {
        let thresholds =
            VolcanoThresholds::from_sliders(fold_change_slider, p_value_slider, self.slider_max);
        self.fold_change_label = format_fold_change(thresholds.fold_change);
        self.p_value_label = format_p_value(thresholds.p_value);

        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("volcano panel disabled, skipping redraw");
            return;
        };

        let fresh = resample
            || self.freshness == Freshness::AlwaysRegenerate
            || self.sample.is_none();
        if fresh {
            self.sample = Some(generate(&mut self.rng, self.point_count));
        }
        let points = self.sample.clone().unwrap_or_default();

        plot_or_log(surface, VolcanoFigure { points, thresholds }, "volcano");
    }

    pub fn fold_change_label(&self) -> &str {
        &self.fold_change_label
    }

    pub fn p_value_label(&self) -> &str {
        &self.p_value_label
    }

    pub fn figure(&self) -> Option<&VolcanoFigure> {
        self.surface.as_ref().and_then(|s| s.current())
    }

    pub fn surface(&self) -> Option<&PlotSurface<VolcanoFigure>> {
        self.surface.as_ref()
    }
}

fn regulation_style(regulation: Regulation) -> (&'static str, egui::Color32) {
    match regulation {
        Regulation::Up => ("Up", egui::Color32::from_rgb(255, 120, 120)),
        Regulation::Down => ("Down", egui::Color32::from_rgb(46, 210, 255)),
        Regulation::Unchanged => ("Not significant", egui::Color32::from_gray(150)),
    }
}

/// Draw the scatter, colored by regulation, with the threshold lines over
/// it.
pub fn show_volcano(ui: &mut egui::Ui, figure: &VolcanoFigure) {
    let point_series = [Regulation::Unchanged, Regulation::Down, Regulation::Up]
        .map(|r| regulation_style(r).0);

    Plot::new("volcano_plot")
        .legend(Legend::default())
        .label_formatter(move |name, value| {
            let point = point_series
                .iter()
                .any(|series| *series == name)
                .then(|| figure.nearest_point(value.x, value.y))
                .flatten();
            match point {
                Some(p) => volcano_point_tooltip(&p.label, p.log2_fold_change, p.neg_log10_p),
                None => format!("log2FC={:.2}\n-log10(p)={:.2}", value.x, value.y),
            }
        })
        .x_axis_label("log2 fold change")
        .y_axis_label("-log10(p)")
        .include_x(-X_EXTENT)
        .include_x(X_EXTENT)
        .include_y(0.0)
        .include_y(Y_EXTENT)
        .show(ui, |plot_ui| {
            for regulation in [Regulation::Unchanged, Regulation::Down, Regulation::Up] {
                let (name, color) = regulation_style(regulation);
                let series: Vec<[f64; 2]> = figure
                    .points
                    .iter()
                    .filter(|p| Regulation::classify(p, &figure.thresholds) == regulation)
                    .map(|p| [p.log2_fold_change, p.neg_log10_p])
                    .collect();
                plot_ui.points(
                    Points::new(name, PlotPoints::from(series))
                        .color(color)
                        .radius(POINT_RADIUS),
                );
            }

            let line_color = egui::Color32::from_rgba_unmultiplied(232, 236, 255, 140);
            for line in figure.reference_lines() {
                plot_ui.line(
                    Line::new("Thresholds", PlotPoints::from(vec![line.start, line.end]))
                        .color(line_color)
                        .width(1.0),
                );
            }
        });
}
