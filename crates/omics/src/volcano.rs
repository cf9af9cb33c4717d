use rand::Rng;
use std::f64::consts::PI;

pub const SLIDER_MAX: u32 = 300;
pub const DEFAULT_POINT_COUNT: usize = 240;

const SPREAD: f64 = 1.1;
const OUTLIER_PROBABILITY: f64 = 0.08;
const OUTLIER_SHIFT: f64 = 2.2;
const SIGNIFICANT_PROBABILITY: f64 = 0.12;
const P_FLOOR: f64 = 1e-12;
const UNIFORM_FLOOR: f64 = 1e-9;

/// Visible extent of the reference lines.
pub const X_EXTENT: f64 = 4.0;
pub const Y_EXTENT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoPoint {
    pub log2_fold_change: f64,
    pub neg_log10_p: f64,
    pub label: String,
}

/// |log2FC| cutoff for a fold-change slider position (0..=300 -> 0..=3).
pub fn fold_change_cutoff(slider: u32) -> f64 {
    f64::from(slider) / 100.0
}

/// p-value cutoff for a slider position, log-spaced from 1e-1 at 0 down to
/// 1e-6 at `slider_max`.
pub fn p_value_cutoff(slider: u32, slider_max: u32) -> f64 {
    let x = if slider_max == 0 {
        0.0
    } else {
        f64::from(slider.min(slider_max)) / f64::from(slider_max)
    };
    10f64.powf(-(x * 5.0 + 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolcanoThresholds {
    pub fold_change: f64,
    pub p_value: f64,
}

impl VolcanoThresholds {
    pub fn from_sliders(fold_change: u32, p_value: u32, slider_max: u32) -> Self {
        Self {
            fold_change: fold_change_cutoff(fold_change),
            p_value: p_value_cutoff(p_value, slider_max),
        }
    }

    /// Height of the significance line on the -log10(p) axis.
    pub fn neg_log10_p(&self) -> f64 {
        -self.p_value.log10()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regulation {
    Up,
    Down,
    Unchanged,
}

impl Regulation {
    /// Significant when past the fold-change cutoff on either side and at
    /// or above the p-value line.
    pub fn classify(point: &VolcanoPoint, thresholds: &VolcanoThresholds) -> Self {
        let significant = point.neg_log10_p >= thresholds.neg_log10_p();
        if !significant || point.log2_fold_change.abs() < thresholds.fold_change {
            Regulation::Unchanged
        } else if point.log2_fold_change > 0.0 {
            Regulation::Up
        } else {
            Regulation::Down
        }
    }
}

fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let nonzero = |x: f64| if x == 0.0 { UNIFORM_FLOOR } else { x };
    let u = nonzero(rng.random::<f64>());
    let v = nonzero(rng.random::<f64>());
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Draw `n` synthetic volcano points.
///
/// log2FC is a scaled standard normal with occasional ±2.2 outliers. The
/// p-value is mostly uniform, with a minority drawn log-uniformly from
/// [1e-6, 1e-2] to populate the significant region.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<VolcanoPoint> {
    (0..n)
        .map(|i| {
            let mut log2_fold_change = standard_normal(rng) * SPREAD;
            if rng.random_bool(OUTLIER_PROBABILITY) {
                log2_fold_change += if rng.random_bool(0.5) {
                    -OUTLIER_SHIFT
                } else {
                    OUTLIER_SHIFT
                };
            }

            let p = if rng.random_bool(SIGNIFICANT_PROBABILITY) {
                10f64.powf(-(2.0 + rng.random::<f64>() * 4.0))
            } else {
                rng.random::<f64>()
            };

            VolcanoPoint {
                log2_fold_change,
                neg_log10_p: -p.max(P_FLOOR).log10(),
                label: format!("Protein_{}", i + 1),
            }
        })
        .collect()
}

/// Segment in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

/// Everything one volcano redraw hands to the chart sink.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoFigure {
    pub points: Vec<VolcanoPoint>,
    pub thresholds: VolcanoThresholds,
}

impl VolcanoFigure {
    /// Two vertical lines at ±fold-change and one horizontal line at the
    /// p-value cutoff, each spanning the fixed visible extent.
    pub fn reference_lines(&self) -> [ReferenceLine; 3] {
        let fc = self.thresholds.fold_change;
        let y = self.thresholds.neg_log10_p();
        [
            ReferenceLine {
                start: [fc, 0.0],
                end: [fc, Y_EXTENT],
            },
            ReferenceLine {
                start: [-fc, 0.0],
                end: [-fc, Y_EXTENT],
            },
            ReferenceLine {
                start: [-X_EXTENT, y],
                end: [X_EXTENT, y],
            },
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.thresholds.fold_change.is_finite()
            && self.thresholds.p_value.is_finite()
            && self
                .points
                .iter()
                .all(|p| p.log2_fold_change.is_finite() && p.neg_log10_p.is_finite())
    }

    /// Point closest to `(x, y)` in data coordinates.
    pub fn nearest_point(&self, x: f64, y: f64) -> Option<&VolcanoPoint> {
        let distance = |p: &VolcanoPoint| {
            (p.log2_fold_change - x).powi(2) + (p.neg_log10_p - y).powi(2)
        };
        self.points
            .iter()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
    }

    pub fn count(&self, regulation: Regulation) -> usize {
        self.points
            .iter()
            .filter(|p| Regulation::classify(p, &self.thresholds) == regulation)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn p_cutoff_endpoints() {
        assert!((p_value_cutoff(0, SLIDER_MAX) - 0.1).abs() < 1e-15);
        assert!((p_value_cutoff(300, SLIDER_MAX) - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn p_cutoff_is_decreasing_and_bounded() {
        let mut prev = f64::INFINITY;
        for v in 0..=SLIDER_MAX {
            let p = p_value_cutoff(v, SLIDER_MAX);
            assert!(p < prev, "not decreasing at {v}");
            assert!((1e-6 - 1e-18..=0.1 + 1e-15).contains(&p));
            prev = p;
        }
    }

    #[test]
    fn p_cutoff_clamps_out_of_domain_sliders() {
        assert_eq!(p_value_cutoff(900, SLIDER_MAX), p_value_cutoff(300, SLIDER_MAX));
        assert_eq!(p_value_cutoff(5, 0), p_value_cutoff(0, SLIDER_MAX));
    }

    #[test]
    fn fold_change_cutoff_is_slider_over_hundred() {
        assert_eq!(fold_change_cutoff(100), 1.0);
        assert_eq!(fold_change_cutoff(0), 0.0);
        assert_eq!(fold_change_cutoff(300), 3.0);
    }

    #[test]
    fn generated_points_are_labelled_and_finite() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate(&mut rng, DEFAULT_POINT_COUNT);

        assert_eq!(points.len(), 240);
        assert_eq!(points[0].label, "Protein_1");
        assert_eq!(points[239].label, "Protein_240");
        for p in &points {
            assert!(p.log2_fold_change.is_finite());
            assert!((0.0..=12.0).contains(&p.neg_log10_p));
        }
    }

    #[test]
    fn same_seed_gives_same_points() {
        let a = generate(&mut StdRng::seed_from_u64(42), 50);
        let b = generate(&mut StdRng::seed_from_u64(42), 50);
        let c = generate(&mut StdRng::seed_from_u64(43), 50);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn outlier_shift_widens_fold_change_spread() {
        let points = generate(&mut StdRng::seed_from_u64(29), 20_000);
        let n = points.len() as f64;
        let mean = points.iter().map(|p| p.log2_fold_change).sum::<f64>() / n;
        let variance = points
            .iter()
            .map(|p| (p.log2_fold_change - mean).powi(2))
            .sum::<f64>()
            / n;

        // 1.1^2 from the normal part, plus 0.08 * 2.2^2 from the outliers.
        let expected = SPREAD.powi(2) + OUTLIER_PROBABILITY * OUTLIER_SHIFT.powi(2);
        assert!((variance - expected).abs() < 0.1, "variance {variance}");
        assert!(points.iter().any(|p| p.log2_fold_change.abs() > 4.5));
    }

    #[test]
    fn significant_p_values_fall_in_log_uniform_band() {
        let points = generate(&mut StdRng::seed_from_u64(31), 5_000);
        let in_band = points
            .iter()
            .filter(|p| (2.0..=6.0).contains(&p.neg_log10_p))
            .count() as f64
            / points.len() as f64;

        // 12% from the log-uniform branch plus ~0.9% of uniform draws.
        assert!((0.10..0.16).contains(&in_band), "share in band {in_band}");
        let beyond = points.iter().filter(|p| p.neg_log10_p > 6.0).count();
        assert!(beyond <= 1, "{beyond} p-values below 1e-6");
    }

    #[test]
    fn counts_split_points_by_regulation() {
        let point = |fc: f64, y: f64| VolcanoPoint {
            log2_fold_change: fc,
            neg_log10_p: y,
            label: String::new(),
        };
        let figure = VolcanoFigure {
            points: vec![point(2.0, 3.0), point(1.5, 4.0), point(-2.0, 3.0), point(0.1, 0.5)],
            thresholds: VolcanoThresholds {
                fold_change: 1.0,
                p_value: 0.01,
            },
        };

        assert_eq!(figure.count(Regulation::Up), 2);
        assert_eq!(figure.count(Regulation::Down), 1);
        assert_eq!(figure.count(Regulation::Unchanged), 1);
    }

    #[test]
    fn nearest_point_finds_hovered_protein() {
        let figure = VolcanoFigure {
            points: generate(&mut StdRng::seed_from_u64(4), 30),
            thresholds: VolcanoThresholds::from_sliders(100, 100, SLIDER_MAX),
        };
        let target = &figure.points[12];
        let hit = figure
            .nearest_point(target.log2_fold_change, target.neg_log10_p)
            .map(|p| p.label.as_str());
        assert_eq!(hit, Some("Protein_13"));

        let empty = VolcanoFigure {
            points: Vec::new(),
            thresholds: figure.thresholds,
        };
        assert_eq!(empty.nearest_point(0.0, 0.0), None);
    }

    #[test]
    fn reference_lines_follow_thresholds() {
        let figure = VolcanoFigure {
            points: Vec::new(),
            thresholds: VolcanoThresholds::from_sliders(150, 0, SLIDER_MAX),
        };
        let [right, left, horizontal] = figure.reference_lines();

        assert_eq!(right.start, [1.5, 0.0]);
        assert_eq!(right.end, [1.5, Y_EXTENT]);
        assert_eq!(left.start, [-1.5, 0.0]);
        assert!((horizontal.start[1] - 1.0).abs() < 1e-12);
        assert_eq!(horizontal.start[0], -X_EXTENT);
        assert_eq!(horizontal.end[0], X_EXTENT);
    }

    #[test]
    fn classification_needs_both_cutoffs() {
        let thresholds = VolcanoThresholds {
            fold_change: 1.0,
            p_value: 0.01,
        };
        let point = |fc: f64, y: f64| VolcanoPoint {
            log2_fold_change: fc,
            neg_log10_p: y,
            label: String::new(),
        };

        assert_eq!(Regulation::classify(&point(1.5, 3.0), &thresholds), Regulation::Up);
        assert_eq!(Regulation::classify(&point(-2.0, 2.5), &thresholds), Regulation::Down);
        assert_eq!(
            Regulation::classify(&point(0.5, 5.0), &thresholds),
            Regulation::Unchanged
        );
        assert_eq!(
            Regulation::classify(&point(3.0, 1.0), &thresholds),
            Regulation::Unchanged
        );
    }

    #[test]
    fn non_finite_figures_are_detected() {
        let mut figure = VolcanoFigure {
            points: generate(&mut StdRng::seed_from_u64(1), 10),
            thresholds: VolcanoThresholds::from_sliders(100, 130, SLIDER_MAX),
        };
        assert!(figure.is_finite());
        figure.points[3].log2_fold_change = f64::NAN;
        assert!(!figure.is_finite());
    }
}
