use ndarray::{Array2, Axis};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: usize = 14;
pub const DEFAULT_COLS: usize = 10;

const BASE_OFFSET_MAX: f64 = 0.5;
const SHIFT_PROBABILITY: f64 = 0.35;
const SHIFT_MIN: f64 = 0.8;
const NOISE_SPAN: f64 = 0.55;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    Raw,
    #[default]
    ZScore,
}

impl NormalizationMode {
    pub const ALL: [NormalizationMode; 2] =
        [NormalizationMode::Raw, NormalizationMode::ZScore];

    pub fn display_name(&self) -> &'static str {
        match self {
            NormalizationMode::Raw => "Raw",
            NormalizationMode::ZScore => "Z-score (row)",
        }
    }
}

/// Proteins (rows) by samples (columns). The first half of the columns are
/// control samples, the rest condition samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapMatrix {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: Array2<f64>,
}

impl HeatmapMatrix {
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// (min, max) over all cells, or `None` for an empty matrix.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Number of control columns: the first half, rounding up for odd counts.
pub fn control_columns(cols: usize) -> usize {
    cols.div_ceil(2)
}

pub fn column_labels(cols: usize) -> Vec<String> {
    let controls = control_columns(cols);
    (0..cols)
        .map(|c| {
            if c < controls {
                format!("Ctrl_{}", c + 1)
            } else {
                format!("Cond_{}", c - controls + 1)
            }
        })
        .collect()
}

pub fn row_labels(rows: usize) -> Vec<String> {
    (0..rows).map(|r| format!("P{:02}", r + 1)).collect()
}

/// Draw a synthetic expression matrix.
///
/// Each row gets a base offset in [0, 0.5); about a third of rows also get
/// a condition shift of magnitude [0.8, 1.8) applied to the condition
/// columns only. Every cell adds uniform noise in [-0.275, 0.275).
pub fn generate<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> HeatmapMatrix {
    let controls = control_columns(cols);
    let mut values = Array2::<f64>::zeros((rows, cols));

    for mut row in values.rows_mut() {
        let base = rng.random::<f64>() * BASE_OFFSET_MAX;
        let shift = if rng.random_bool(SHIFT_PROBABILITY) {
            let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
            sign * (SHIFT_MIN + rng.random::<f64>())
        } else {
            0.0
        };

        for (c, cell) in row.iter_mut().enumerate() {
            let condition_shift = if c >= controls { shift } else { 0.0 };
            let noise = (rng.random::<f64>() - 0.5) * NOISE_SPAN;
            *cell = base + condition_shift + noise;
        }
    }

    HeatmapMatrix {
        row_labels: row_labels(rows),
        column_labels: column_labels(cols),
        values,
    }
}

/// Apply `mode` to the matrix. `Raw` hands it back untouched.
pub fn normalize(mut matrix: HeatmapMatrix, mode: NormalizationMode) -> HeatmapMatrix {
    match mode {
        NormalizationMode::Raw => matrix,
        NormalizationMode::ZScore => {
            zscore_rows(&mut matrix.values);
            matrix
        }
    }
}

/// Center and scale each row by its population mean and standard
/// deviation. A row with zero spread becomes all zeros.
pub fn zscore_rows(values: &mut Array2<f64>) {
    if values.ncols() == 0 {
        return;
    }
    for mut row in values.axis_iter_mut(Axis(0)) {
        let n = row.len() as f64;
        let mean = row.sum() / n;
        let variance = row.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let sd = variance.sqrt();

        // A constant row can leave rounding residue in `sd`.
        let first = row[0];
        if row.iter().all(|&v| v == first) || sd <= f64::EPSILON * mean.abs().max(1.0) {
            row.fill(0.0);
            continue;
        }
        row.mapv_inplace(|v| (v - mean) / sd);
    }
}
