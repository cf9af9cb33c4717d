//! Display strings shared by the three views.

/// Score or threshold in `0..=100` shown as a fraction with two decimals.
pub fn format_score(score: u8) -> String {
    format!("{:.2}", f64::from(score) / 100.0)
}

pub fn format_fold_change(cutoff: f64) -> String {
    format!("{:.2} (|log2FC|)", cutoff)
}

/// Scientific notation with one decimal digit of mantissa, e.g. `6.8e-4`.
pub fn format_p_value(p: f64) -> String {
    format!("{:.1e}", p)
}

pub fn node_tooltip(label: &str, note: &str) -> String {
    format!("{}\n{}", label, note)
}

pub fn edge_tooltip(score: u8) -> String {
    format!("score: {}", format_score(score))
}

/// Hover text for one volcano point: label, then both coordinates.
pub fn volcano_point_tooltip(label: &str, log2_fold_change: f64, neg_log10_p: f64) -> String {
    format!("{}\nlog2FC={:.2}\n-log10(p)={:.2}", label, log2_fold_change, neg_log10_p)
}
