use eframe::egui;
use egui_graphs::{DisplayEdge, DisplayNode, Graph, Layout, LayoutState};
use petgraph::EdgeType;
use petgraph::graph::IndexType;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

const BASE_RADIUS: f32 = 60.0;
const RADIUS_PER_NODE: f32 = 12.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStateRing {
    /// Set once nodes have been placed; cleared by `reset_layout`.
    pub applied: bool,
}

impl LayoutState for LayoutStateRing {}

/// Places every node once on a circle, in node index order, starting at
/// the top and going clockwise. Positions are left alone afterwards so
/// dragging and fit-to-screen stay in effect.
#[derive(Debug, Clone, Default)]
pub struct LayoutRing {
    state: LayoutStateRing,
}

impl Layout<LayoutStateRing> for LayoutRing {
    fn from_state(state: LayoutStateRing) -> impl Layout<LayoutStateRing> {
        Self { state }
    }

    fn next<N, E, Ty, Ix, Dn, De>(&mut self, g: &mut Graph<N, E, Ty, Ix, Dn, De>, ui: &egui::Ui)
    where
        N: Clone,
        E: Clone,
        Ty: EdgeType,
        Ix: IndexType,
        Dn: DisplayNode<N, E, Ty, Ix>,
        De: DisplayEdge<N, E, Ty, Ix, Dn>,
    {
        if self.state.applied {
            return;
        }

        let center = ui.available_rect_before_wrap().center();
        let order: Vec<_> = g.nodes_iter().map(|(idx, _)| idx).collect();
        let positions = ring_positions(order.len(), center);
        for (idx, pos) in order.into_iter().zip(positions) {
            if let Some(node) = g.node_mut(idx) {
                node.set_location(pos);
            }
        }

        self.state.applied = true;
    }

    fn state(&self) -> LayoutStateRing {
        self.state.clone()
    }
}

/// `n` evenly spaced points on a circle around `center`, first one at the
/// top. The radius grows with the node count.
pub fn ring_positions(n: usize, center: egui::Pos2) -> Vec<egui::Pos2> {
    if n == 0 {
        return Vec::new();
    }
    let radius = BASE_RADIUS + n as f32 * RADIUS_PER_NODE;
    (0..n)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2
                + i as f32 * std::f32::consts::TAU / n as f32;
            egui::Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_starts_at_top_and_is_evenly_spaced() {
        let center = egui::Pos2::new(100.0, 100.0);
        let points = ring_positions(4, center);

        assert_eq!(points.len(), 4);
        let radius = BASE_RADIUS + 4.0 * RADIUS_PER_NODE;
        assert!((points[0].x - 100.0).abs() < 1e-3);
        assert!((points[0].y - (100.0 - radius)).abs() < 1e-3);
        for p in &points {
            assert!(((p.x - center.x).hypot(p.y - center.y) - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn empty_graph_has_no_positions() {
        assert!(ring_positions(0, egui::Pos2::ZERO).is_empty());
    }
}
