use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::ProteinId;
use crate::network::RenderableGraph;

pub const FULL_OPACITY: f64 = 1.0;
pub const DIMMED_OPACITY: f64 = 0.25;

/// Focus and per-node opacity of one rendered network.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub focused_id: Option<ProteinId>,
    pub connected_ids: BTreeSet<ProteinId>,
    pub opacity_by_id: BTreeMap<ProteinId, f64>,
}

/// Two-state focus machine: neutral (everything opaque) or focused on one
/// node, where only the node and its neighbours stay opaque.
///
/// The highlighter is bound to the node set of the graph it was created
/// for; a rebuilt graph gets a fresh highlighter.
#[derive(Debug, Clone)]
pub struct SelectionHighlighter {
    state: SelectionState,
}

impl SelectionHighlighter {
    pub fn new(graph: &RenderableGraph) -> Self {
        let opacity_by_id = graph
            .nodes
            .iter()
            .map(|n| (n.id, FULL_OPACITY))
            .collect();
        Self {
            state: SelectionState {
                focused_id: None,
                connected_ids: BTreeSet::new(),
                opacity_by_id,
            },
        }
    }

    /// Handle a click: `hit` is the node under the pointer, if any.
    /// Clicking empty space (or an id the graph does not contain) returns
    /// to neutral.
    pub fn click(&mut self, graph: &RenderableGraph, hit: Option<ProteinId>) {
        match hit {
            Some(id) if graph.contains_node(id) => self.focus(graph, id),
            _ => self.defocus(),
        }
    }

    pub fn double_click(&mut self) {
        self.defocus();
    }

    /// Focus `id`, recomputing neighbours and opacities from scratch. Works
    /// from both neutral and focused states.
    pub fn focus(&mut self, graph: &RenderableGraph, id: ProteinId) {
        let connected = graph.connected_nodes(id);

        for (node, opacity) in self.state.opacity_by_id.iter_mut() {
            *opacity = if *node == id || connected.contains(node) {
                FULL_OPACITY
            } else {
                DIMMED_OPACITY
            };
        }

        self.state.focused_id = Some(id);
        self.state.connected_ids = connected;
    }

    pub fn defocus(&mut self) {
        self.state.focused_id = None;
        self.state.connected_ids.clear();
        for opacity in self.state.opacity_by_id.values_mut() {
            *opacity = FULL_OPACITY;
        }
    }

    pub fn focused(&self) -> Option<ProteinId> {
        self.state.focused_id
    }

    pub fn connected(&self) -> &BTreeSet<ProteinId> {
        &self.state.connected_ids
    }

    /// Opacity of `id`; unknown ids are drawn fully opaque.
    pub fn opacity(&self, id: ProteinId) -> f64 {
        self.state
            .opacity_by_id
            .get(&id)
            .copied()
            .unwrap_or(FULL_OPACITY)
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }
}
