use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Undirected;
use std::collections::{BTreeSet, HashMap};

use crate::dataset::{Condition, InteractionDataset, ProteinGroup, ProteinId};
use crate::format::{edge_tooltip, node_tooltip};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: ProteinId,
    pub label: String,
    pub group: ProteinGroup,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderEdge {
    pub from: ProteinId,
    pub to: ProteinId,
    /// Display weight; equal to the interaction score.
    pub value: u8,
    pub tooltip: String,
}

pub type InteractionGraph = StableGraph<RenderNode, RenderEdge, Undirected>;

/// Nodes and filtered edges ready to hand to a graph renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderableGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderableGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: ProteinId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: ProteinId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids sharing at least one edge with `id`, ignoring edge direction.
    pub fn connected_nodes(&self, id: ProteinId) -> BTreeSet<ProteinId> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.from == id {
                    Some(e.to)
                } else if e.to == id {
                    Some(e.from)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn edges_of(
        &self,
        id: ProteinId,
    ) -> impl Iterator<Item = &RenderEdge> + '_ {
        self.edges.iter().filter(move |e| e.from == id || e.to == id)
    }

    /// Convert into a petgraph graph, returning the id -> index map
    /// alongside it.
    pub fn to_stable_graph(
        &self,
    ) -> (InteractionGraph, HashMap<ProteinId, NodeIndex>) {
        let mut g = InteractionGraph::default();
        let mut index = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let idx = g.add_node(node.clone());
            index.insert(node.id, idx);
        }

        for edge in &self.edges {
            if let (Some(&a), Some(&b)) =
                (index.get(&edge.from), index.get(&edge.to))
            {
                g.add_edge(a, b, edge.clone());
            }
        }

        (g, index)
    }
}

/// Build the renderable network for `condition`, keeping only edges whose
/// score reaches `min_score`. Every protein is emitted, connected or not.
pub fn build(
    dataset: &InteractionDataset,
    condition: Condition,
    min_score: u8,
) -> RenderableGraph {
    let nodes = dataset
        .proteins()
        .iter()
        .map(|p| RenderNode {
            id: p.id,
            label: p.label.clone(),
            group: p.group,
            tooltip: node_tooltip(&p.label, &p.note),
        })
        .collect();

    let edges = dataset
        .edges(condition)
        .iter()
        .filter(|e| e.score >= min_score)
        .map(|e| RenderEdge {
            from: e.from,
            to: e.to,
            value: e.score,
            tooltip: edge_tooltip(e.score),
        })
        .collect();

    RenderableGraph { nodes, edges }
}
