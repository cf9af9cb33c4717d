use crate::layout_circular::{LayoutRing, LayoutStateRing};
use crate::node_shapes::ProteinNodeShape;
use eframe::egui;
use egui_graphs::{
    DefaultEdgeShape, DisplayEdge, DisplayNode, DrawContext, EdgeProps, Graph, GraphView, Node,
};
use omics::network::InteractionGraph;
use omics::{RenderEdge, RenderNode};
use petgraph::Undirected;
use petgraph::graph::DefaultIx;
use petgraph::stable_graph::IndexType;
use petgraph::EdgeType;

const MIN_EDGE_WIDTH: f64 = 0.8;
const MAX_EDGE_WIDTH: f64 = 4.5;

pub type NetworkDisplay =
    Graph<RenderNode, RenderEdge, Undirected, DefaultIx, ProteinNodeShape, ScoredEdgeShape>;

pub type NetworkGraphView<'a> = GraphView<
    'a,
    RenderNode,
    RenderEdge,
    Undirected,
    DefaultIx,
    ProteinNodeShape,
    ScoredEdgeShape,
    LayoutStateRing,
    LayoutRing,
>;

/// Wrap a petgraph network for the renderer: node labels from the protein
/// label, no edge labels (scores show on hover instead).
pub fn setup_network_display(g: &InteractionGraph) -> NetworkDisplay {
    let mut graph = NetworkDisplay::from(g);
    for (idx, node) in g.node_indices().zip(g.node_weights()) {
        if let Some(graph_node) = graph.node_mut(idx) {
            graph_node.set_label(node.label.clone());
        }
    }
    let edge_indices: Vec<_> = graph.edges_iter().map(|(idx, _)| idx).collect();
    for edge_idx in edge_indices {
        if let Some(edge) = graph.edge_mut(edge_idx) {
            edge.set_label(String::new());
        }
    }
    graph
}

/// Stroke width for an interaction score, linear from the thinnest line at
/// score 0 to the thickest at 100.
pub fn edge_width(score: u8) -> f32 {
    let t = f64::from(score.min(omics::dataset::MAX_SCORE)) / f64::from(omics::dataset::MAX_SCORE);
    (MIN_EDGE_WIDTH + (MAX_EDGE_WIDTH - MIN_EDGE_WIDTH) * t) as f32
}

/// Edge shape whose width tracks the interaction score.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScoredEdgeShape {
    default_impl: DefaultEdgeShape,
    score: u8,
}

impl From<EdgeProps<RenderEdge>> for ScoredEdgeShape {
    fn from(props: EdgeProps<RenderEdge>) -> Self {
        let score = props.payload.value;
        let mut default_impl = DefaultEdgeShape::from(props);
        default_impl.width = edge_width(score);
        Self {
            default_impl,
            score,
        }
    }
}

impl<Ty: EdgeType, Ix: IndexType, D: DisplayNode<RenderNode, RenderEdge, Ty, Ix>>
    DisplayEdge<RenderNode, RenderEdge, Ty, Ix, D> for ScoredEdgeShape
{
    fn is_inside(
        &self,
        start: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
        end: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
        pos: egui::Pos2,
    ) -> bool {
        self.default_impl.is_inside(start, end, pos)
    }

    fn shapes(
        &mut self,
        start: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
        end: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
        ctx: &DrawContext,
    ) -> Vec<egui::Shape> {
        self.default_impl.shapes(start, end, ctx)
    }

    fn update(&mut self, state: &EdgeProps<RenderEdge>) {
        self.score = state.payload.value;
        self.default_impl.width = edge_width(self.score);
        DisplayEdge::<RenderNode, RenderEdge, Ty, Ix, D>::update(&mut self.default_impl, state);
    }

    fn extra_bounds(
        &self,
        start: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
        end: &Node<RenderNode, RenderEdge, Ty, Ix, D>,
    ) -> Option<(egui::Pos2, egui::Pos2)> {
        self.default_impl.extra_bounds(start, end)
    }
}

impl ScoredEdgeShape {
    pub fn score(&self) -> u8 {
        self.score
    }
}
