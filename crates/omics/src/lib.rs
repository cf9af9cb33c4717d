pub mod dataset;
pub mod format;
pub mod heatmap;
pub mod network;
pub mod selection;
pub mod style;
pub mod volcano;

pub use dataset::{
    Condition, DatasetError, InteractionDataset, InteractionEdge,
    ProteinGroup, ProteinId, ProteinNode,
};
pub use heatmap::{HeatmapMatrix, NormalizationMode};
pub use network::{RenderEdge, RenderNode, RenderableGraph};
pub use selection::{SelectionHighlighter, SelectionState};
pub use style::{AlphaBlendStyler, NodeStyle, NodeStyler, Rgba};
pub use volcano::{
    Regulation, VolcanoFigure, VolcanoPoint, VolcanoThresholds,
};
