use crate::config::{NetworkConfig, PanelConfig};
use crate::graph_view::{NetworkDisplay, setup_network_display};
use omics::network::build;
use omics::{
    AlphaBlendStyler, Condition, InteractionDataset, NodeStyler, ProteinId, RenderableGraph,
    SelectionHighlighter,
};
use petgraph::stable_graph::NodeIndex;
use std::collections::HashMap;

pub const PREVIEW_VIEW_ID: &str = "network_preview";
pub const MAIN_VIEW_ID: &str = "network_main";

/// Node and edge counts shown next to the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
}

/// One rendered network: the filtered graph, its display graph and, for
/// the interactive instance, the selection state bound to it.
pub struct NetworkInstance {
    pub condition: Condition,
    pub threshold: u8,
    pub view: RenderableGraph,
    pub display: NetworkDisplay,
    index: HashMap<ProteinId, NodeIndex>,
    highlighter: Option<SelectionHighlighter>,
    /// Nodes need placing on the next frame.
    pub layout_pending: bool,
    /// Viewport should fit the graph on the next frame.
    pub fit_pending: bool,
}

impl NetworkInstance {
    fn new(
        dataset: &InteractionDataset,
        condition: Condition,
        threshold: u8,
        interactive: bool,
    ) -> Self {
        let view = build(dataset, condition, threshold);
        let (g, index) = view.to_stable_graph();
        let display = setup_network_display(&g);
        let highlighter = interactive.then(|| SelectionHighlighter::new(&view));
        Self {
            condition,
            threshold,
            view,
            display,
            index,
            highlighter,
            layout_pending: true,
            fit_pending: true,
        }
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            nodes: self.view.node_count(),
            edges: self.view.edge_count(),
        }
    }

    pub fn highlighter(&self) -> Option<&SelectionHighlighter> {
        self.highlighter.as_ref()
    }

    pub fn node_index(&self, id: ProteinId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Protein id behind a display node index.
    pub fn protein_at(&self, idx: NodeIndex) -> Option<ProteinId> {
        self.display.node(idx).map(|n| n.payload().id)
    }

    pub fn hovered_protein(&self) -> Option<ProteinId> {
        self.display
            .hovered_node()
            .and_then(|idx| self.protein_at(idx))
    }

    fn defocus(&mut self) {
        if let Some(h) = self.highlighter.as_mut() {
            h.defocus();
        }
        self.unselect_all();
    }

    /// Clear the engine's own node selection.
    fn unselect_all(&mut self) {
        let selected: Vec<_> = self
            .display
            .nodes_iter()
            .filter(|(_, n)| n.selected())
            .map(|(idx, _)| idx)
            .collect();
        for idx in selected {
            if let Some(node) = self.display.node_mut(idx) {
                node.set_selected(false);
            }
        }
    }

    /// Push per-node colors derived from the current opacities onto the
    /// display shapes.
    fn apply_styles(&mut self, styler: &dyn NodeStyler) {
        for node in &self.view.nodes {
            let opacity = self
                .highlighter
                .as_ref()
                .map_or(1.0, |h| h.opacity(node.id));
            let style = styler.style(node, opacity);
            if let Some(idx) = self.index.get(&node.id)
                && let Some(display_node) = self.display.node_mut(*idx)
            {
                display_node.display_mut().set_style(style);
            }
        }
    }
}

/// Owns the static preview network and the interactive main network.
pub struct NetworkController {
    dataset: InteractionDataset,
    preview: Option<NetworkInstance>,
    main: Option<NetworkInstance>,
    stats: Option<NetworkStats>,
    styler: Box<dyn NodeStyler>,
}

impl NetworkController {
    /// Build the preview once and the main instance at the given controls.
    /// Disabled panels get no instance.
    pub fn new(
        dataset: InteractionDataset,
        config: &NetworkConfig,
        panels: &PanelConfig,
        condition: Condition,
        threshold: u8,
    ) -> Self {
        Self::with_styler(
            dataset,
            config,
            panels,
            condition,
            threshold,
            Box::new(AlphaBlendStyler::default()),
        )
    }

    pub fn with_styler(
        dataset: InteractionDataset,
        config: &NetworkConfig,
        panels: &PanelConfig,
        condition: Condition,
        threshold: u8,
        styler: Box<dyn NodeStyler>,
    ) -> Self {
        let mut preview = panels.preview.then(|| {
            NetworkInstance::new(
                &dataset,
                config.preview_condition,
                config.preview_threshold,
                false,
            )
        });
        if let Some(p) = preview.as_mut() {
            p.apply_styles(styler.as_ref());
        }
        let stats = preview.as_ref().map(NetworkInstance::stats);
        if preview.is_none() {
            tracing::debug!("preview panel disabled, skipping preview network");
        }

        let mut controller = Self {
            dataset,
            preview,
            main: None,
            stats,
            styler,
        };
        if panels.network {
            controller.install_main(condition, threshold);
        } else {
            tracing::debug!("network panel disabled, skipping main network");
        }
        controller
    }

    fn install_main(&mut self, condition: Condition, threshold: u8) {
        let mut main = NetworkInstance::new(&self.dataset, condition, threshold, true);
        main.apply_styles(self.styler.as_ref());
        tracing::debug!(
            %condition,
            threshold,
            nodes = main.view.node_count(),
            edges = main.view.edge_count(),
            "rebuilt main network"
        );
        self.main = Some(main);
    }

    /// Replace the main instance with one built for the new controls. Focus
    /// and layout start over.
    pub fn rebuild_main(&mut self, condition: Condition, threshold: u8) {
        if self.main.is_none() {
            tracing::debug!("network panel disabled, ignoring rebuild");
            return;
        }
        self.install_main(condition, threshold);
    }

    /// Fit the main view and clear focus, keeping the current graph.
    pub fn reset_view(&mut self) {
        let Some(main) = self.main.as_mut() else {
            tracing::debug!("network panel disabled, ignoring reset");
            return;
        };
        main.fit_pending = true;
        main.defocus();
        main.apply_styles(self.styler.as_ref());
    }

    /// Route a click on the main canvas; `hit` is the protein under the
    /// pointer, if any.
    pub fn click_main(&mut self, hit: Option<ProteinId>) {
        let Some(main) = self.main.as_mut() else {
            return;
        };
        match main.highlighter.as_mut() {
            Some(h) => h.click(&main.view, hit),
            None => return,
        }
        if main.highlighter.as_ref().and_then(|h| h.focused()).is_none() {
            main.unselect_all();
        }
        main.apply_styles(self.styler.as_ref());
    }

    pub fn double_click_main(&mut self) {
        let Some(main) = self.main.as_mut() else {
            return;
        };
        main.defocus();
        main.apply_styles(self.styler.as_ref());
    }

    /// Re-derive node colors after a draw pass. The engine rebuilds node
    /// shapes from props while drawing, so styles are pushed again every
    /// frame.
    pub fn after_draw(&mut self) {
        if let Some(main) = self.main.as_mut() {
            main.apply_styles(self.styler.as_ref());
        }
    }

    pub fn preview(&self) -> Option<&NetworkInstance> {
        self.preview.as_ref()
    }

    pub fn preview_mut(&mut self) -> Option<&mut NetworkInstance> {
        self.preview.as_mut()
    }

    pub fn main(&self) -> Option<&NetworkInstance> {
        self.main.as_ref()
    }

    pub fn main_mut(&mut self) -> Option<&mut NetworkInstance> {
        self.main.as_mut()
    }

    pub fn stats(&self) -> Option<NetworkStats> {
        self.stats
    }
}
