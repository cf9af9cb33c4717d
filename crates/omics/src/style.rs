//! Node styling derived from selection opacity.
//!
//! Renderers without per-node opacity express it through the alpha channel
//! of the label and border colors instead. The derivation lives behind
//! [`NodeStyler`] so a renderer with native opacity can supply its own.

use serde::{Deserialize, Serialize};

use crate::dataset::ProteinGroup;
use crate::network::RenderNode;

/// Straight (non-premultiplied) color with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Alpha as an 8-bit channel.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Colors applied to a node after each draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub font: Rgba,
    pub border: Rgba,
}

pub trait NodeStyler {
    fn style(&self, node: &RenderNode, opacity: f64) -> NodeStyle;
}

/// Scales a fixed base alpha by the node's opacity:
/// `alpha = base_alpha * opacity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaBlendStyler {
    pub ink: Rgba,
    pub font_alpha: f64,
    pub border_alpha: f64,
}

impl Default for AlphaBlendStyler {
    fn default() -> Self {
        Self {
            ink: Rgba::new(232, 236, 255, 1.0),
            font_alpha: 0.85,
            border_alpha: 0.35,
        }
    }
}

impl NodeStyler for AlphaBlendStyler {
    fn style(&self, _node: &RenderNode, opacity: f64) -> NodeStyle {
        let opacity = opacity.clamp(0.0, 1.0);
        NodeStyle {
            font: self.ink.with_alpha(self.font_alpha * opacity),
            border: self.ink.with_alpha(self.border_alpha * opacity),
        }
    }
}

/// Fill color for a protein group.
pub fn group_fill(group: ProteinGroup) -> Rgba {
    match group {
        ProteinGroup::Cytokine => Rgba::new(255, 120, 120, 0.75),
        ProteinGroup::Signaling => Rgba::new(124, 92, 255, 0.75),
        ProteinGroup::Receptor => Rgba::new(46, 210, 255, 0.70),
        ProteinGroup::Adapter => Rgba::new(255, 200, 120, 0.70),
        ProteinGroup::Marker => Rgba::new(180, 255, 180, 0.60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> RenderNode {
        RenderNode {
            id: 1,
            label: "STAT3".into(),
            group: ProteinGroup::Signaling,
            tooltip: String::new(),
        }
    }

    #[test]
    fn full_opacity_keeps_base_alphas() {
        let style = AlphaBlendStyler::default().style(&node(), 1.0);
        assert_eq!(style.font, Rgba::new(232, 236, 255, 0.85));
        assert_eq!(style.border, Rgba::new(232, 236, 255, 0.35));
    }

    #[test]
    fn dimmed_nodes_scale_alpha() {
        let style = AlphaBlendStyler::default().style(&node(), 0.25);
        assert!((style.font.a - 0.2125).abs() < 1e-12);
        assert!((style.border.a - 0.0875).abs() < 1e-12);
        assert_eq!((style.font.r, style.font.g, style.font.b), (232, 236, 255));
    }

    #[test]
    fn opacity_outside_unit_range_is_clamped() {
        let styler = AlphaBlendStyler::default();
        assert_eq!(styler.style(&node(), 3.0), styler.style(&node(), 1.0));
        assert_eq!(styler.style(&node(), -1.0).font.a, 0.0);
    }

    #[test]
    fn alpha_channel_rounds_to_byte() {
        assert_eq!(Rgba::new(0, 0, 0, 1.0).alpha_u8(), 255);
        assert_eq!(Rgba::new(0, 0, 0, 0.35).alpha_u8(), 89);
    }
}
