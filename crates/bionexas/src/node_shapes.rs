use eframe::egui::{
    self, Color32, FontFamily, FontId, Pos2, Shape, Stroke, Vec2,
    epaint::{CircleShape, TextShape},
};
use egui_graphs::{DisplayNode, DrawContext, NodeProps};
use omics::style::group_fill;
use omics::{NodeStyle, RenderNode, Rgba};
use petgraph::{EdgeType, stable_graph::IndexType};
use serde::{Deserialize, Serialize};

const NODE_RADIUS: f32 = 9.0;
const LABEL_GAP: f32 = 6.0;
const LABEL_FONT: f32 = 13.0;
const SELECTED_BORDER_WIDTH: f32 = 3.0;
const BORDER_WIDTH: f32 = 1.5;

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
}

fn label_top_left_for_direction(
    ctx: &DrawContext,
    node_pos: Pos2,
    dir: Vec2,
    galley: &std::sync::Arc<egui::Galley>,
    radius: f32,
    gap: f32,
) -> Pos2 {
    let direction = if dir.length_sq() < f32::EPSILON {
        Vec2::new(0.0, -1.0)
    } else {
        dir.normalized()
    };

    let radius_screen = ctx.meta.canvas_to_screen_size(radius);
    let gap_screen = ctx.meta.canvas_to_screen_size(gap);
    let support = 0.5
        * (direction.x.abs() * galley.size().x
            + direction.y.abs() * galley.size().y);

    let node_screen = ctx.meta.canvas_to_screen_pos(node_pos);
    let center_screen = node_screen
        + direction * (radius_screen + gap_screen + support);

    Pos2::new(
        center_screen.x - galley.size().x / 2.0,
        center_screen.y - galley.size().y / 2.0,
    )
}

/// Protein node: a disc filled by group color with the label pushed
/// radially outward. Label and border colors come from the after-draw
/// styling pass, so dimmed nodes fade without the engine knowing about
/// opacity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProteinNodeShape {
    pos: Pos2,
    selected: bool,
    dragged: bool,
    hovered: bool,
    label_text: String,
    fill: Color32,
    font_color: Color32,
    border_color: Color32,
}

impl From<NodeProps<RenderNode>> for ProteinNodeShape {
    fn from(props: NodeProps<RenderNode>) -> Self {
        let neutral = NodeStyle {
            font: Rgba::new(232, 236, 255, 0.85),
            border: Rgba::new(232, 236, 255, 0.35),
        };
        let mut shape = Self {
            pos: props.location(),
            selected: props.selected,
            dragged: props.dragged,
            hovered: props.hovered,
            label_text: props.payload.label.clone(),
            fill: to_color32(group_fill(props.payload.group)),
            font_color: Color32::TRANSPARENT,
            border_color: Color32::TRANSPARENT,
        };
        shape.set_style(neutral);
        shape
    }
}

impl<E: Clone, Ty: EdgeType, Ix: IndexType> DisplayNode<RenderNode, E, Ty, Ix>
    for ProteinNodeShape
{
    fn closest_boundary_point(&self, dir: Vec2) -> Pos2 {
        self.pos + dir.normalized() * NODE_RADIUS
    }

    fn shapes(&mut self, ctx: &DrawContext) -> Vec<Shape> {
        let mut res = Vec::with_capacity(2);
        let center_screen = ctx.meta.canvas_to_screen_pos(self.pos);
        let radius_screen = ctx.meta.canvas_to_screen_size(NODE_RADIUS);

        res.push(
            CircleShape {
                center: center_screen,
                radius: radius_screen,
                fill: self.fill,
                stroke: self.effective_stroke(),
            }
            .into(),
        );

        let galley = ctx.ctx.fonts_mut(|f| {
            f.layout_no_wrap(
                self.label_text.clone(),
                FontId::new(LABEL_FONT, FontFamily::Proportional),
                self.font_color,
            )
        });
        let graph_center = ctx.meta.graph_bounds().center();
        let label_pos = label_top_left_for_direction(
            ctx,
            self.pos,
            self.pos - graph_center,
            &galley,
            NODE_RADIUS,
            LABEL_GAP,
        );
        res.push(TextShape::new(label_pos, galley, self.font_color).into());
        res
    }

    fn update(&mut self, state: &NodeProps<RenderNode>) {
        self.pos = state.location();
        self.selected = state.selected;
        self.dragged = state.dragged;
        self.hovered = state.hovered;
        self.label_text = state.payload.label.clone();
        self.fill = to_color32(group_fill(state.payload.group));
    }

    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.pos).length() <= NODE_RADIUS
    }
}

impl ProteinNodeShape {
    pub fn set_style(&mut self, style: NodeStyle) {
        self.font_color = to_color32(style.font);
        self.border_color = to_color32(style.border);
    }

    pub fn font_color(&self) -> Color32 {
        self.font_color
    }

    fn effective_stroke(&self) -> Stroke {
        if self.selected || self.hovered || self.dragged {
            Stroke::new(SELECTED_BORDER_WIDTH, self.border_color.gamma_multiply(2.0))
        } else {
            Stroke::new(BORDER_WIDTH, self.border_color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_maps_onto_unmultiplied_color() {
        let c = to_color32(Rgba::new(232, 236, 255, 1.0));
        assert_eq!(c, Color32::from_rgb(232, 236, 255));
        assert_eq!(to_color32(Rgba::new(10, 20, 30, 0.0)).a(), 0);
    }
}
