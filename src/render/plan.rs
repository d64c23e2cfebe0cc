use serde::Serialize;

use crate::{
    foundation::core::{Bounds, ElementId, Point, Rgba8},
    render::FrameView,
    scene::element::{AnimatedElement, Visual},
};

/// Radius of a trail dot relative to the element it follows.
const TRAIL_DOT_FRACTION: f64 = 0.5;
/// Peak opacity of the newest trail dot.
const TRAIL_MAX_OPACITY: f32 = 0.6;
/// Trail dot radius used for text elements.
const TEXT_TRAIL_RADIUS: f64 = 2.0;

/// Backend-agnostic paint operations for one frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub bounds: Option<Bounds>,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Soft halo behind an element.
    Glow {
        element: ElementId,
        center: Point,
        radius: f64,
        color: Rgba8,
        intensity: f32,
    },
    FillCircle {
        element: ElementId,
        center: Point,
        radius: f64,
        color: Rgba8,
        opacity: f32,
    },
    Text {
        element: ElementId,
        /// Center of the text run.
        anchor: Point,
        content: String,
        font_size: f64,
        color: Rgba8,
    },
}

impl DrawList {
    /// Per element in registry order: trail (oldest first), glow, then the body.
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        let mut ops = Vec::new();
        for e in frame.elements {
            push_element(&mut ops, e);
        }
        Self {
            bounds: Some(frame.bounds),
            ops,
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

fn body_radius(visual: &Visual) -> f64 {
    match visual {
        Visual::Circle { radius, .. } => *radius,
        Visual::Text { font_size, .. } => font_size * 0.5,
    }
}

fn push_element(ops: &mut Vec<DrawOp>, e: &AnimatedElement) {
    let id = e.id();
    let visual = e.visual();
    let color = visual.color();
    let scale = e.scale();

    if let Some(trail) = e.trail() {
        let dot = match visual {
            Visual::Circle { radius, .. } => radius * TRAIL_DOT_FRACTION,
            Visual::Text { .. } => TEXT_TRAIL_RADIUS,
        };
        ops.extend(trail.faded().map(|(p, a)| DrawOp::FillCircle {
            element: id,
            center: p,
            radius: dot * f64::from(a),
            color,
            opacity: a * TRAIL_MAX_OPACITY,
        }));
    }

    if let Some(fx) = e.effects() {
        let intensity = fx.glow_intensity();
        if intensity > 0.0 {
            ops.push(DrawOp::Glow {
                element: id,
                center: e.position(),
                radius: body_radius(visual) * scale + fx.glow_radius(),
                color,
                intensity: intensity as f32,
            });
        }
    }

    ops.push(match visual {
        Visual::Circle { radius, color } => DrawOp::FillCircle {
            element: id,
            center: e.position(),
            radius: radius * scale,
            color: *color,
            opacity: 1.0,
        },
        Visual::Text {
            content,
            font_size,
            color,
        } => DrawOp::Text {
            element: id,
            anchor: e.position(),
            content: content.clone(),
            font_size: font_size * scale,
            color: *color,
        },
    });
}
