use serde::Serialize;

use crate::{
    foundation::core::{Bounds, ElementId, Point},
    motion::{config::MotionKind, model::MotionState},
    render::FrameView,
    scene::element::{AnimatedElement, ElementStatus},
};

/// Serializable state of one element at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub kind: MotionKind,
    pub position: Point,
    pub state: MotionState,
    pub scale: f64,
    pub glow: f64,
    pub trail: Vec<Point>,
    pub status: ElementStatus,
}

impl From<&AnimatedElement> for ElementSnapshot {
    fn from(e: &AnimatedElement) -> Self {
        Self {
            id: e.id(),
            kind: e.motion().kind,
            position: e.position(),
            state: *e.state(),
            scale: e.scale(),
            glow: e.effects().map_or(0.0, |fx| fx.glow_intensity()),
            trail: e.trail().map(|t| t.iter().collect()).unwrap_or_default(),
            status: e.status(),
        }
    }
}

/// Owned copy of a [`FrameView`], for traces and snapshot tests.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub time: f64,
    pub bounds: Bounds,
    pub elements: Vec<ElementSnapshot>,
}

impl From<&FrameView<'_>> for FrameRecord {
    fn from(v: &FrameView<'_>) -> Self {
        Self {
            frame: v.frame,
            time: v.time,
            bounds: v.bounds,
            elements: v.elements.iter().map(ElementSnapshot::from).collect(),
        }
    }
}
