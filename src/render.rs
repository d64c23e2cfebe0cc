//! Boundary between the engine and whatever paints its state.
//!
//! The engine only maintains geometry; a [`SceneRenderer`] receives a read-only
//! [`FrameView`] each frame and owns all pixels.

use std::{cell::Cell, rc::Rc};

use crate::{
    foundation::core::{Bounds, Size},
    foundation::error::SceneResult,
    scene::registry::Snapshot,
};

pub mod plan;
pub mod preview;
pub mod record;

/// The host's drawing surface, as far as the engine cares: its current size.
pub trait DrawSurface {
    fn size(&self) -> Size;
}

/// Surface with a fixed size, for offline simulation and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSurface {
    pub size: Size,
}

impl FixedSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

impl DrawSurface for FixedSurface {
    fn size(&self) -> Size {
        self.size
    }
}

/// Surface handle the host keeps a clone of and resizes; the engine reads it every frame.
#[derive(Clone, Debug, Default)]
pub struct SharedSurface {
    size: Rc<Cell<Size>>,
}

impl SharedSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
        }
    }

    pub fn resize(&self, size: Size) {
        self.size.set(size);
    }
}

impl DrawSurface for SharedSurface {
    fn size(&self) -> Size {
        self.size.get()
    }
}

/// Everything a renderer may read for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Ticks that advanced the scene so far.
    pub frame: u64,
    /// Running (unpaused) time in seconds.
    pub time: f64,
    pub bounds: Bounds,
    pub elements: Snapshot<'a>,
}

/// Host-side painter.
pub trait SceneRenderer {
    fn render(&mut self, frame: &FrameView<'_>) -> SceneResult<()>;
}
