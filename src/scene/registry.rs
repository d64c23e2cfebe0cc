use indexmap::IndexMap;

use crate::{
    foundation::core::{Bounds, ElementId, Point},
    foundation::rng::RandomSource,
    motion::config::{EffectConfig, MotionConfig},
    scene::element::{AnimatedElement, Visual},
};

/// Insertion-ordered set of animated elements.
///
/// Order is update and draw order. Not synchronized: the owning thread is the only writer.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    elements: IndexMap<ElementId, AnimatedElement>,
    next_id: u64,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new element and return its id. Ids are never reused.
    ///
    /// `bounds` are the scene bounds at registration time; edge-reflecting kinds start inside them.
    pub fn add(
        &mut self,
        visual: Visual,
        position: Point,
        motion: &MotionConfig,
        effects: Option<EffectConfig>,
        bounds: Bounds,
    ) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(
            id,
            AnimatedElement::new(id, visual, position, motion, effects, bounds),
        );
        tracing::debug!(%id, kind = ?motion.kind, "element added");
        id
    }

    /// Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let removed = self.elements.shift_remove(&id).is_some();
        if removed {
            tracing::debug!(%id, "element removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        let n = self.elements.len();
        self.elements.clear();
        tracing::debug!(count = n, "elements cleared");
    }

    pub fn get(&self, id: ElementId) -> Option<&AnimatedElement> {
        self.elements.get(&id)
    }

    /// Returns `false` when `id` is unknown.
    pub fn clear_trail(&mut self, id: ElementId) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.clear_trail();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Read-only view in registration order.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            elements: &self.elements,
        }
    }

    /// Advance every element in registration order; returns how many actually updated.
    pub fn update_all(&mut self, dt: f64, bounds: Bounds, rng: &mut dyn RandomSource) -> usize {
        let mut updated = 0;
        for e in self.elements.values_mut() {
            if e.update(dt, bounds, &mut *rng) {
                updated += 1;
            }
        }
        updated
    }
}

/// Borrowed, ordered view of the registry handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    elements: &'a IndexMap<ElementId, AnimatedElement>,
}

impl<'a> Snapshot<'a> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&'a AnimatedElement> {
        self.elements.get(&id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a AnimatedElement> + 'a {
        self.elements.values()
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = &'a AnimatedElement;
    type IntoIter = indexmap::map::Values<'a, ElementId, AnimatedElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}
