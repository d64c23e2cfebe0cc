use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Bounds, ElementId, Point, Rgba8, point_is_finite},
    foundation::rng::RandomSource,
    motion::{
        config::{EffectConfig, MotionConfig, ResolvedMotion},
        effects::EffectState,
        model::{self, MotionState},
        trail::TrailBuffer,
    },
};

/// Minimal draw payload an element carries for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Visual {
    Text {
        content: String,
        font_size: f64,
        #[serde(default)]
        color: Rgba8,
    },
    Circle {
        radius: f64,
        #[serde(default)]
        color: Rgba8,
    },
}

impl Visual {
    pub fn color(&self) -> Rgba8 {
        match self {
            Self::Text { color, .. } | Self::Circle { color, .. } => *color,
        }
    }
}

/// Whether the element still takes part in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementStatus {
    Active,
    /// An update produced a non-finite position; the element keeps its last good state.
    Stalled,
}

/// One independently animated element.
///
/// Motion parameters are frozen at creation; changing motion means removing the element and
/// adding a new one.
#[derive(Clone, Debug)]
pub struct AnimatedElement {
    id: ElementId,
    visual: Visual,
    position: Point,
    motion: ResolvedMotion,
    state: MotionState,
    effects: Option<EffectState>,
    trail: Option<TrailBuffer>,
    status: ElementStatus,
}

impl AnimatedElement {
    pub fn new(
        id: ElementId,
        visual: Visual,
        position: Point,
        motion: &MotionConfig,
        effects: Option<EffectConfig>,
        bounds: Bounds,
    ) -> Self {
        let position = if motion.kind.reflects(motion.respect_boundaries) {
            bounds.clamp(position)
        } else {
            position
        };
        let motion = motion.resolve(position);
        let (state, position) = MotionState::initial(&motion, position);
        Self {
            id,
            visual,
            position,
            trail: motion.trail_length.map(TrailBuffer::new),
            motion,
            state,
            effects: effects.filter(EffectConfig::is_active).map(EffectState::new),
            status: ElementStatus::Active,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn motion(&self) -> &ResolvedMotion {
        &self.motion
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn effects(&self) -> Option<&EffectState> {
        self.effects.as_ref()
    }

    pub fn trail(&self) -> Option<&TrailBuffer> {
        self.trail.as_ref()
    }

    pub fn status(&self) -> ElementStatus {
        self.status
    }

    /// Breathing scale, 1 when the element has no breathing effect.
    pub fn scale(&self) -> f64 {
        self.effects.as_ref().map_or(1.0, EffectState::scale)
    }

    /// Advance motion, trail, and effects by `dt` seconds. Returns `false` when the element
    /// is stalled and did not update.
    pub fn update(&mut self, dt: f64, bounds: Bounds, rng: &mut dyn RandomSource) -> bool {
        if self.status == ElementStatus::Stalled {
            return false;
        }

        let (state, position) =
            model::step(&self.motion, self.state, self.position, dt, bounds, rng);
        if !point_is_finite(position) {
            tracing::warn!(
                id = %self.id,
                kind = ?self.motion.kind,
                "element produced a non-finite position; it will stop updating"
            );
            self.status = ElementStatus::Stalled;
            return false;
        }

        self.state = state;
        self.position = position;
        if let Some(trail) = &mut self.trail {
            trail.push(position);
        }
        if let Some(fx) = &mut self.effects {
            fx.advance(dt);
        }
        true
    }

    /// Drop the trail history (e.g. after a reset) without touching motion state.
    pub fn clear_trail(&mut self) {
        if let Some(trail) = &mut self.trail {
            trail.clear();
        }
    }
}
