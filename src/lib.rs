//! Motionscape animates many independent 2D elements against one shared frame clock.
//!
//! Each element (a text label or a circle) follows one parametric motion model, optionally
//! leaves a fading trail, and optionally carries visual modulators (breathing, glow). The
//! engine owns geometry only: a host binds a drawing surface, feeds timestamps or frame
//! intervals, and paints whatever the engine exposes.
//!
//! # Frame flow
//!
//! 1. **Tick**: the host calls [`AnimationEngine::tick`] or [`AnimationEngine::on_frame`]
//! 2. **Step**: every element advances in registration order via [`motion::model::step`]
//! 3. **Record**: trails append the new position, effect phases advance
//! 4. **Paint**: the host reads a [`FrameView`] (or hands a [`SceneRenderer`] to
//!    [`AnimationEngine::render`])
//!
//! The engine is single-threaded and deterministic for a given seed and delta sequence.
#![forbid(unsafe_code)]

pub mod clock;
pub mod engine;
mod foundation;
pub mod motion;
pub mod render;
pub mod scene;

pub use clock::{AnimationClock, ClockState};
pub use engine::{AnimationEngine, EngineConfig, TextStyle};
pub use foundation::core::{Bounds, Canvas, ElementId, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{SceneError, SceneResult};
pub use foundation::rng::{RandomSource, Rng64};
pub use motion::config::{EffectConfig, MotionConfig, MotionKind, ResolvedMotion};
pub use motion::effects::EffectState;
pub use motion::model::MotionState;
pub use motion::trail::TrailBuffer;
pub use render::plan::{DrawList, DrawOp};
pub use render::preview::PreviewRenderer;
pub use render::record::{ElementSnapshot, FrameRecord};
pub use render::{DrawSurface, FixedSurface, FrameView, SceneRenderer, SharedSurface};
pub use scene::element::{AnimatedElement, ElementStatus, Visual};
pub use scene::registry::{SceneRegistry, Snapshot};
pub use scene::spec::{ElementSpec, SceneBuilder, SceneSpec};
