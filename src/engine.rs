//! Host-facing animation engine.
//!
//! Ties a [`SceneRegistry`] to an [`AnimationClock`] and a bound [`DrawSurface`]. All calls
//! are expected on the thread that owns the surface; hosts with background producers marshal
//! onto that thread first.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    clock::{AnimationClock, DEFAULT_MAX_FRAME_DT, DEFAULT_RESUME_FRAME_DT},
    foundation::core::{Bounds, ElementId, Point, Rgba8},
    foundation::error::{SceneError, SceneResult},
    foundation::rng::{RandomSource, Rng64},
    motion::config::{EffectConfig, MotionConfig},
    render::{DrawSurface, FixedSurface, FrameView, SceneRenderer},
    scene::{
        element::{AnimatedElement, Visual},
        registry::{SceneRegistry, Snapshot},
        spec::{ElementSpec, SceneSpec},
    },
};

/// Font size and color used by [`AnimationEngine::add_text_element_with_motion`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Rgba8,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            color: Rgba8::WHITE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest delta (seconds) a single tick may apply.
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f64,
    /// Cap (seconds) for the first host-reported frame interval after a resume.
    #[serde(default = "default_resume_frame_dt")]
    pub resume_frame_dt: f64,
    /// Seed for the default random source.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub text_style: TextStyle,
}

fn default_max_frame_dt() -> f64 {
    DEFAULT_MAX_FRAME_DT
}

fn default_resume_frame_dt() -> f64 {
    DEFAULT_RESUME_FRAME_DT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            resume_frame_dt: DEFAULT_RESUME_FRAME_DT,
            seed: 0,
            text_style: TextStyle::default(),
        }
    }
}

pub struct AnimationEngine {
    config: EngineConfig,
    surface: Option<Box<dyn DrawSurface>>,
    registry: SceneRegistry,
    clock: AnimationClock,
    rng: Box<dyn RandomSource>,
    bounds: Bounds,
}

impl AnimationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            clock: AnimationClock::new(config.max_frame_dt, config.resume_frame_dt),
            rng: Box::new(Rng64::new(config.seed)),
            config,
            surface: None,
            registry: SceneRegistry::new(),
            bounds: Bounds::EMPTY,
        }
    }

    /// Replace the random source used by random-walk elements.
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Build an initialized engine holding every element of `spec`.
    #[tracing::instrument(skip(spec), fields(elements = spec.elements.len()))]
    pub fn from_spec(spec: &SceneSpec) -> SceneResult<Self> {
        spec.validate()?;
        let mut engine = Self::new(EngineConfig {
            seed: spec.seed,
            ..EngineConfig::default()
        });
        let size = spec.canvas.size();
        engine.initialize(FixedSurface::new(size.width, size.height));
        for e in &spec.elements {
            engine.add_element(e.clone())?;
        }
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind the drawing surface whose size defines the scene bounds. Rebinding replaces it.
    #[tracing::instrument(skip(self, surface))]
    pub fn initialize(&mut self, surface: impl DrawSurface + 'static) {
        self.bounds = Bounds::from_size(surface.size());
        self.surface = Some(Box::new(surface));
        tracing::debug!(
            width = self.bounds.width,
            height = self.bounds.height,
            "surface bound"
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    fn ensure_initialized(&self, op: &str) -> SceneResult<()> {
        if self.surface.is_none() {
            return Err(SceneError::invalid_operation(format!(
                "{op} requires initialize() first"
            )));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn start_animation(&mut self, now: Duration) -> SceneResult<()> {
        self.ensure_initialized("start_animation")?;
        self.clock.start(now);
        Ok(())
    }

    /// Halt ticking; elements are kept. Safe to call repeatedly or before starting.
    pub fn stop_animation(&mut self) {
        self.clock.stop();
    }

    /// Freeze every element exactly where it is.
    pub fn stop_all_motion(&mut self) {
        self.clock.pause();
    }

    pub fn resume_all_motion(&mut self, now: Duration) {
        self.clock.resume(now);
    }

    pub fn clear_elements(&mut self) {
        self.registry.clear();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Bounds as read from the surface on the latest frame.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn add_text_element_with_motion(
        &mut self,
        text: impl Into<String>,
        position: Point,
        motion: &MotionConfig,
        effects: Option<EffectConfig>,
    ) -> SceneResult<ElementId> {
        let style = self.config.text_style;
        self.add_element(ElementSpec {
            visual: Visual::Text {
                content: text.into(),
                font_size: style.font_size,
                color: style.color,
            },
            position,
            motion: motion.clone(),
            effects,
        })
    }

    pub fn add_circle_element_with_motion(
        &mut self,
        position: Point,
        radius: f64,
        color: Rgba8,
        motion: &MotionConfig,
    ) -> SceneResult<ElementId> {
        self.add_element(ElementSpec {
            visual: Visual::Circle { radius, color },
            position,
            motion: motion.clone(),
            effects: None,
        })
    }

    pub fn add_element(&mut self, spec: ElementSpec) -> SceneResult<ElementId> {
        self.ensure_initialized("adding elements")?;
        spec.validate()?;
        self.refresh_bounds();
        Ok(self
            .registry
            .add(spec.visual, spec.position, &spec.motion, spec.effects, self.bounds))
    }

    /// Returns `false` when `id` is unknown.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        self.registry.remove(id)
    }

    /// Returns `false` when `id` is unknown.
    pub fn clear_trail(&mut self, id: ElementId) -> bool {
        self.registry.clear_trail(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&AnimatedElement> {
        self.registry.get(id)
    }

    pub fn element_count(&self) -> usize {
        self.registry.len()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.registry.snapshot()
    }

    /// Advance the scene to host timestamp `now`. Returns how many elements updated.
    pub fn tick(&mut self, now: Duration) -> usize {
        match self.clock.tick(now) {
            Some(dt) => self.step(dt),
            None => 0,
        }
    }

    /// Draw-callback entry point: advance by the host's frame interval and expose the frame.
    pub fn on_frame(&mut self, elapsed: Duration) -> FrameView<'_> {
        if let Some(dt) = self.clock.advance(elapsed) {
            self.step(dt);
        }
        self.frame_view()
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            frame: self.clock.frames(),
            time: self.clock.running_time(),
            bounds: self.bounds,
            elements: self.registry.snapshot(),
        }
    }

    /// Hand the current frame to `renderer`.
    pub fn render(&self, renderer: &mut dyn SceneRenderer) -> SceneResult<()> {
        self.ensure_initialized("render")?;
        renderer.render(&self.frame_view())
    }

    fn refresh_bounds(&mut self) {
        if let Some(surface) = &self.surface {
            self.bounds = Bounds::from_size(surface.size());
        }
    }

    fn step(&mut self, dt: f64) -> usize {
        self.refresh_bounds();
        let updated = self.registry.update_all(dt, self.bounds, &mut *self.rng);
        tracing::trace!(dt, updated, total = self.registry.len(), "tick");
        updated
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
