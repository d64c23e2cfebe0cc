use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Canvas, Point, Rgba8, point_is_finite},
    foundation::error::{SceneError, SceneResult},
    motion::config::{EffectConfig, MotionConfig},
    scene::element::Visual,
};

/// JSON scene description: a canvas plus the elements to register on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub canvas: Canvas,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Seed for random-walk headings.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

fn default_fps() -> u32 {
    60
}

/// One element of a [`SceneSpec`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub visual: Visual,
    pub position: Point,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectConfig>,
}

impl ElementSpec {
    pub fn text(content: impl Into<String>, font_size: f64, position: Point) -> Self {
        Self {
            visual: Visual::Text {
                content: content.into(),
                font_size,
                color: Rgba8::WHITE,
            },
            position,
            motion: MotionConfig::default(),
            effects: None,
        }
    }

    pub fn circle(radius: f64, color: Rgba8, position: Point) -> Self {
        Self {
            visual: Visual::Circle { radius, color },
            position,
            motion: MotionConfig::default(),
            effects: None,
        }
    }

    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn effects(mut self, effects: EffectConfig) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !point_is_finite(self.position) {
            return Err(SceneError::validation("element position must be finite"));
        }
        match &self.visual {
            Visual::Text {
                content, font_size, ..
            } => {
                if content.is_empty() {
                    return Err(SceneError::validation("text content must be non-empty"));
                }
                if !(font_size.is_finite() && *font_size > 0.0) {
                    return Err(SceneError::validation("text font_size must be > 0"));
                }
            }
            Visual::Circle { radius, .. } => {
                if !(radius.is_finite() && *radius >= 0.0) {
                    return Err(SceneError::validation(
                        "circle radius must be finite and >= 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl SceneSpec {
    pub fn validate(&self) -> SceneResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::validation("canvas width/height must be > 0"));
        }
        if self.fps == 0 {
            return Err(SceneError::validation("fps must be > 0"));
        }
        for (i, e) in self.elements.iter().enumerate() {
            e.validate().map_err(|err| match err {
                SceneError::Validation(msg) => SceneError::validation(format!("element {i}: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Seconds per simulated frame.
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    pub fn from_json(s: &str) -> SceneResult<Self> {
        let spec: Self = serde_json::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }
}

/// Fluent construction of a [`SceneSpec`].
pub struct SceneBuilder {
    canvas: Canvas,
    fps: u32,
    seed: u64,
    elements: Vec<ElementSpec>,
}

impl SceneBuilder {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            fps: default_fps(),
            seed: 0,
            elements: Vec::new(),
        }
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn element(mut self, element: ElementSpec) -> Self {
        self.elements.push(element);
        self
    }

    pub fn build(self) -> SceneResult<SceneSpec> {
        let spec = SceneSpec {
            canvas: self.canvas,
            fps: self.fps,
            seed: self.seed,
            elements: self.elements,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::config::MotionKind;

    fn canvas() -> Canvas {
        Canvas {
            width: 320,
            height: 240,
        }
    }

    #[test]
    fn builder_validates() {
        let spec = SceneBuilder::new(canvas())
            .seed(3)
            .element(
                ElementSpec::circle(5.0, Rgba8::rgb(0, 200, 255), Point::new(10.0, 10.0))
                    .motion(MotionConfig::new(MotionKind::Bounce)),
            )
            .build()
            .unwrap();
        assert_eq!(spec.elements.len(), 1);
        assert_eq!(spec.fps, 60);
    }

    #[test]
    fn builder_rejects_empty_canvas_and_bad_elements() {
        assert!(
            SceneBuilder::new(Canvas {
                width: 0,
                height: 10
            })
            .build()
            .is_err()
        );

        let err = SceneBuilder::new(canvas())
            .element(ElementSpec::text("", 12.0, Point::ZERO))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("element 0"));

        assert!(
            SceneBuilder::new(canvas())
                .element(ElementSpec::text("x", 0.0, Point::ZERO))
                .build()
                .is_err()
        );
        assert!(
            SceneBuilder::new(canvas())
                .element(ElementSpec::circle(-1.0, Rgba8::WHITE, Point::ZERO))
                .build()
                .is_err()
        );
        assert!(
            SceneBuilder::new(canvas())
                .element(ElementSpec::circle(1.0, Rgba8::WHITE, Point::new(f64::NAN, 0.0)))
                .build()
                .is_err()
        );
    }

    #[test]
    fn json_defaults_apply() {
        let spec = SceneSpec::from_json(
            r#"{
                "canvas": {"width": 100, "height": 50},
                "elements": [
                    {"visual": {"type": "circle", "radius": 2}, "position": {"x": 1, "y": 2}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.fps, 60);
        assert_eq!(spec.seed, 0);
        assert_eq!(spec.elements[0].motion.kind, MotionKind::None);
        assert!((spec.frame_dt() - 1.0 / 60.0).abs() < 1e-12);
    }
}
