use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Vec2, finite_or};

/// Motion family governing an element's position update rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    #[default]
    None,
    Linear,
    Bounce,
    Circular,
    Orbit,
    Oscillate,
    Wave,
    Spiral,
    Random,
}

impl MotionKind {
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Linear,
        Self::Bounce,
        Self::Circular,
        Self::Orbit,
        Self::Oscillate,
        Self::Wave,
        Self::Spiral,
        Self::Random,
    ];

    /// Default speed: px/s for translating kinds, rad/s for angular ones.
    pub fn default_speed(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Linear | Self::Bounce | Self::Random => 100.0,
            Self::Circular | Self::Orbit => 1.0,
            Self::Oscillate => 2.0,
            Self::Wave => 3.0,
            Self::Spiral => 1.5,
        }
    }

    /// Default radius: orbit radius, oscillation/wave amplitude, or spiral base radius.
    pub fn default_radius(self) -> f64 {
        match self {
            Self::None | Self::Linear | Self::Bounce | Self::Random => 0.0,
            Self::Circular | Self::Orbit | Self::Oscillate => 50.0,
            Self::Wave => 20.0,
            Self::Spiral => 5.0,
        }
    }

    /// Whether `respect_boundaries` changes the behavior of this kind.
    pub fn supports_boundaries(self) -> bool {
        matches!(self, Self::Linear | Self::Bounce | Self::Random)
    }

    /// Whether this kind reflects at the scene edges; bounce always does.
    pub fn reflects(self, respect_boundaries: bool) -> bool {
        self == Self::Bounce || (respect_boundaries && self.supports_boundaries())
    }
}

pub const DEFAULT_TRAIL_LENGTH: usize = 20;
pub const DEFAULT_GROWTH_RATE: f64 = 10.0;
pub const DEFAULT_WAVE_RATE: f64 = 60.0;
pub const DEFAULT_TURN_INTERVAL: f64 = 0.5;

/// User-facing motion parameters. Unset fields take per-kind defaults in [`MotionConfig::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub kind: MotionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub respect_boundaries: bool,
    #[serde(default)]
    pub show_trail: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_length: Option<usize>,
    /// Spiral radius growth in px/s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,
    /// Wave horizontal travel in px/s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_rate: Option<f64>,
    /// Seconds between random-walk heading changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_interval: Option<f64>,
}

impl MotionConfig {
    pub fn new(kind: MotionKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn respecting_boundaries(mut self) -> Self {
        self.respect_boundaries = true;
        self
    }

    pub fn with_trail(mut self, length: usize) -> Self {
        self.show_trail = true;
        self.trail_length = Some(length);
        self
    }

    pub fn with_growth_rate(mut self, rate: f64) -> Self {
        self.growth_rate = Some(rate);
        self
    }

    pub fn with_wave_rate(mut self, rate: f64) -> Self {
        self.wave_rate = Some(rate);
        self
    }

    pub fn with_turn_interval(mut self, secs: f64) -> Self {
        self.turn_interval = Some(secs);
        self
    }

    /// Freeze into normalized parameters. Degenerate values never fail: they fall back to
    /// the kind's defaults or to "no movement".
    pub fn resolve(&self, initial_position: Point) -> ResolvedMotion {
        let kind = self.kind;

        let speed = self
            .speed
            .map_or(kind.default_speed(), |s| finite_or(s, kind.default_speed()));

        let direction = self.direction.unwrap_or(Vec2::new(1.0, 0.0));
        let len = direction.length();
        let direction = if len.is_finite() && len > 1e-9 {
            direction / len
        } else {
            Vec2::ZERO
        };

        let center = match self.center {
            Some(c) if c.x.is_finite() && c.y.is_finite() => c,
            _ => initial_position,
        };

        let radius = self
            .radius
            .map_or(kind.default_radius(), |r| {
                finite_or(r, kind.default_radius())
            })
            .abs();

        let trail_length = if self.show_trail {
            let n = self.trail_length.unwrap_or(DEFAULT_TRAIL_LENGTH);
            (n > 0).then_some(n)
        } else {
            None
        };

        let turn_interval = self
            .turn_interval
            .map_or(DEFAULT_TURN_INTERVAL, |t| {
                finite_or(t, DEFAULT_TURN_INTERVAL)
            })
            .max(0.0);

        ResolvedMotion {
            kind,
            speed,
            direction,
            center,
            explicit_center: self.center.is_some_and(|c| c.x.is_finite() && c.y.is_finite()),
            radius,
            respect_boundaries: self.respect_boundaries,
            trail_length,
            growth_rate: self
                .growth_rate
                .map_or(DEFAULT_GROWTH_RATE, |g| finite_or(g, DEFAULT_GROWTH_RATE)),
            wave_rate: self
                .wave_rate
                .map_or(DEFAULT_WAVE_RATE, |w| finite_or(w, DEFAULT_WAVE_RATE)),
            turn_interval,
        }
    }
}

/// Normalized motion parameters, immutable for the element's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedMotion {
    pub kind: MotionKind,
    pub speed: f64,
    /// Unit vector, or zero for "no movement".
    pub direction: Vec2,
    pub center: Point,
    pub explicit_center: bool,
    pub radius: f64,
    pub respect_boundaries: bool,
    /// `Some(n)` when trails are enabled with capacity `n > 0`.
    pub trail_length: Option<usize>,
    pub growth_rate: f64,
    pub wave_rate: f64,
    pub turn_interval: f64,
}

pub const DEFAULT_BREATHING_SPEED: f64 = 2.0;
pub const DEFAULT_BREATHING_AMOUNT: f64 = 0.1;
pub const DEFAULT_GLOW_RADIUS: f64 = 8.0;
pub const DEFAULT_GLOW_SPEED: f64 = 1.5;

/// Purely visual modulators. Never affect kinematics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    #[serde(default)]
    pub breathing: bool,
    #[serde(default = "default_breathing_speed")]
    pub breathing_speed: f64,
    #[serde(default = "default_breathing_amount")]
    pub breathing_amount: f64,
    #[serde(default)]
    pub glow: bool,
    #[serde(default = "default_glow_radius")]
    pub glow_radius: f64,
    #[serde(default = "default_glow_speed")]
    pub glow_speed: f64,
}

fn default_breathing_speed() -> f64 {
    DEFAULT_BREATHING_SPEED
}

fn default_breathing_amount() -> f64 {
    DEFAULT_BREATHING_AMOUNT
}

fn default_glow_radius() -> f64 {
    DEFAULT_GLOW_RADIUS
}

fn default_glow_speed() -> f64 {
    DEFAULT_GLOW_SPEED
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            breathing: false,
            breathing_speed: DEFAULT_BREATHING_SPEED,
            breathing_amount: DEFAULT_BREATHING_AMOUNT,
            glow: false,
            glow_radius: DEFAULT_GLOW_RADIUS,
            glow_speed: DEFAULT_GLOW_SPEED,
        }
    }
}

impl EffectConfig {
    pub fn breathing(speed: f64) -> Self {
        Self {
            breathing: true,
            breathing_speed: speed,
            ..Self::default()
        }
    }

    pub fn glow(radius: f64) -> Self {
        Self {
            glow: true,
            glow_radius: radius,
            ..Self::default()
        }
    }

    pub fn with_breathing(mut self, speed: f64) -> Self {
        self.breathing = true;
        self.breathing_speed = speed;
        self
    }

    pub fn with_glow(mut self, radius: f64) -> Self {
        self.glow = true;
        self.glow_radius = radius;
        self
    }

    pub fn is_active(&self) -> bool {
        self.breathing || self.glow
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            breathing: self.breathing,
            breathing_speed: finite_or(self.breathing_speed, DEFAULT_BREATHING_SPEED),
            breathing_amount: finite_or(self.breathing_amount, DEFAULT_BREATHING_AMOUNT),
            glow: self.glow,
            glow_radius: finite_or(self.glow_radius, DEFAULT_GLOW_RADIUS).abs(),
            glow_speed: finite_or(self.glow_speed, DEFAULT_GLOW_SPEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_kind() {
        let p = Point::new(10.0, 20.0);
        for kind in MotionKind::ALL {
            let r = MotionConfig::new(kind).resolve(p);
            assert_eq!(r.speed, kind.default_speed());
            assert_eq!(r.radius, kind.default_radius());
            assert_eq!(r.center, p);
            assert!(!r.respect_boundaries);
            assert_eq!(r.trail_length, None);
        }
    }

    #[test]
    fn degenerate_values_are_normalized() {
        let r = MotionConfig::new(MotionKind::Linear)
            .with_speed(f64::NAN)
            .with_direction(Vec2::ZERO)
            .with_radius(-4.0)
            .with_turn_interval(-1.0)
            .resolve(Point::ZERO);
        assert_eq!(r.speed, 100.0);
        assert_eq!(r.direction, Vec2::ZERO);
        assert_eq!(r.radius, 4.0);
        assert_eq!(r.turn_interval, 0.0);
    }

    #[test]
    fn direction_is_normalized_and_negative_speed_kept() {
        let r = MotionConfig::new(MotionKind::Linear)
            .with_direction(Vec2::new(3.0, 4.0))
            .with_speed(-50.0)
            .resolve(Point::ZERO);
        assert!((r.direction.x - 0.6).abs() < 1e-12);
        assert!((r.direction.y - 0.8).abs() < 1e-12);
        assert_eq!(r.speed, -50.0);
    }

    #[test]
    fn trail_requires_flag_and_positive_length() {
        let on = MotionConfig::new(MotionKind::Linear).with_trail(5);
        assert_eq!(on.resolve(Point::ZERO).trail_length, Some(5));

        let zero = MotionConfig::new(MotionKind::Linear).with_trail(0);
        assert_eq!(zero.resolve(Point::ZERO).trail_length, None);

        let mut implicit = MotionConfig::new(MotionKind::Linear);
        implicit.show_trail = true;
        assert_eq!(
            implicit.resolve(Point::ZERO).trail_length,
            Some(DEFAULT_TRAIL_LENGTH)
        );
    }

    #[test]
    fn config_json_uses_snake_case_and_defaults() {
        let cfg: MotionConfig = serde_json::from_str(
            r#"{"kind":"bounce","speed":120,"direction":[1,0],"respect_boundaries":true}"#,
        )
        .unwrap();
        assert_eq!(cfg.kind, MotionKind::Bounce);
        assert_eq!(cfg.speed, Some(120.0));
        assert!(cfg.respect_boundaries);
        assert!(!cfg.show_trail);

        let empty: MotionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.kind, MotionKind::None);
    }

    #[test]
    fn effect_defaults_fill_missing_fields() {
        let fx: EffectConfig = serde_json::from_str(r#"{"glow":true}"#).unwrap();
        assert!(fx.glow);
        assert!(!fx.breathing);
        assert_eq!(fx.glow_radius, DEFAULT_GLOW_RADIUS);
        assert_eq!(fx.breathing_speed, DEFAULT_BREATHING_SPEED);
    }
}
