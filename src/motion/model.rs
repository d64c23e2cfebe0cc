//! Per-kind motion rules.
//!
//! Every rule is a pure transition `(state, position, dt, bounds) -> (state, position)`; the
//! only side channel is the injected [`RandomSource`] consumed by random walks. Elements never
//! observe each other.

use serde::Serialize;

use crate::{
    foundation::core::{Bounds, Point, Vec2},
    foundation::rng::RandomSource,
    motion::config::{MotionKind, ResolvedMotion},
};

/// Wave phase offset contributed by each pixel of horizontal travel.
pub const WAVE_PHASE_PER_PX: f64 = 0.01;

/// Kind-dependent auxiliary kinematic state (velocity, angle, or elapsed phase).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MotionState {
    Still,
    /// Linear and bounce.
    Drift { velocity: Vec2 },
    /// Circular and orbit; `angle` in radians.
    Angular { angle: f64 },
    /// Seconds of running time since creation.
    Oscillate { elapsed: f64 },
    Wave { elapsed: f64, baseline: f64 },
    Spiral { angle: f64, elapsed: f64 },
    /// Random walk; `until_turn` counts down to the next heading change.
    Walk {
        velocity: Vec2,
        until_turn: f64,
        heading_chosen: bool,
    },
}

impl MotionState {
    /// Initial state for a freshly created element, plus the position it starts at.
    ///
    /// Kinds defined by a closed-form curve snap the initial position onto that curve so the
    /// curve invariant holds before the first tick.
    pub fn initial(motion: &ResolvedMotion, position: Point) -> (Self, Point) {
        let c = motion.center;
        let start_angle = || {
            let d = position - c;
            if motion.explicit_center && d.length() > 1e-9 {
                d.y.atan2(d.x)
            } else {
                0.0
            }
        };

        match motion.kind {
            MotionKind::None => (Self::Still, position),
            MotionKind::Linear | MotionKind::Bounce => (
                Self::Drift {
                    velocity: motion.direction * motion.speed,
                },
                position,
            ),
            MotionKind::Circular | MotionKind::Orbit => {
                let angle = start_angle();
                (Self::Angular { angle }, on_circle(c, motion.radius, angle))
            }
            MotionKind::Oscillate => (Self::Oscillate { elapsed: 0.0 }, c),
            MotionKind::Wave => {
                let baseline = if motion.explicit_center { c.y } else { position.y };
                let p = Point::new(position.x, wave_y(motion, baseline, 0.0, position.x));
                (Self::Wave { elapsed: 0.0, baseline }, p)
            }
            MotionKind::Spiral => {
                let angle = start_angle();
                (
                    Self::Spiral {
                        angle,
                        elapsed: 0.0,
                    },
                    on_circle(c, spiral_radius(motion, 0.0), angle),
                )
            }
            MotionKind::Random => {
                let heading_chosen = motion.direction != Vec2::ZERO;
                (
                    Self::Walk {
                        velocity: motion.direction * motion.speed,
                        until_turn: motion.turn_interval,
                        heading_chosen,
                    },
                    position,
                )
            }
        }
    }

    /// Velocity for translating kinds.
    pub fn velocity(&self) -> Option<Vec2> {
        match *self {
            Self::Drift { velocity } | Self::Walk { velocity, .. } => Some(velocity),
            _ => None,
        }
    }

    /// Angle accumulator for angular kinds.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Self::Angular { angle } | Self::Spiral { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Elapsed-time accumulator for time-parameterized kinds.
    pub fn elapsed(&self) -> Option<f64> {
        match *self {
            Self::Oscillate { elapsed }
            | Self::Wave { elapsed, .. }
            | Self::Spiral { elapsed, .. } => Some(elapsed),
            _ => None,
        }
    }
}

/// Advance one element by `dt` seconds.
pub fn step(
    motion: &ResolvedMotion,
    state: MotionState,
    position: Point,
    dt: f64,
    bounds: Bounds,
    rng: &mut dyn RandomSource,
) -> (MotionState, Point) {
    let reflects = motion.kind.reflects(motion.respect_boundaries);

    match state {
        MotionState::Still => (state, position),
        MotionState::Drift { velocity } => {
            let next = position + velocity * dt;
            if reflects {
                let (p, velocity) = reflect(next, velocity, bounds);
                (MotionState::Drift { velocity }, p)
            } else {
                (state, next)
            }
        }
        MotionState::Angular { angle } => {
            let angle = angle + motion.speed * dt;
            (
                MotionState::Angular { angle },
                on_circle(motion.center, motion.radius, angle),
            )
        }
        MotionState::Oscillate { elapsed } => {
            let elapsed = elapsed + dt;
            let offset = motion.direction * (motion.radius * (motion.speed * elapsed).sin());
            (MotionState::Oscillate { elapsed }, motion.center + offset)
        }
        MotionState::Wave { elapsed, baseline } => {
            let elapsed = elapsed + dt;
            let x = position.x + motion.wave_rate * dt;
            (
                MotionState::Wave { elapsed, baseline },
                Point::new(x, wave_y(motion, baseline, elapsed, x)),
            )
        }
        MotionState::Spiral { angle, elapsed } => {
            let angle = angle + motion.speed * dt;
            let elapsed = elapsed + dt;
            (
                MotionState::Spiral { angle, elapsed },
                on_circle(motion.center, spiral_radius(motion, elapsed), angle),
            )
        }
        MotionState::Walk {
            mut velocity,
            until_turn,
            mut heading_chosen,
        } => {
            let mut until_turn = until_turn - dt;
            if !heading_chosen || until_turn <= 0.0 {
                velocity = Vec2::from_angle(rng.next_angle()) * motion.speed;
                until_turn = motion.turn_interval;
                heading_chosen = true;
            }
            let mut next = position + velocity * dt;
            if reflects {
                (next, velocity) = reflect(next, velocity, bounds);
            }
            (
                MotionState::Walk {
                    velocity,
                    until_turn,
                    heading_chosen,
                },
                next,
            )
        }
    }
}

/// Current spiral radius after `elapsed` seconds; never negative.
pub fn spiral_radius(motion: &ResolvedMotion, elapsed: f64) -> f64 {
    (motion.radius + motion.growth_rate * elapsed).max(0.0)
}

fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

fn wave_y(motion: &ResolvedMotion, baseline: f64, elapsed: f64, x: f64) -> f64 {
    baseline + motion.radius * (motion.speed * elapsed + x * WAVE_PHASE_PER_PX).sin()
}

/// Mirror any overshoot past an edge back inside, flipping the matching velocity component.
///
/// Axes are handled independently so a corner hit flips both components. The result is
/// clamped, so even a step longer than the scene lands inside it.
pub fn reflect(p: Point, velocity: Vec2, bounds: Bounds) -> (Point, Vec2) {
    let (x, vx) = reflect_axis(p.x, velocity.x, bounds.width);
    let (y, vy) = reflect_axis(p.y, velocity.y, bounds.height);
    (Point::new(x, y), Vec2::new(vx, vy))
}

fn reflect_axis(p: f64, v: f64, max: f64) -> (f64, f64) {
    if p < 0.0 {
        ((-p).min(max), v.abs())
    } else if p > max {
        ((2.0 * max - p).max(0.0), -v.abs())
    } else {
        (p, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{foundation::rng::Rng64, motion::config::MotionConfig};

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn run(cfg: MotionConfig, start: Point, ticks: usize, dt: f64) -> Vec<(MotionState, Point)> {
        let motion = cfg.resolve(start);
        let mut rng = Rng64::new(42);
        let (mut state, mut pos) = MotionState::initial(&motion, start);
        let mut out = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            (state, pos) = step(&motion, state, pos, dt, BOUNDS, &mut rng);
            out.push((state, pos));
        }
        out
    }

    #[test]
    fn none_never_moves() {
        let start = Point::new(5.0, 6.0);
        for (_, p) in run(MotionConfig::new(MotionKind::None), start, 50, 0.016) {
            assert_eq!(p, start);
        }
    }

    #[test]
    fn linear_without_boundaries_drifts_out() {
        let cfg = MotionConfig::new(MotionKind::Linear).with_speed(100.0);
        let (_, p) = *run(cfg, Point::new(790.0, 10.0), 10, 0.1).last().unwrap();
        assert!((p.x - 890.0).abs() < 1e-9);
        assert_eq!(p.y, 10.0);
    }

    #[test]
    fn linear_respecting_boundaries_reflects() {
        let cfg = MotionConfig::new(MotionKind::Linear)
            .with_speed(100.0)
            .respecting_boundaries();
        let (state, p) = *run(cfg, Point::new(790.0, 10.0), 1, 0.2).last().unwrap();
        assert!((p.x - 790.0).abs() < 1e-9);
        assert!(state.velocity().unwrap().x < 0.0);
    }

    #[test]
    fn bounce_reflects_corner_on_both_axes() {
        let cfg = MotionConfig::new(MotionKind::Bounce)
            .with_direction(Vec2::new(1.0, 1.0))
            .with_speed(100.0);
        let (state, p) = *run(cfg, Point::new(799.0, 599.0), 1, 0.1).last().unwrap();
        let v = state.velocity().unwrap();
        assert!(v.x < 0.0 && v.y < 0.0);
        assert!(BOUNDS.contains(p));
    }

    #[test]
    fn reflect_clamps_huge_overshoot() {
        let (p, v) = reflect(Point::new(5000.0, -9000.0), Vec2::new(1.0, -1.0), BOUNDS);
        assert_eq!(p, Point::new(0.0, 600.0));
        assert_eq!(v, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn circular_keeps_radius() {
        let center = Point::new(400.0, 300.0);
        let cfg = MotionConfig::new(MotionKind::Circular)
            .with_center(center)
            .with_radius(80.0)
            .with_speed(2.0);
        for (_, p) in run(cfg, Point::new(480.0, 300.0), 500, 0.016) {
            assert!((p.distance(center) - 80.0).abs() < 1e-9);
        }
    }

    #[test]
    fn circular_starts_at_initial_angle_around_explicit_center() {
        let center = Point::new(100.0, 100.0);
        let motion = MotionConfig::new(MotionKind::Orbit)
            .with_center(center)
            .with_radius(10.0)
            .resolve(Point::new(100.0, 150.0));
        let (state, p) = MotionState::initial(&motion, Point::new(100.0, 150.0));
        assert!((state.angle().unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_collapses_to_center() {
        let center = Point::new(50.0, 60.0);
        for kind in [MotionKind::Circular, MotionKind::Orbit] {
            let cfg = MotionConfig::new(kind).with_center(center).with_radius(0.0);
            for (_, p) in run(cfg, center, 20, 0.05) {
                assert!(p.distance(center) < 1e-12);
            }
        }
    }

    #[test]
    fn zero_speed_freezes_angular_motion() {
        let cfg = MotionConfig::new(MotionKind::Circular).with_speed(0.0);
        let out = run(cfg, Point::new(10.0, 10.0), 10, 0.1);
        assert!(out.windows(2).all(|w| w[0].1 == w[1].1));
    }

    #[test]
    fn negative_speed_reverses_rotation() {
        let cfg = MotionConfig::new(MotionKind::Circular).with_speed(-1.0);
        let (state, _) = *run(cfg, Point::ZERO, 10, 0.1).last().unwrap();
        assert!((state.angle().unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn oscillate_is_harmonic_along_axis() {
        let center = Point::new(200.0, 200.0);
        let cfg = MotionConfig::new(MotionKind::Oscillate)
            .with_center(center)
            .with_direction(Vec2::new(0.0, 1.0))
            .with_radius(30.0)
            .with_speed(std::f64::consts::PI);
        // Quarter period at speed PI is 0.5s.
        let (_, p) = *run(cfg, center, 5, 0.1).last().unwrap();
        assert!((p.x - 200.0).abs() < 1e-9);
        assert!((p.y - 230.0).abs() < 1e-9);
    }

    #[test]
    fn wave_travels_right_and_stays_within_amplitude() {
        let cfg = MotionConfig::new(MotionKind::Wave)
            .with_radius(20.0)
            .with_wave_rate(100.0);
        let out = run(cfg, Point::new(0.0, 300.0), 200, 0.05);
        for w in out.windows(2) {
            assert!(w[1].1.x > w[0].1.x);
        }
        for (_, p) in &out {
            assert!((p.y - 300.0).abs() <= 20.0 + 1e-9);
        }
        // Leaves the scene and keeps going.
        assert!(out.last().unwrap().1.x > BOUNDS.width);
    }

    #[test]
    fn spiral_radius_grows_strictly() {
        let center = Point::new(400.0, 300.0);
        let cfg = MotionConfig::new(MotionKind::Spiral)
            .with_center(center)
            .with_radius(5.0)
            .with_growth_rate(12.0);
        let out = run(cfg, center, 300, 0.016);
        let mut prev = 5.0;
        for (_, p) in out {
            let r = p.distance(center);
            assert!(r > prev);
            prev = r;
        }
    }

    #[test]
    fn random_walk_is_seed_deterministic() {
        let cfg = MotionConfig::new(MotionKind::Random)
            .with_direction(Vec2::ZERO)
            .with_turn_interval(0.1)
            .respecting_boundaries();
        let a = run(cfg.clone(), Point::new(400.0, 300.0), 100, 0.05);
        let b = run(cfg, Point::new(400.0, 300.0), 100, 0.05);
        assert_eq!(a, b);
    }

    #[test]
    fn random_walk_uses_configured_direction_first() {
        let cfg = MotionConfig::new(MotionKind::Random)
            .with_direction(Vec2::new(0.0, 1.0))
            .with_speed(10.0)
            .with_turn_interval(10.0);
        let (state, p) = *run(cfg, Point::new(100.0, 100.0), 1, 0.5).last().unwrap();
        assert_eq!(state.velocity(), Some(Vec2::new(0.0, 10.0)));
        assert!((p.y - 105.0).abs() < 1e-9);
    }

    #[test]
    fn zero_direction_means_no_movement() {
        let cfg = MotionConfig::new(MotionKind::Linear).with_direction(Vec2::ZERO);
        for (_, p) in run(cfg, Point::new(1.0, 2.0), 10, 0.1) {
            assert_eq!(p, Point::new(1.0, 2.0));
        }
    }
}
