use serde::Serialize;

use crate::motion::config::EffectConfig;

/// Phase accumulators for breathing and glow, advanced independently of motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EffectState {
    config: EffectConfig,
    breathing_phase: f64,
    glow_phase: f64,
}

impl EffectState {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config: config.normalized(),
            breathing_phase: 0.0,
            glow_phase: 0.0,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn advance(&mut self, dt: f64) {
        if self.config.breathing {
            self.breathing_phase += self.config.breathing_speed * dt;
        }
        if self.config.glow {
            self.glow_phase += self.config.glow_speed * dt;
        }
    }

    pub fn breathing_phase(&self) -> f64 {
        self.breathing_phase
    }

    pub fn glow_phase(&self) -> f64 {
        self.glow_phase
    }

    /// Visual scale factor; 1 when breathing is off.
    pub fn scale(&self) -> f64 {
        if self.config.breathing {
            1.0 + self.config.breathing_amount * self.breathing_phase.sin()
        } else {
            1.0
        }
    }

    /// Glow strength in `[0.2, 1]` while glowing, 0 otherwise.
    pub fn glow_intensity(&self) -> f64 {
        if self.config.glow {
            0.6 + 0.4 * self.glow_phase.sin()
        } else {
            0.0
        }
    }

    pub fn glow_radius(&self) -> f64 {
        if self.config.glow {
            self.config.glow_radius
        } else {
            0.0
        }
    }
}
