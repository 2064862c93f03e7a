//! Simulation step
//!
//! Advances the ball by one host-supplied `dt` and applies the ground rules.

use glam::Vec3;

use super::particle::Energy;
use super::state::{GamePhase, Simulation};
use crate::consts::*;
use crate::planar_length;

/// Commands gathered from the host for a single tick
///
/// All flags are one-shot; the host clears them after each call.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New target, ball back at origin
    pub reset: bool,
    /// Compute and store a firing solution
    pub aim: bool,
    /// Launch the ball
    pub fire: bool,
    /// Start/stop the clock
    pub toggle_run: bool,
}

/// Apply pending commands (reset, aim, fire, run toggle) then advance by `dt`
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32) {
    if input.reset {
        sim.reset();
    }
    if input.aim {
        sim.aim();
    }
    if input.fire {
        sim.fire();
    }
    if input.toggle_run {
        sim.toggle_running();
    }

    sim.update(dt);
}

impl Simulation {
    /// Advance the simulation by `dt` seconds (clamped to [0, `MAX_DT`])
    ///
    /// Does nothing while stopped or when the clamped step is not positive.
    pub fn update(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
        if dt <= 0.0 {
            return;
        }

        self.time += dt;

        let gravity = self.settings.gravity;
        if self.airborne {
            self.flight_time += dt;
            if !self.ball.is_immovable() {
                let weight = Vec3::new(0.0, -gravity * self.ball.mass(), 0.0);
                self.ball.apply_force(weight);
            }
        }

        self.trail.record(self.ball.position);

        if self.airborne {
            let before = self.ball.position;
            self.ball.integrate(dt);
            if self.ball.position.y <= 0.0 {
                self.touch_down(before);
            }
        } else {
            self.clamp_to_ground();
        }

        self.energy = Energy::of(&self.ball, gravity);
        self.history.push(
            self.ball.position.y,
            planar_length(self.ball.position),
            self.energy.error,
        );
    }

    /// Ball crossed the ground plane during this step
    ///
    /// Places it at the interpolated crossing point and ends the flight.
    fn touch_down(&mut self, before: Vec3) {
        let after = self.ball.position;
        let drop = before.y - after.y;
        let t = if drop > f32::EPSILON {
            (before.y / drop).clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.ball.position = before.lerp(after, t);
        self.clamp_to_ground();
        self.airborne = false;

        self.set_phase(GamePhase::Hit);
        self.log_landing();
    }

    fn clamp_to_ground(&mut self) {
        self.ball.position.y = 0.0;
        self.ball.velocity = Vec3::ZERO;
        self.ball.force = Vec3::ZERO;
    }
}
