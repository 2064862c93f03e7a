//! Point-mass particle and its integrator
//!
//! Forces accumulate between steps and are consumed by `integrate`, which uses
//! semi-implicit Euler (velocity first, then position).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A point mass with kinematic state and a force accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Forces applied since the last integrate
    pub force: Vec3,
    /// 0 means infinite mass (immovable)
    inverse_mass: f32,
    /// Cosmetic only, collision is against the ground plane
    pub radius: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(BALL_INVERSE_MASS, BALL_RADIUS)
    }
}

impl Particle {
    pub fn new(inverse_mass: f32, radius: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            force: Vec3::ZERO,
            inverse_mass: inverse_mass.max(0.0),
            radius,
        }
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Negative values are treated as immovable
    pub fn set_inverse_mass(&mut self, inverse_mass: f32) {
        self.inverse_mass = inverse_mass.max(0.0);
    }

    /// Mass in kg (infinite for immovable particles)
    pub fn mass(&self) -> f32 {
        if self.inverse_mass > 0.0 {
            1.0 / self.inverse_mass
        } else {
            f32::INFINITY
        }
    }

    pub fn is_immovable(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Add a force to the accumulator; takes effect on the next integrate
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Zero position, velocity, acceleration and pending forces
    pub fn reset_kinematics(&mut self) {
        self.position = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }

    /// Advance one step of semi-implicit Euler. Non-positive `dt` is ignored.
    pub fn integrate(&mut self, dt: f32) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        self.acceleration = self.force * self.inverse_mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.force = Vec3::ZERO;
    }
}

/// Energy bookkeeping for a particle (diagnostic only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    pub potential: f32,
    pub kinetic: f32,
    /// |potential - kinetic|
    pub error: f32,
}

impl Energy {
    pub fn of(particle: &Particle, gravity: f32) -> Self {
        if particle.is_immovable() {
            return Self::default();
        }

        let mass = particle.mass();
        let potential = gravity * particle.position.y * mass;
        let kinetic = 0.5 * particle.velocity.length_squared() * mass;
        Self {
            potential,
            kinetic,
            error: (potential - kinetic).abs(),
        }
    }
}
