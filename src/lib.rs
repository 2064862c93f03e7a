//! Ballistic Range - A projectile firing-range simulation
//!
//! Core modules:
//! - `sim`: Simulation core (particle integration, firing solver, history buffers, game phase)
//! - `settings`: Operator tunables (muzzle speed, aim, field size)

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Largest step `update` will integrate (guards against frame-time spikes)
    pub const MAX_DT: f32 = 0.02;

    /// Gravitational acceleration (9.81 m/s² scaled by 0.1)
    pub const GRAVITY: f32 = 0.981;

    /// Muzzle point height above ground (m)
    pub const MUZZLE_HEIGHT: f32 = 0.7;
    /// Muzzle speed limits (m/s)
    pub const MIN_MUZZLE_SPEED: f32 = 3.0;
    pub const MAX_MUZZLE_SPEED: f32 = 5.0;
    pub const DEFAULT_MUZZLE_SPEED: f32 = 4.0;

    /// Elevation limits (degrees)
    pub const MIN_ELEVATION: f32 = 0.0;
    pub const MAX_ELEVATION: f32 = 90.0;

    /// Half the side of the square footprint targets are placed in (m)
    pub const TARGET_HALF_EXTENT: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.1;
    pub const BALL_INVERSE_MASS: f32 = 1.0;

    /// Bisection stops once the elevation bracket is narrower than this (degrees)
    pub const ELEVATION_TOLERANCE: f32 = 1e-4;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    while angle < 0.0 {
        angle += 360.0;
    }
    // Adding 360 to a tiny negative value can round up to exactly 360
    while angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

/// Planar (ground) distance of a point from the origin, ignoring height
#[inline]
pub fn planar_length(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}
