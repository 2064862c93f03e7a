//! Operator tunables
//!
//! Values a UI exposes as sliders. Setters clamp into the documented ranges so
//! the simulation never sees out-of-bounds input. Nothing here is written to
//! disk; `from_json` lets a host hand in a preset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_degrees;

/// Lowest muzzle height accepted (m); the ball must start airborne
pub const MIN_MUZZLE_HEIGHT: f32 = 0.05;
/// Weakest gravity accepted (m/s²); the range formula divides by it
pub const MIN_GRAVITY: f32 = 0.01;
pub const MAX_GRAVITY: f32 = 100.0;
pub const MAX_MUZZLE_HEIGHT: f32 = 100.0;
/// Largest target footprint accepted (m); the sampling range must stay finite
pub const MAX_TARGET_HALF_EXTENT: f32 = 1000.0;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Launch speed (m/s), [3, 5]
    pub muzzle_speed: f32,
    /// Launch elevation (degrees), [0, 90]
    pub elevation: f32,
    /// Launch direction (degrees), [0, 360)
    pub direction: f32,

    /// Muzzle point height above ground (m)
    pub muzzle_height: f32,
    /// Downward gravitational acceleration (m/s²)
    pub gravity: f32,
    /// Targets are placed in [-extent, extent] on x and z (m)
    pub target_half_extent: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muzzle_speed: DEFAULT_MUZZLE_SPEED,
            elevation: 0.0,
            direction: 0.0,

            muzzle_height: MUZZLE_HEIGHT,
            gravity: GRAVITY,
            target_half_extent: TARGET_HALF_EXTENT,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take defaults, values are clamped
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Copy with every field clamped into range
    pub fn sanitized(mut self) -> Self {
        self.set_muzzle_speed(self.muzzle_speed);
        self.set_elevation(self.elevation);
        self.set_direction(self.direction);
        self.muzzle_height =
            finite_or(self.muzzle_height, MUZZLE_HEIGHT).clamp(MIN_MUZZLE_HEIGHT, MAX_MUZZLE_HEIGHT);
        self.gravity = finite_or(self.gravity, GRAVITY).clamp(MIN_GRAVITY, MAX_GRAVITY);
        self.target_half_extent = finite_or(self.target_half_extent, TARGET_HALF_EXTENT)
            .abs()
            .min(MAX_TARGET_HALF_EXTENT);
        self
    }

    pub fn set_muzzle_speed(&mut self, speed: f32) {
        self.muzzle_speed =
            finite_or(speed, DEFAULT_MUZZLE_SPEED).clamp(MIN_MUZZLE_SPEED, MAX_MUZZLE_SPEED);
    }

    pub fn set_elevation(&mut self, elevation: f32) {
        self.elevation = finite_or(elevation, 0.0).clamp(MIN_ELEVATION, MAX_ELEVATION);
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = normalize_degrees(direction);
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
