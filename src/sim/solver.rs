//! Firing solver
//!
//! Azimuth comes straight from the target offset. Elevation is found by
//! bisection over the closed-form range of an ideal (drag-free) projectile
//! launched from a given height and landing at ground level.
//!
//! Angles are in degrees throughout. "Distance" is the linear planar range to
//! the target, never its square.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{normalize_degrees, planar_length};

/// Planar offsets shorter than this have no meaningful azimuth
const DEGENERATE_OFFSET: f32 = 1e-6;

/// Launch direction and elevation predicted to land on a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    /// Degrees in [0, 360)
    pub direction: f32,
    /// Degrees in [0, 90]
    pub elevation: f32,
}

/// Ground range of a projectile fired at `elevation` degrees
pub fn estimate_range(elevation: f32, muzzle_speed: f32, launch_height: f32, gravity: f32) -> f32 {
    let e = elevation.to_radians();
    let ux = muzzle_speed * e.cos();
    let uy = muzzle_speed * e.sin();
    let radicand = (uy * uy + 2.0 * gravity * launch_height).max(0.0);

    (ux / gravity) * (uy + radicand.sqrt())
}

/// Elevation (degrees) whose range matches `target_distance`
///
/// Bisects `f(e) = target_distance - estimate_range(e)` over [0°, 90°]. The
/// bracket halves every pass so this always terminates (about 20 passes).
///
/// The search assumes `f` changes sign across the bracket. Targets beyond
/// the maximum range never bracket a root and the result drifts to 90°
/// without any signal; use [`is_reachable`] to tell the cases apart.
pub fn solve_elevation(
    target_distance: f32,
    muzzle_speed: f32,
    launch_height: f32,
    gravity: f32,
) -> f32 {
    let residual =
        |e: f32| target_distance - estimate_range(e, muzzle_speed, launch_height, gravity);

    let mut x_min = MIN_ELEVATION;
    let mut x_max = MAX_ELEVATION;
    let mut fx_min = residual(x_min);

    while x_max - x_min > ELEVATION_TOLERANCE {
        let x = 0.5 * (x_min + x_max);
        let fx = residual(x);

        if fx_min * fx < 0.0 {
            x_max = x;
        } else {
            x_min = x;
            fx_min = fx;
        }
    }

    0.5 * (x_min + x_max)
}

/// Compass-style direction (degrees in [0, 360)) toward a target offset
///
/// `atan2(x, z)` minus 90°. Offsets with no planar extent return 0.
pub fn compute_azimuth(offset: Vec3) -> f32 {
    if planar_length(offset) < DEGENERATE_OFFSET {
        return 0.0;
    }
    normalize_degrees(offset.x.atan2(offset.z).to_degrees() - 90.0)
}

/// Full firing solution for a target at `offset` from the launch origin
pub fn solve(offset: Vec3, muzzle_speed: f32, launch_height: f32, gravity: f32) -> FiringSolution {
    let distance = planar_length(offset);
    FiringSolution {
        direction: compute_azimuth(offset),
        elevation: solve_elevation(distance, muzzle_speed, launch_height, gravity),
    }
}

/// Launch velocity for a direction/elevation pair
///
/// Maps the compass-style angles onto the right-handed world axes used by
/// `compute_azimuth` (y up).
pub fn launch_velocity(direction: f32, elevation: f32, muzzle_speed: f32) -> Vec3 {
    let right_dir = (direction + 90.0).to_radians();
    let right_elev = (90.0 - elevation).to_radians();

    Vec3::new(
        right_dir.sin() * right_elev.sin() * muzzle_speed,
        right_elev.cos() * muzzle_speed,
        right_dir.cos() * right_elev.sin() * muzzle_speed,
    )
}

/// Elevation (degrees) giving the greatest range from `launch_height`
pub fn optimal_elevation(muzzle_speed: f32, launch_height: f32, gravity: f32) -> f32 {
    let u2 = muzzle_speed * muzzle_speed;
    let denom = (u2 + 2.0 * gravity * launch_height).max(0.0).sqrt();
    if denom <= 0.0 {
        return 45.0;
    }
    (muzzle_speed / denom).atan().to_degrees()
}

/// Greatest achievable range for the given muzzle speed and launch height
pub fn max_range(muzzle_speed: f32, launch_height: f32, gravity: f32) -> f32 {
    let e = optimal_elevation(muzzle_speed, launch_height, gravity);
    estimate_range(e, muzzle_speed, launch_height, gravity)
}

/// Whether a target at `distance` can be reached at all
pub fn is_reachable(distance: f32, muzzle_speed: f32, launch_height: f32, gravity: f32) -> bool {
    distance <= max_range(muzzle_speed, launch_height, gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_range_flat_ground_matches_textbook() {
        // h = 0: R = u² sin(2e) / g
        let r = estimate_range(30.0, 4.0, 0.0, GRAVITY);
        let expected = 16.0 * 60.0_f32.to_radians().sin() / GRAVITY;
        assert!((r - expected).abs() < 1e-4);
    }

    #[test]
    fn test_range_straight_up_is_zero() {
        assert!(estimate_range(90.0, 4.0, 0.7, GRAVITY).abs() < 1e-5);
    }

    #[test]
    fn test_range_horizontal_shot_from_height() {
        // e = 0: R = u * sqrt(2h / g)
        let r = estimate_range(0.0, 4.0, 0.5, GRAVITY);
        let expected = 4.0 * (2.0 * 0.5 / GRAVITY).sqrt();
        assert!((r - expected).abs() < 1e-4);
    }

    #[test]
    fn test_solve_elevation_low_root() {
        let e = solve_elevation(5.0, 4.0, 0.5, GRAVITY);
        assert!(e > 0.0 && e < 45.0, "expected the flat trajectory, got {e}");
        assert!((estimate_range(e, 4.0, 0.5, GRAVITY) - 5.0).abs() < 1e-2);
    }

    #[test]
    fn test_solve_elevation_short_target_lobs() {
        // Closer than the horizontal-shot range: only the high root exists
        let d = 1.0;
        let e = solve_elevation(d, 4.0, 0.7, GRAVITY);
        assert!(e > 45.0);
        assert!((estimate_range(e, 4.0, 0.7, GRAVITY) - d).abs() < 1e-2);
    }

    #[test]
    fn test_solve_elevation_unreachable_converges_to_boundary() {
        let e = solve_elevation(1000.0, 3.0, 0.7, GRAVITY);
        assert!((e - 90.0).abs() < 1e-3);
        assert!(!is_reachable(1000.0, 3.0, 0.7, GRAVITY));
    }

    #[test]
    fn test_optimal_elevation_below_45_with_height() {
        assert!((optimal_elevation(4.0, 0.0, GRAVITY) - 45.0).abs() < 1e-3);
        let e = optimal_elevation(4.0, 0.7, GRAVITY);
        assert!(e < 45.0);
        assert!(max_range(4.0, 0.7, GRAVITY) >= estimate_range(45.0, 4.0, 0.7, GRAVITY));
    }

    #[test]
    fn test_azimuth_reference_offset() {
        // atan2(3, 4) = 36.87°, minus 90 = -53.13°, normalized
        let dir = compute_azimuth(Vec3::new(3.0, 0.0, 4.0));
        assert!((dir - 306.87).abs() < 0.01, "got {dir}");
    }

    #[test]
    fn test_azimuth_degenerate_offset() {
        assert_eq!(compute_azimuth(Vec3::ZERO), 0.0);
        assert_eq!(compute_azimuth(Vec3::new(0.0, 3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_launch_velocity_points_at_target() {
        let offset = Vec3::new(3.0, 0.0, 4.0);
        let dir = compute_azimuth(offset);
        let v = launch_velocity(dir, 0.0, 4.0);

        assert!(v.y.abs() < 1e-5);
        assert!((v.length() - 4.0).abs() < 1e-4);
        let along = Vec3::new(v.x, 0.0, v.z).normalize();
        assert!((along - offset.normalize()).length() < 1e-4);
    }

    #[test]
    fn test_launch_velocity_vertical() {
        let v = launch_velocity(123.0, 90.0, 5.0);
        assert!((v - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_solve_composes_azimuth_and_elevation() {
        let offset = Vec3::new(3.0, 0.0, 4.0);
        let s = solve(offset, 4.0, 0.5, GRAVITY);
        assert_eq!(s.direction, compute_azimuth(offset));
        assert_eq!(s.elevation, solve_elevation(5.0, 4.0, 0.5, GRAVITY));
    }

    proptest! {
        #[test]
        fn prop_azimuth_in_range(
            x in -1000.0f32..1000.0,
            z in -1000.0f32..1000.0,
        ) {
            prop_assume!(planar_length(Vec3::new(x, 0.0, z)) > 1e-3);
            let dir = compute_azimuth(Vec3::new(x, 0.0, z));
            prop_assert!((0.0..360.0).contains(&dir), "direction {} out of range", dir);
        }

        #[test]
        fn prop_bisection_converges(
            speed in 3.0f32..=5.0,
            height in 0.1f32..2.0,
            frac in 0.01f32..0.99,
        ) {
            let lo = estimate_range(0.0, speed, height, GRAVITY);
            let hi = estimate_range(45.0, speed, height, GRAVITY);
            let target = lo + frac * (hi - lo);

            let e = solve_elevation(target, speed, height, GRAVITY);
            let err = (estimate_range(e, speed, height, GRAVITY) - target).abs();
            prop_assert!(err < 1e-2, "elevation {} misses by {}", e, err);
        }
    }
}
