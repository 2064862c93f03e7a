//! Simulation core
//!
//! All numerical logic lives here. This module must stay free of rendering
//! and platform code:
//! - Explicit `dt` supplied by the host, clamped per step
//! - Seeded RNG only
//! - Single owner (`Simulation`), synchronous commands

pub mod history;
pub mod particle;
pub mod solver;
pub mod state;
pub mod tick;

pub use history::{HISTORY_LENGTH, HistorySample, TRAIL_LENGTH, TrackTrail, TrajectoryHistory};
pub use particle::{Energy, Particle};
pub use solver::{FiringSolution, compute_azimuth, estimate_range, solve, solve_elevation};
pub use state::{GamePhase, Observation, RngState, Simulation};
pub use tick::{TickInput, tick};
