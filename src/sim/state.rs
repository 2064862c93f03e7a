//! Game state and the simulation controller
//!
//! `Simulation` owns everything that changes during a round: the ball, the
//! target, the trail and diagnostic history, and the current phase. A host
//! drives it with four commands (reset, aim, fire, run toggle) plus `update`.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::history::{TrackTrail, TrajectoryHistory};
use super::particle::{Energy, Particle};
use super::solver::{self, FiringSolution};
use crate::planar_length;
use crate::settings::Settings;

/// Ground point under the muzzle; target offsets are measured from here
pub const LAUNCH_ORIGIN: Vec3 = Vec3::ZERO;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for aim or fire
    #[default]
    Start,
    /// Firing solution computed, waiting for fire
    Play,
    /// Ball in flight
    Fired,
    /// Ball came to rest on the ground
    Hit,
}

impl GamePhase {
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Start => "START",
            GamePhase::Play => "PLAY",
            GamePhase::Fired => "FIRED",
            GamePhase::Hit => "HIT",
        }
    }
}

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Read-only snapshot for a UI or bridge layer
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub phase: GamePhase,
    pub phase_label: &'static str,
    pub time: f32,
    pub running: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub energy: Energy,
    pub target: Vec3,
    pub muzzle_speed: f32,
    pub direction: f32,
    pub elevation: f32,
    pub miss_distance: f32,
    pub trail: Vec<Vec3>,
    /// Height, horizontal position and energy error series, oldest first
    pub history: (Vec<f32>, Vec<f32>, Vec<f32>),
}

/// The simulation controller
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(super) rng_state: RngState,
    pub(super) rng: Pcg32,
    pub(super) settings: Settings,
    pub(super) ball: Particle,
    pub(super) energy: Energy,
    pub(super) target: Vec3,
    pub(super) trail: TrackTrail,
    pub(super) history: TrajectoryHistory,
    pub(super) phase: GamePhase,
    pub(super) running: bool,
    /// Simulated seconds since the last reset
    pub(super) time: f32,
    /// Simulated seconds since the last fire (frozen on landing)
    pub(super) flight_time: f32,
    /// Set by fire, cleared on ground contact
    pub(super) airborne: bool,
}

impl Simulation {
    /// Create a simulation with the given seed and settings
    pub fn new(seed: u64, settings: Settings) -> Self {
        let rng_state = RngState::new(seed);
        let mut sim = Self {
            rng: rng_state.to_rng(),
            rng_state,
            settings: settings.sanitized(),
            ball: Particle::default(),
            energy: Energy::default(),
            target: Vec3::ZERO,
            trail: TrackTrail::default(),
            history: TrajectoryHistory::default(),
            phase: GamePhase::Start,
            running: false,
            time: 0.0,
            flight_time: 0.0,
            airborne: false,
        };
        sim.reset();
        sim
    }

    /// New target, ball back at the origin, clock zeroed, phase START
    ///
    /// Trail and history keep sliding across resets.
    pub fn reset(&mut self) {
        self.target = self.sample_target();
        self.ball.reset_kinematics();
        self.energy = Energy::default();
        self.time = 0.0;
        self.flight_time = 0.0;
        self.airborne = false;
        self.set_phase(GamePhase::Start);
    }

    /// Compute a firing solution for the current target and store it as the aim
    pub fn aim(&mut self) -> FiringSolution {
        let solution = solver::solve(
            self.target_offset(),
            self.settings.muzzle_speed,
            self.settings.muzzle_height,
            self.settings.gravity,
        );
        self.settings.set_direction(solution.direction);
        self.settings.set_elevation(solution.elevation);
        log::debug!(
            "Aim: direction {:.2}°, elevation {:.2}°",
            solution.direction,
            solution.elevation
        );
        self.set_phase(GamePhase::Play);
        solution
    }

    /// Launch the ball from the muzzle using the stored aim and speed
    pub fn fire(&mut self) {
        self.ball.reset_kinematics();
        self.ball.position = self.muzzle_point();
        self.ball.set_velocity(solver::launch_velocity(
            self.settings.direction,
            self.settings.elevation,
            self.settings.muzzle_speed,
        ));
        self.energy = Energy::of(&self.ball, self.settings.gravity);
        self.flight_time = 0.0;
        self.airborne = true;
        self.set_phase(GamePhase::Fired);
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn particle(&self) -> &Particle {
        &self.ball
    }

    pub fn energy(&self) -> Energy {
        self.energy
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Target position relative to the launch origin
    pub fn target_offset(&self) -> Vec3 {
        self.target - LAUNCH_ORIGIN
    }

    /// Launch point of every shot
    pub fn muzzle_point(&self) -> Vec3 {
        LAUNCH_ORIGIN + Vec3::new(0.0, self.settings.muzzle_height, 0.0)
    }

    pub fn trail(&self) -> &TrackTrail {
        &self.trail
    }

    pub fn history(&self) -> &TrajectoryHistory {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn flight_time(&self) -> f32 {
        self.flight_time
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn muzzle_speed(&self) -> f32 {
        self.settings.muzzle_speed
    }

    pub fn direction(&self) -> f32 {
        self.settings.direction
    }

    pub fn elevation(&self) -> f32 {
        self.settings.elevation
    }

    /// Operator override, clamped to [3, 5] m/s
    pub fn set_muzzle_speed(&mut self, speed: f32) {
        self.settings.set_muzzle_speed(speed);
    }

    /// Operator override, clamped to [0, 90]°
    pub fn set_elevation(&mut self, elevation: f32) {
        self.settings.set_elevation(elevation);
    }

    /// Operator override, normalized to [0, 360)°
    pub fn set_direction(&mut self, direction: f32) {
        self.settings.set_direction(direction);
    }

    /// Horizontal distance from the ball to the target
    pub fn miss_distance(&self) -> f32 {
        planar_length(self.ball.position - self.target)
    }

    pub fn observe(&self) -> Observation {
        Observation {
            phase: self.phase,
            phase_label: self.phase.label(),
            time: self.time,
            running: self.running,
            position: self.ball.position,
            velocity: self.ball.velocity,
            energy: self.energy,
            target: self.target,
            muzzle_speed: self.settings.muzzle_speed,
            direction: self.settings.direction,
            elevation: self.settings.elevation,
            miss_distance: self.miss_distance(),
            trail: self.trail.positions().to_vec(),
            history: self.history.to_vecs(),
        }
    }

    pub(super) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {} -> {}", self.phase.label(), phase.label());
        }
        self.phase = phase;
    }

    pub(super) fn log_landing(&self) {
        log::debug!(
            "Ball landed {:.3} m from target after {:.2} s",
            self.miss_distance(),
            self.flight_time
        );
    }

    fn sample_target(&mut self) -> Vec3 {
        let extent = self.settings.target_half_extent;
        Vec3::new(
            self.rng.random_range(-extent..=extent),
            0.0,
            self.rng.random_range(-extent..=extent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HISTORY_LENGTH;

    #[test]
    fn test_new_starts_idle() {
        let sim = Simulation::new(7, Settings::default());
        assert_eq!(sim.phase(), GamePhase::Start);
        assert!(!sim.is_running());
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.particle().position, Vec3::ZERO);
        assert_eq!(sim.seed(), 7);
    }

    #[test]
    fn test_target_on_ground_inside_footprint() {
        let mut sim = Simulation::new(42, Settings::default());
        for _ in 0..100 {
            sim.reset();
            let t = sim.target();
            assert_eq!(t.y, 0.0);
            assert!(t.x.abs() <= 5.0 && t.z.abs() <= 5.0);
        }
    }

    #[test]
    fn test_same_seed_same_targets() {
        let mut a = Simulation::new(99, Settings::default());
        let mut b = Simulation::new(99, Settings::default());
        for _ in 0..5 {
            assert_eq!(a.target(), b.target());
            a.reset();
            b.reset();
        }
    }

    #[test]
    fn test_aim_stores_solution() {
        let mut sim = Simulation::new(1, Settings::default());
        let solution = sim.aim();
        assert_eq!(sim.phase(), GamePhase::Play);
        assert_eq!(sim.direction(), solution.direction);
        assert_eq!(sim.elevation(), solution.elevation);
        assert_eq!(sim.particle().position, Vec3::ZERO, "aim must not move the ball");
    }

    #[test]
    fn test_fire_seeds_launch() {
        let mut sim = Simulation::new(1, Settings::default());
        sim.set_direction(0.0);
        sim.set_elevation(90.0);
        sim.fire();

        assert_eq!(sim.phase(), GamePhase::Fired);
        assert!(sim.is_airborne());
        assert_eq!(sim.particle().position, sim.muzzle_point());
        assert!((sim.particle().velocity - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-4);
        assert_eq!(sim.particle().acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_operator_overrides_are_clamped() {
        let mut sim = Simulation::new(1, Settings::default());
        sim.set_muzzle_speed(9.0);
        sim.set_elevation(-10.0);
        sim.set_direction(370.0);
        assert_eq!(sim.muzzle_speed(), 5.0);
        assert_eq!(sim.elevation(), 0.0);
        assert!((sim.direction() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_phase_labels() {
        let labels: Vec<&str> = [
            GamePhase::Start,
            GamePhase::Play,
            GamePhase::Fired,
            GamePhase::Hit,
        ]
        .iter()
        .map(GamePhase::label)
        .collect();
        assert_eq!(labels, vec!["START", "PLAY", "FIRED", "HIT"]);
    }

    #[test]
    fn test_observation_serializes() {
        let sim = Simulation::new(3, Settings::default());
        let obs = sim.observe();
        assert_eq!(obs.history.0.len(), HISTORY_LENGTH);
        assert_eq!(obs.history.1.len(), HISTORY_LENGTH);
        assert_eq!(obs.history.2.len(), HISTORY_LENGTH);

        let json = serde_json::to_string(&obs).expect("serializable");
        assert!(json.contains("\"phase_label\":\"START\""));
        assert!(json.contains("\"history\":[["));
    }
}
