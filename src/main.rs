//! Ballistic Range headless runner
//!
//! Usage: `ballistic-range [seed] [settings.json]`
//!
//! Places a target, aims, fires, and steps at 60 Hz until the ball lands,
//! then prints the final observation as JSON.

use std::process::ExitCode;

use ballistic_range::Settings;
use ballistic_range::sim::{GamePhase, Simulation, solver};

/// Host frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many frames (10 minutes of simulated time)
const MAX_FRAMES: u32 = 60 * 600;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 12345,
    };
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(&path)?)?,
        None => Settings::default(),
    };

    log::info!("Ballistic Range starting with seed: {}", seed);
    let mut sim = Simulation::new(seed, settings);

    let target = sim.target();
    log::info!("Target at ({:.2}, {:.2})", target.x, target.z);

    let distance = ballistic_range::planar_length(sim.target_offset());
    let s = sim.settings();
    if !solver::is_reachable(distance, s.muzzle_speed, s.muzzle_height, s.gravity) {
        log::warn!(
            "Target at {:.2} m is beyond maximum range {:.2} m",
            distance,
            solver::max_range(s.muzzle_speed, s.muzzle_height, s.gravity)
        );
    }

    let solution = sim.aim();
    log::info!(
        "Firing solution: direction {:.2}°, elevation {:.2}°",
        solution.direction,
        solution.elevation
    );

    sim.fire();
    sim.set_running(true);

    let mut frames = 0;
    while sim.phase() != GamePhase::Hit && frames < MAX_FRAMES {
        sim.update(FRAME_DT);
        frames += 1;
    }

    if sim.phase() == GamePhase::Hit {
        log::info!(
            "Landed {:.3} m from target after {:.2} s",
            sim.miss_distance(),
            sim.flight_time()
        );
    } else {
        log::warn!("Ball still airborne after {} frames", frames);
    }

    println!("{}", serde_json::to_string_pretty(&sim.observe())?);
    Ok(())
}
