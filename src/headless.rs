/*
 * Headless Module
 *
 * Runs the simulation without a window for a fixed number of frames.
 * Frames are drawn into a DrawList so the full frame path is exercised,
 * and flock statistics are logged at regular intervals.
 */

use anyhow::Result;

use crate::params::SimulationParams;
use crate::renderer::DrawList;
use crate::simulation::Simulation;

// Number of progress reports over a run
const REPORTS: u64 = 10;

/// Run `frames` ticks and return the final simulation.
pub fn run(params: SimulationParams, frames: u64) -> Result<Simulation> {
    let mut sim = Simulation::new(params)?;
    let report_every = (frames / REPORTS).max(1);

    let mut done = 0;
    while done < frames {
        let chunk = report_every.min(frames - done);
        let mut presenter = DrawList::with_frame_budget(chunk);
        done += sim.run(&mut presenter);

        let stats = sim.flock().stats();
        log::info!(
            "tick {done}/{frames}: mean speed {:.3}, max speed {:.3}, centroid ({:.1}, {:.1})",
            stats.mean_speed,
            stats.max_speed,
            stats.centroid.x,
            stats.centroid.y
        );
        log::debug!("last frame drew {} commands", presenter.commands().len());
    }

    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_requested_frames() {
        let sim = run(SimulationParams::default(), 25).unwrap();
        assert_eq!(sim.ticks(), 25);
    }

    #[test]
    fn zero_frames_leaves_flock_untouched() {
        let sim = run(SimulationParams::default(), 0).unwrap();
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn same_seed_same_outcome() {
        let a = run(SimulationParams::default(), 40).unwrap();
        let b = run(SimulationParams::default(), 40).unwrap();
        let positions = |sim: &Simulation| -> Vec<_> {
            sim.flock().boids().iter().map(|boid| boid.position).collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
