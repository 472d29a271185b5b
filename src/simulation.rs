/*
 * Simulation Module
 *
 * This module ties the flock to its parameters and a tick counter.
 * Both the window and the headless driver go through it, so parameter
 * changes and the run loop behave the same everywhere.
 */

use anyhow::{Context, Result};

use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::renderer::{self, Presenter};

pub struct Simulation {
    flock: Flock,
    params: SimulationParams,
    ticks: u64,
}

impl Simulation {
    /// Validate the parameters and spawn the flock.
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate().context("failed to validate parameters")?;
        let flock = Flock::new(&params);
        Ok(Self {
            flock,
            params,
            ticks: 0,
        })
    }

    // Advance one tick unless paused
    pub fn step(&mut self) {
        if self.params.paused {
            return;
        }
        self.flock.update(&self.params);
        self.ticks += 1;
    }

    pub fn draw<P: Presenter>(&self, presenter: &mut P) {
        renderer::draw_frame(presenter, &self.flock, &self.params);
    }

    /// Step and draw until the presenter asks to quit.
    ///
    /// Returns the number of frames presented.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> u64 {
        let mut frames = 0;
        while !presenter.quit_requested() {
            self.step();
            self.draw(presenter);
            presenter.present();
            frames += 1;
        }
        frames
    }

    // Respawn the flock from the configured seed
    pub fn reset(&mut self) {
        self.flock = Flock::new(&self.params);
        self.ticks = 0;
    }

    /// Swap in new parameters.
    ///
    /// Invalid parameters are rejected and the old ones kept. A new
    /// population, boid size or seed respawns the flock. A new speed limit
    /// is pushed into every boid. Everything else is read on the next tick.
    pub fn apply_params(&mut self, params: SimulationParams) -> Result<()> {
        if params == self.params {
            return Ok(());
        }
        params.validate().context("failed to validate parameters")?;

        let respawn = params.boids_num != self.params.boids_num
            || params.boid_size != self.params.boid_size
            || params.seed != self.params.seed;
        let speed_changed = params.max_speed != self.params.max_speed;

        log::debug!("parameters changed: {params:?}");
        self.params = params;

        if respawn {
            self.reset();
        } else if speed_changed {
            self.flock.set_max_speed(self.params.max_speed);
        }

        Ok(())
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
