/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains every
 * tunable of the boid simulation. Parameters are deserialized from the
 * config file, patched by command line flags, adjusted live through the UI,
 * and validated before the flock ever sees them.
 */

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fmt::Debug, ops::RangeBounds};

use crate::boid::Bounds;
use crate::{DEFAULT_BORDER, DEFAULT_OUT_DECAY, WORLD_HEIGHT, WORLD_WIDTH};

/// Order in which a tick applies steering to the flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Every boid steers from the previous tick's state, then all move.
    #[default]
    Snapshot,
    /// Each boid moves right after its steering is computed, so later
    /// boids already see the new state of earlier ones.
    Immediate,
}

/// Neighbour radius and post-average weight of one flocking rule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorParams {
    pub radius: f64,
    pub scalar: f64,
}

impl BehaviorParams {
    pub const fn new(radius: f64, scalar: f64) -> Self {
        Self { radius, scalar }
    }
}

// Parameters for the simulation that can be adjusted via config, CLI or UI
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    pub smooth: bool,
    pub boids_num: usize,
    pub boid_size: f64,
    pub max_speed: f64,
    pub delta_time: f64,
    pub separation: BehaviorParams,
    pub alignment: BehaviorParams,
    pub cohesion: BehaviorParams,
    pub seed: u64,
    pub update_order: UpdateOrder,

    // World
    pub world_width: f64,
    pub world_height: f64,
    pub border: f64,
    pub out_decay: f64,

    // Presentation
    pub frame_rate: f64,
    pub show_leader: bool,
    pub paused: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            smooth: false,
            boids_num: 50,
            boid_size: 8.0,
            max_speed: 20.0,
            delta_time: 0.1666,
            separation: BehaviorParams::new(22.0, 0.44),
            alignment: BehaviorParams::new(70.0, 0.08),
            cohesion: BehaviorParams::new(110.0, 0.09),
            seed: 603,
            update_order: UpdateOrder::Snapshot,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            border: DEFAULT_BORDER,
            out_decay: DEFAULT_OUT_DECAY,
            frame_rate: 30.0,
            show_leader: true,
            paused: false,
        }
    }
}

impl SimulationParams {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.world_width,
            height: self.world_height,
            border: self.border,
            out_decay: self.out_decay,
        }
    }

    /// Reject parameter combinations the per-tick math is not defined for.
    ///
    /// # Errors
    /// Returns an error naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        check_num(self.boids_num, Self::boids_num_range()).context("invalid number of boids")?;
        check_positive(self.boid_size).context("invalid boid size")?;
        check_positive(self.max_speed).context("invalid max speed")?;
        check_positive(self.delta_time).context("invalid delta time")?;

        check_behavior(&self.separation).context("invalid separation")?;
        check_behavior(&self.alignment).context("invalid alignment")?;
        check_behavior(&self.cohesion).context("invalid cohesion")?;

        check_num(self.border, 0.0..f64::INFINITY).context("invalid border")?;
        check_positive(self.out_decay).context("invalid out decay")?;
        check_num(self.world_width, 2.0 * self.boid_size..f64::INFINITY)
            .context("invalid world width")?;
        check_num(self.world_height, 2.0 * self.boid_size..f64::INFINITY)
            .context("invalid world height")?;

        check_positive(self.frame_rate).context("invalid frame rate")?;

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn boids_num_range() -> std::ops::RangeInclusive<usize> {
        1..=10_000
    }

    pub fn ui_boids_num_range() -> std::ops::RangeInclusive<usize> {
        1..=500
    }

    pub fn max_speed_range() -> std::ops::RangeInclusive<f64> {
        1.0..=100.0
    }

    pub fn delta_time_range() -> std::ops::RangeInclusive<f64> {
        0.01..=1.0
    }

    pub fn scalar_range() -> std::ops::RangeInclusive<f64> {
        0.0..=2.0
    }

    pub fn radius_range() -> std::ops::RangeInclusive<f64> {
        1.0..=300.0
    }
}

fn check_behavior(behavior: &BehaviorParams) -> Result<()> {
    check_positive(behavior.radius).context("invalid radius")?;
    if !behavior.scalar.is_finite() {
        bail!("scalar must be finite, but is {}", behavior.scalar);
    }
    Ok(())
}

fn check_positive(num: f64) -> Result<()> {
    if !(num > 0.0 && num.is_finite()) {
        bail!("number must be positive and finite, but is {num:?}");
    }
    Ok(())
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
