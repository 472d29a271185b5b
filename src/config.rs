use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::params::{SimulationParams, UpdateOrder};

/// Load parameters from a TOML file.
///
/// Missing keys keep their defaults, unknown keys are an error.
/// The result is not validated yet, since command line flags may still
/// override it. See [`SimulationParams::validate`].
pub fn from_file<P: AsRef<Path>>(file: P) -> Result<SimulationParams> {
    let file = file.as_ref();
    let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
    from_toml(&contents).with_context(|| format!("failed to parse {file:?}"))
}

pub fn from_toml(contents: &str) -> Result<SimulationParams> {
    let params = toml::from_str(contents).context("failed to deserialize parameters")?;
    Ok(params)
}

/// Values given on the command line, applied on top of file or defaults.
#[derive(Debug, Default, Clone)]
pub struct ParamOverrides {
    pub smooth: bool,
    pub boids_num: Option<usize>,
    pub boid_size: Option<f64>,
    pub max_speed: Option<f64>,
    pub delta_time: Option<f64>,
    pub sep_radius: Option<f64>,
    pub ali_radius: Option<f64>,
    pub coh_radius: Option<f64>,
    pub sep_scalar: Option<f64>,
    pub ali_scalar: Option<f64>,
    pub coh_scalar: Option<f64>,
    pub seed: Option<u64>,
    pub update_order: Option<UpdateOrder>,
}

impl ParamOverrides {
    pub fn apply(&self, params: &mut SimulationParams) {
        // A flag can only switch smoothing on
        params.smooth |= self.smooth;

        set(&mut params.boids_num, self.boids_num);
        set(&mut params.boid_size, self.boid_size);
        set(&mut params.max_speed, self.max_speed);
        set(&mut params.delta_time, self.delta_time);
        set(&mut params.separation.radius, self.sep_radius);
        set(&mut params.alignment.radius, self.ali_radius);
        set(&mut params.cohesion.radius, self.coh_radius);
        set(&mut params.separation.scalar, self.sep_scalar);
        set(&mut params.alignment.scalar, self.ali_scalar);
        set(&mut params.cohesion.scalar, self.coh_scalar);
        set(&mut params.seed, self.seed);
        set(&mut params.update_order, self.update_order);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Resolve the final parameters: defaults, then file, then flags.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed,
/// or if the merged parameters are invalid.
pub fn resolve(file: Option<&Path>, overrides: &ParamOverrides) -> Result<SimulationParams> {
    let mut params = match file {
        Some(file) => from_file(file)?,
        None => SimulationParams::default(),
    };
    overrides.apply(&mut params);
    params.validate().context("failed to validate parameters")?;
    Ok(params)
}
