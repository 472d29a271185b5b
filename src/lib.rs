/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation.
 * The simulation core (boid, physics, flock) is independent of any window;
 * the app and ui modules adapt it to nannou.
 */

// Re-export key components for easier access
pub use boid::{Boid, Bounds, Rgba};
pub use flock::{Flock, FlockStats};
pub use params::{BehaviorParams, SimulationParams, UpdateOrder};
pub use physics::Steering;
pub use renderer::{DrawList, Presenter};
pub use simulation::Simulation;

// Define modules
pub mod app;
pub mod boid;
pub mod config;
pub mod debug;
pub mod flock;
pub mod headless;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod simulation;
pub mod ui;

/// 2D vector used for positions, velocities and accelerations.
pub type Vec2 = nalgebra::Vector2<f64>;

// Constants
pub const WORLD_WIDTH: f64 = 1080.0;
pub const WORLD_HEIGHT: f64 = 720.0;
pub const DEFAULT_BORDER: f64 = 100.0;
pub const DEFAULT_OUT_DECAY: f64 = 10.0;
