/*
 * Renderer Module
 *
 * This module turns a flock into draw calls. It never talks to a window
 * directly: everything goes through the `Presenter` trait, which the
 * nannou window and the headless recorder both implement.
 *
 * Coordinates passed to a presenter are world coordinates
 * (origin top-left, y pointing down).
 */

use crate::boid::Rgba;
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::Vec2;

// Factor applied to steering and acceleration vectors so they are visible
pub const VECTOR_SCALE: f64 = 5.0;

const OUTLINE_WEIGHT: f64 = 2.0;
const RADIUS_WEIGHT: f64 = 1.0;
const VECTOR_WEIGHT: f64 = 2.0;

/// Drawing surface and quit signal of the outside world.
pub trait Presenter {
    fn clear(&mut self, color: Rgba);

    // Outlined circle
    fn circle(&mut self, center: Vec2, radius: f64, color: Rgba, weight: f64);

    fn line(&mut self, start: Vec2, end: Vec2, color: Rgba, weight: f64);

    /// Called once a frame has been fully drawn.
    fn present(&mut self) {}

    /// Whether the outside world asked the run loop to stop.
    fn quit_requested(&self) -> bool {
        false
    }
}

// Draw one frame of the flock
pub fn draw_frame<P: Presenter>(presenter: &mut P, flock: &Flock, params: &SimulationParams) {
    presenter.clear(Rgba::BLACK);

    if params.show_leader {
        draw_leader_overlay(presenter, flock, params);
    }

    for boid in flock.boids() {
        presenter.circle(boid.position, boid.size, boid.color, OUTLINE_WEIGHT);
        presenter.line(
            boid.position,
            boid.position + boid.acceleration * VECTOR_SCALE,
            boid.color,
            VECTOR_WEIGHT,
        );
    }
}

// Radii and raw rule vectors of the leader
fn draw_leader_overlay<P: Presenter>(presenter: &mut P, flock: &Flock, params: &SimulationParams) {
    let (Some(leader), Some(steering)) = (flock.leader(), flock.leader_steering()) else {
        return;
    };
    let center = leader.position;

    let rules = [
        (params.separation.radius, steering.separation, Rgba::RED),
        (params.alignment.radius, steering.alignment, Rgba::GREEN),
        (params.cohesion.radius, steering.cohesion, Rgba::BLUE),
    ];

    for (radius, _, color) in rules {
        presenter.circle(center, radius, color, RADIUS_WEIGHT);
    }
    for (_, vector, color) in rules {
        presenter.line(center, center + vector * VECTOR_SCALE, color, VECTOR_WEIGHT);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Circle {
        center: Vec2,
        radius: f64,
        color: Rgba,
        weight: f64,
    },
    Line {
        start: Vec2,
        end: Vec2,
        color: Rgba,
        weight: f64,
    },
}

/// Presenter that records the commands of the current frame.
///
/// With a frame budget it requests quit once that many frames were presented.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    frames: u64,
    frame_budget: Option<u64>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_budget(frames: u64) -> Self {
        Self {
            frame_budget: Some(frames),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for DrawList {
    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn circle(&mut self, center: Vec2, radius: f64, color: Rgba, weight: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            weight,
        });
    }

    fn line(&mut self, start: Vec2, end: Vec2, color: Rgba, weight: f64) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            color,
            weight,
        });
    }

    fn present(&mut self) {
        self.frames += 1;
        log::trace!("frame {} presented {} draw commands", self.frames, self.commands.len());
    }

    fn quit_requested(&self) -> bool {
        self.frame_budget.is_some_and(|budget| self.frames >= budget)
    }
}
