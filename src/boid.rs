/*
 * Boid Module
 *
 * This module defines the Boid struct and its integration step.
 * A boid owns its kinematic state (position, velocity, acceleration)
 * and a couple of rendering-only attributes (size, color).
 *
 * Each tick the flock writes the steering acceleration into the boid,
 * then calls `update`, which:
 * 1. Adds a soft-wall push when the boid is inside the border margin
 * 2. Integrates velocity and clamps it to the maximum speed
 * 3. Integrates position
 */

use crate::Vec2;

// Plain 8-bit RGBA color, converted by whichever presenter draws it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
    pub const MAGENTA: Rgba = Rgba::rgb(0xFF, 0x00, 0xFF);
    pub const RED: Rgba = Rgba::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Rgba = Rgba::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Rgba = Rgba::rgb(0x00, 0x00, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// Rectangular world the boids live in, with a soft wall along each edge.
///
/// `border` is the width of the wall zone and `out_decay` divides the
/// push-back, so a larger value gives a gentler wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub border: f64,
    pub out_decay: f64,
}

#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f64,
    pub size: f64,
    pub color: Rgba,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2, max_speed: f64, size: f64, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::zeros(),
            max_speed,
            size,
            color,
        }
    }

    // Advance the boid by one time step
    pub fn update(&mut self, delta_time: f64, bounds: &Bounds) {
        // The wall push is added on top of the steering already set by the flock
        self.acceleration += self.containment(bounds);

        // Update velocity
        self.velocity += self.acceleration * delta_time;

        // Limit speed
        self.limit_speed();

        // Update position
        self.position += self.velocity * delta_time;
    }

    /// Soft-wall acceleration for the current position.
    ///
    /// Each axis is checked on its own. Inside the near margin the push is
    /// `(border - p) / out_decay`, inside the far margin it mirrors that
    /// with the opposite sign. Outside both margins the axis contributes zero.
    pub fn containment(&self, bounds: &Bounds) -> Vec2 {
        Vec2::new(
            wall_push(self.position.x, bounds.width, bounds),
            wall_push(self.position.y, bounds.height, bounds),
        )
    }

    // Rescale velocity to max_speed if it is faster, keeping its direction
    pub fn limit_speed(&mut self) {
        let speed = self.velocity.norm();
        if speed > self.max_speed {
            self.velocity *= self.max_speed / speed;
        }
    }

    pub fn distance_to(&self, other: &Boid) -> f64 {
        (self.position - other.position).norm()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

fn wall_push(coordinate: f64, extent: f64, bounds: &Bounds) -> f64 {
    if coordinate < bounds.border {
        (bounds.border - coordinate) / bounds.out_decay
    } else if coordinate > extent - bounds.border {
        (extent - bounds.border - coordinate) / bounds.out_decay
    } else {
        0.0
    }
}
