/*
 * Physics Module
 *
 * This module computes the flocking steering for a single boid:
 * separation, alignment and cohesion.
 *
 * All three rules are gathered in one O(n) pass over the flock, so each
 * pair distance is computed once and checked against the three radii.
 * A neighbour counts for a rule only when it is strictly closer than that
 * rule's radius. Contributions are averaged per rule and then weighted.
 */

use crate::boid::Boid;
use crate::params::{BehaviorParams, SimulationParams};
use crate::Vec2;

/// The three weighted rule vectors of one boid for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            separation: Vec2::zeros(),
            alignment: Vec2::zeros(),
            cohesion: Vec2::zeros(),
        }
    }
}

impl Steering {
    // Acceleration produced by the flocking rules
    pub fn total(&self) -> Vec2 {
        self.separation + self.alignment + self.cohesion
    }
}

/// Weight of a neighbour at `dist` for a rule with the given radius.
///
/// `None` means the neighbour is out of range. With smoothing the weight
/// falls linearly from 1 at the boid to 0 at the radius, otherwise every
/// neighbour in range counts fully.
pub fn influence(dist: f64, radius: f64, smooth: bool) -> Option<f64> {
    if dist >= radius {
        return None;
    }
    if smooth {
        Some(1.0 - dist / radius)
    } else {
        Some(1.0)
    }
}

// Running sum of one rule's contributions
struct Accumulator {
    sum: Vec2,
    count: usize,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            sum: Vec2::zeros(),
            count: 0,
        }
    }

    // Add a contribution if the neighbour is inside the rule's radius
    fn offer(&mut self, dist: f64, behavior: &BehaviorParams, smooth: bool, contribution: Vec2) {
        if let Some(weight) = influence(dist, behavior.radius, smooth) {
            self.sum += contribution * weight;
            self.count += 1;
        }
    }

    fn weighted_mean(&self, scalar: f64) -> Vec2 {
        if self.count == 0 {
            return Vec2::zeros();
        }
        self.sum / self.count as f64 * scalar
    }
}

/// Steering of `boids[index]` against every other boid in the slice.
pub fn compute_steering(index: usize, boids: &[Boid], params: &SimulationParams) -> Steering {
    let boid = &boids[index];

    let mut separation = Accumulator::new();
    let mut alignment = Accumulator::new();
    let mut cohesion = Accumulator::new();

    for (j, other) in boids.iter().enumerate() {
        if j == index {
            continue;
        }

        let dist = boid.distance_to(other);
        let offset = boid.position - other.position;

        separation.offer(dist, &params.separation, params.smooth, offset);
        alignment.offer(dist, &params.alignment, params.smooth, other.velocity);
        cohesion.offer(dist, &params.cohesion, params.smooth, -offset);
    }

    Steering {
        separation: separation.weighted_mean(params.separation.scalar),
        alignment: alignment.weighted_mean(params.alignment.scalar),
        cohesion: cohesion.weighted_mean(params.cohesion.scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Rgba;

    const EPS: f64 = 1e-12;

    fn boid(x: f64, y: f64, vx: f64, vy: f64) -> Boid {
        Boid::new(Vec2::new(x, y), Vec2::new(vx, vy), 20.0, 8.0, Rgba::WHITE)
    }

    fn unit_params(separation: f64, alignment: f64, cohesion: f64) -> SimulationParams {
        SimulationParams {
            separation: BehaviorParams::new(separation, 1.0),
            alignment: BehaviorParams::new(alignment, 1.0),
            cohesion: BehaviorParams::new(cohesion, 1.0),
            ..Default::default()
        }
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        assert_eq!(influence(10.0, 10.0, false), None);
        assert_eq!(influence(10.0 - 1e-9, 10.0, false), Some(1.0));
        assert_eq!(influence(12.0, 10.0, true), None);
    }

    #[test]
    fn smoothing_fades_to_zero_at_radius() {
        let near_edge = influence(10.0 - 1e-9, 10.0, true).unwrap();
        assert!(near_edge < 1e-9);
        assert_eq!(influence(0.0, 10.0, true), Some(1.0));
        assert_eq!(influence(2.5, 10.0, true), Some(0.75));
    }

    #[test]
    fn single_neighbour_separation_is_raw_offset() {
        let boids = vec![boid(100.0, 100.0, 0.0, 0.0), boid(103.0, 104.0, 0.0, 0.0)];
        let params = unit_params(10.0, 1.0, 1.0);

        let first = compute_steering(0, &boids, &params);
        let second = compute_steering(1, &boids, &params);

        assert!((first.separation - Vec2::new(-3.0, -4.0)).norm() < EPS);
        assert!((second.separation - Vec2::new(3.0, 4.0)).norm() < EPS);
        assert_eq!(first.alignment, Vec2::zeros());
        assert_eq!(first.cohesion, Vec2::zeros());
    }

    #[test]
    fn neighbour_on_radius_is_ignored() {
        let boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(3.0, 4.0, 1.0, 1.0)];
        let params = unit_params(5.0, 5.0, 5.0);
        assert_eq!(compute_steering(0, &boids, &params), Steering::default());

        let params = unit_params(5.0 + 1e-9, 5.0 + 1e-9, 5.0 + 1e-9);
        let steering = compute_steering(0, &boids, &params);
        assert!((steering.alignment - Vec2::new(1.0, 1.0)).norm() < EPS);
        assert!((steering.cohesion - Vec2::new(3.0, 4.0)).norm() < EPS);
    }

    #[test]
    fn lone_boid_has_no_steering() {
        let boids = vec![boid(500.0, 300.0, 5.0, 5.0)];
        let steering = compute_steering(0, &boids, &SimulationParams::default());
        assert_eq!(steering.total(), Vec2::zeros());
    }

    #[test]
    fn contributions_are_averaged_then_weighted() {
        let boids = vec![
            boid(0.0, 0.0, 0.0, 0.0),
            boid(10.0, 0.0, 2.0, 0.0),
            boid(0.0, 20.0, 0.0, 4.0),
        ];
        let mut params = unit_params(1.0, 50.0, 50.0);
        params.alignment.scalar = 0.5;
        params.cohesion.scalar = 0.1;

        let steering = compute_steering(0, &boids, &params);
        assert_eq!(steering.separation, Vec2::zeros());
        assert!((steering.alignment - Vec2::new(0.5, 1.0)).norm() < EPS);
        assert!((steering.cohesion - Vec2::new(0.5, 1.0)).norm() < EPS);
        assert!((steering.total() - Vec2::new(1.0, 2.0)).norm() < EPS);
    }

    #[test]
    fn smoothing_scales_each_contribution() {
        let boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(5.0, 0.0, 4.0, 0.0)];
        let mut params = unit_params(10.0, 10.0, 10.0);
        params.smooth = true;

        let steering = compute_steering(0, &boids, &params);
        assert!((steering.separation - Vec2::new(-2.5, 0.0)).norm() < EPS);
        assert!((steering.alignment - Vec2::new(2.0, 0.0)).norm() < EPS);
        assert!((steering.cohesion - Vec2::new(2.5, 0.0)).norm() < EPS);
    }

    #[test]
    fn rules_use_independent_radii() {
        let boids = vec![boid(0.0, 0.0, 0.0, 0.0), boid(30.0, 0.0, 0.0, 6.0)];
        let params = unit_params(22.0, 70.0, 110.0);

        let steering = compute_steering(0, &boids, &params);
        assert_eq!(steering.separation, Vec2::zeros());
        assert!((steering.alignment - Vec2::new(0.0, 6.0)).norm() < EPS);
        assert!((steering.cohesion - Vec2::new(30.0, 0.0)).norm() < EPS);
    }
}
