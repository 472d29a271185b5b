/*
 * Flock Module
 *
 * This module owns the collection of boids and drives one simulation tick:
 * for every boid it scans the whole flock (O(n²)), turns the neighbours
 * into a steering acceleration and lets the boid integrate it.
 *
 * The population is fixed for the lifetime of a flock. Boid 0 is the
 * leader; its only distinction is how it is drawn.
 */

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::boid::{Boid, Rgba};
use crate::params::{SimulationParams, UpdateOrder};
use crate::physics::{compute_steering, Steering};
use crate::Vec2;

pub const LEADER_COLOR: Rgba = Rgba::MAGENTA;
pub const FLOCK_COLOR: Rgba = Rgba::WHITE;

pub struct Flock {
    boids: Vec<Boid>,
    // Steering each boid received on the last tick
    steering: Vec<Steering>,
}

/// Aggregate motion of the flock, for logging and the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub mean_speed: f64,
    pub max_speed: f64,
    pub centroid: Vec2,
}

impl Flock {
    /// Spawn `boids_num` boids from the configured seed.
    ///
    /// Positions are uniform inside the world shrunk by one boid size on
    /// every side. Each velocity component is uniform in
    /// `[-max_speed / 2, max_speed / 2)`.
    pub fn new(params: &SimulationParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let size = params.boid_size;

        let boids: Vec<Boid> = (0..params.boids_num)
            .map(|i| {
                let position = Vec2::new(
                    rng.gen::<f64>() * (params.world_width - size * 2.0) + size,
                    rng.gen::<f64>() * (params.world_height - size * 2.0) + size,
                );
                let velocity = Vec2::new(
                    (rng.gen::<f64>() - 0.5) * params.max_speed,
                    (rng.gen::<f64>() - 0.5) * params.max_speed,
                );
                let color = if i == 0 { LEADER_COLOR } else { FLOCK_COLOR };
                Boid::new(position, velocity, params.max_speed, size, color)
            })
            .collect();

        log::info!(
            "spawned {} boids in a {}x{} world (seed {})",
            boids.len(),
            params.world_width,
            params.world_height,
            params.seed
        );

        Self::from_boids(boids)
    }

    /// Build a flock from hand-placed boids.
    pub fn from_boids(boids: Vec<Boid>) -> Self {
        let steering = vec![Steering::default(); boids.len()];
        Self { boids, steering }
    }

    // Advance every boid by one tick
    pub fn update(&mut self, params: &SimulationParams) {
        match params.update_order {
            UpdateOrder::Snapshot => self.update_from_snapshot(params),
            UpdateOrder::Immediate => self.update_in_place(params),
        }
    }

    // Steer everyone from the previous tick's state, then move everyone
    fn update_from_snapshot(&mut self, params: &SimulationParams) {
        for i in 0..self.boids.len() {
            self.steering[i] = compute_steering(i, &self.boids, params);
        }

        let bounds = params.bounds();
        for (boid, steering) in self.boids.iter_mut().zip(&self.steering) {
            // Acceleration carries no memory across ticks
            boid.acceleration = steering.total();
            boid.update(params.delta_time, &bounds);
        }
    }

    // Steer and move one boid at a time; later boids see earlier moves
    fn update_in_place(&mut self, params: &SimulationParams) {
        let bounds = params.bounds();
        for i in 0..self.boids.len() {
            let steering = compute_steering(i, &self.boids, params);
            self.steering[i] = steering;

            let boid = &mut self.boids[i];
            boid.acceleration = steering.total();
            boid.update(params.delta_time, &bounds);
        }
    }

    // Push a new speed limit into every boid, clamping immediately
    pub fn set_max_speed(&mut self, max_speed: f64) {
        for boid in &mut self.boids {
            boid.max_speed = max_speed;
            boid.limit_speed();
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn leader(&self) -> Option<&Boid> {
        self.boids.first()
    }

    pub fn steering(&self, index: usize) -> Option<&Steering> {
        self.steering.get(index)
    }

    pub fn leader_steering(&self) -> Option<&Steering> {
        self.steering(0)
    }

    pub fn stats(&self) -> FlockStats {
        let n = self.boids.len().max(1) as f64;
        let (speed_sum, max_speed, position_sum) = self.boids.iter().fold(
            (0.0, 0.0_f64, Vec2::zeros()),
            |(sum, max, pos), boid| {
                let speed = boid.speed();
                (sum + speed, max.max(speed), pos + boid.position)
            },
        );

        FlockStats {
            mean_speed: speed_sum / n,
            max_speed,
            centroid: position_sum / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BehaviorParams;

    const EPS: f64 = 1e-9;

    fn still_boid(x: f64, y: f64) -> Boid {
        Boid::new(Vec2::new(x, y), Vec2::zeros(), 20.0, 8.0, FLOCK_COLOR)
    }

    #[test]
    fn same_seed_spawns_same_flock() {
        let params = SimulationParams::default();
        let a = Flock::new(&params);
        let b = Flock::new(&params);

        assert_eq!(a.len(), 50);
        for (x, y) in a.boids().iter().zip(b.boids()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.velocity, y.velocity);
        }
    }

    #[test]
    fn spawn_respects_margin_and_speed() {
        let params = SimulationParams {
            boids_num: 300,
            ..Default::default()
        };
        let flock = Flock::new(&params);

        for boid in flock.boids() {
            assert!(boid.position.x >= params.boid_size);
            assert!(boid.position.x < params.world_width - params.boid_size);
            assert!(boid.position.y >= params.boid_size);
            assert!(boid.position.y < params.world_height - params.boid_size);
            assert!(boid.velocity.x.abs() <= params.max_speed / 2.0);
            assert!(boid.velocity.y.abs() <= params.max_speed / 2.0);
            assert_eq!(boid.acceleration, Vec2::zeros());
        }
    }

    #[test]
    fn only_first_boid_is_leader() {
        let flock = Flock::new(&SimulationParams::default());
        assert_eq!(flock.leader().map(|b| b.color), Some(LEADER_COLOR));
        assert!(flock.boids()[1..].iter().all(|b| b.color == FLOCK_COLOR));
    }

    #[test]
    fn pair_separates_symmetrically() {
        let params = SimulationParams {
            separation: BehaviorParams::new(10.0, 1.0),
            alignment: BehaviorParams::new(1.0, 1.0),
            cohesion: BehaviorParams::new(1.0, 1.0),
            delta_time: 1.0,
            ..Default::default()
        };
        let mut flock = Flock::from_boids(vec![still_boid(500.0, 300.0), still_boid(505.0, 300.0)]);

        flock.update(&params);

        let steering = flock.leader_steering().unwrap();
        assert!((steering.separation - Vec2::new(-5.0, 0.0)).norm() < EPS);
        assert!((flock.boids()[0].acceleration - Vec2::new(-5.0, 0.0)).norm() < EPS);
        assert!((flock.boids()[1].acceleration - Vec2::new(5.0, 0.0)).norm() < EPS);
        assert!((flock.boids()[0].position - Vec2::new(495.0, 300.0)).norm() < EPS);
        assert!((flock.boids()[1].position - Vec2::new(510.0, 300.0)).norm() < EPS);
    }

    #[test]
    fn immediate_order_lets_later_boids_see_moves() {
        let params = SimulationParams {
            separation: BehaviorParams::new(10.0, 1.0),
            alignment: BehaviorParams::new(1.0, 1.0),
            cohesion: BehaviorParams::new(1.0, 1.0),
            delta_time: 1.0,
            update_order: UpdateOrder::Immediate,
            ..Default::default()
        };
        let mut flock = Flock::from_boids(vec![still_boid(500.0, 300.0), still_boid(505.0, 300.0)]);

        flock.update(&params);

        // Boid 0 moved to 495 first, so boid 1 is now 10 away and out of range
        assert!((flock.boids()[0].position - Vec2::new(495.0, 300.0)).norm() < EPS);
        assert_eq!(flock.boids()[1].acceleration, Vec2::zeros());
        assert_eq!(flock.boids()[1].position, Vec2::new(505.0, 300.0));
    }

    #[test]
    fn lone_boid_only_feels_the_wall() {
        let params = SimulationParams {
            delta_time: 1.0,
            ..Default::default()
        };
        let mut flock = Flock::from_boids(vec![still_boid(95.0, 360.0)]);

        flock.update(&params);

        assert_eq!(flock.leader_steering().unwrap().total(), Vec2::zeros());
        assert!((flock.boids()[0].acceleration - Vec2::new(0.5, 0.0)).norm() < EPS);
    }

    #[test]
    fn acceleration_is_recomputed_each_tick() {
        let params = SimulationParams::default();
        let mut flock = Flock::from_boids(vec![still_boid(500.0, 300.0)]);
        flock.boids[0].acceleration = Vec2::new(100.0, 100.0);

        flock.update(&params);

        assert_eq!(flock.boids()[0].acceleration, Vec2::zeros());
    }

    #[test]
    fn speeds_stay_bounded_over_many_ticks() {
        for update_order in [UpdateOrder::Snapshot, UpdateOrder::Immediate] {
            let params = SimulationParams {
                smooth: true,
                update_order,
                ..Default::default()
            };
            let mut flock = Flock::new(&params);
            for _ in 0..300 {
                flock.update(&params);
                for boid in flock.boids() {
                    assert!(boid.speed() <= params.max_speed + EPS);
                    assert!(boid.position.iter().all(|c| c.is_finite()));
                }
            }
        }
    }

    #[test]
    fn lowering_max_speed_clamps_at_once() {
        let mut flock = Flock::new(&SimulationParams::default());
        flock.set_max_speed(1.0);
        assert!(flock.boids().iter().all(|b| b.speed() <= 1.0 + EPS));
    }

    #[test]
    fn stats_summarise_motion() {
        let mut a = still_boid(0.0, 0.0);
        a.velocity = Vec2::new(3.0, 4.0);
        let b = still_boid(10.0, 20.0);
        let stats = Flock::from_boids(vec![a, b]).stats();

        assert!((stats.mean_speed - 2.5).abs() < EPS);
        assert!((stats.max_speed - 5.0).abs() < EPS);
        assert!((stats.centroid - Vec2::new(5.0, 10.0)).norm() < EPS);
    }
}
