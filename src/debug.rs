/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains frame metrics
 * and flock statistics to be displayed in the UI.
 */

use std::time::Duration;

use crate::flock::FlockStats;
use crate::Vec2;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub ticks_per_frame: usize,
    pub stats: FlockStats,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            ticks: 0,
            ticks_per_frame: 0,
            stats: FlockStats {
                mean_speed: 0.0,
                max_speed: 0.0,
                centroid: Vec2::zeros(),
            },
        }
    }
}
