//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in field space. Origin is the top-left corner, y grows downward.
pub type Point = DVec2;

/// Axis-aligned box containment: is `point` strictly within `half_extent`
/// of `center` on both axes?
pub fn within_box(center: Point, half_extent: f64, point: Point) -> bool {
    (center.x - point.x).abs() < half_extent && (center.y - point.y).abs() < half_extent
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks executed in the current session.
    pub tick: u64,
    /// Elapsed simulation time in seconds (sum of all tick deltas).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Sanitize a frame delta. Negative or non-finite deltas become zero.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
