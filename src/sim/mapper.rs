//! Coordinate mapping from angular state to drawable space
//!
//! Two independent pure mappings:
//! - pendulum geometry in surface pixels (y grows downward, so a hanging rod has positive y)
//! - phase-plot coordinates, a linear, unclamped map of [PHI_MIN, PHI_MAX]

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::state::PendulumState;
use crate::consts::PHASE_SCALE;

/// Lower bound of the visible phase-plot range
pub const PHI_MIN: f64 = -PI * PHASE_SCALE;
/// Upper bound of the visible phase-plot range
pub const PHI_MAX: f64 = PI * PHASE_SCALE;

/// Derived pendulum geometry for one frame (never persisted)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub anchor: DVec2,
    pub bob1: DVec2,
    pub bob2: DVec2,
    /// Drawn radius of bob 1 (equal to its mass)
    pub radius1: f64,
    /// Drawn radius of bob 2 (equal to its mass)
    pub radius2: f64,
}

impl Geometry {
    /// Rod segments: anchor→bob1 and bob1→bob2
    pub fn segments(&self) -> [(DVec2, DVec2); 2] {
        [(self.anchor, self.bob1), (self.bob1, self.bob2)]
    }
}

/// Offset of a rod end from its pivot
#[inline]
fn rod(length: f64, phi: f64) -> DVec2 {
    let (sin, cos) = phi.sin_cos();
    DVec2::new(length * sin, length * cos)
}

/// Map the state to rods and bobs hanging from `anchor`
pub fn pendulum_geometry(state: &PendulumState, anchor: DVec2) -> Geometry {
    let bob1 = anchor + rod(state.length1(), state.phi1);
    let bob2 = bob1 + rod(state.length2(), state.phi2);
    Geometry {
        anchor,
        bob1,
        bob2,
        radius1: state.mass1,
        radius2: state.mass2,
    }
}

/// Scale an angle onto an axis of the given length
///
/// `PHI_MIN` maps to 0 and `PHI_MAX` to `axis_length`. Angles outside that
/// range land outside the axis; nothing is clipped or wrapped.
#[inline]
pub fn scale_phi(phi: f64, axis_length: f64) -> f64 {
    axis_length * ((phi - PHI_MIN) / (PHI_MAX * 2.0))
}

/// Phase-plot position of the state: phi1 on x, phi2 on y
pub fn phase_point(state: &PendulumState, plot_size: DVec2) -> DVec2 {
    DVec2::new(
        scale_phi(state.phi1, plot_size.x),
        scale_phi(state.phi2, plot_size.y),
    )
}
