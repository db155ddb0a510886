//! Pendulum state
//!
//! The single mutable physical record. Owned by the controller and passed by
//! reference into the integrator and the coordinate mapper.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::degrees_to_radians;
use crate::params::Params;

/// Angular state plus the physical parameters of a double pendulum
///
/// Angles are measured from the downward vertical and are never wrapped:
/// they accumulate without bound over a long run. Masses must be positive
/// (the dynamics divide by `mass2` and by `mass1 / mass2`); this type does
/// not check that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Upper rod angle (radians)
    pub phi1: f64,
    /// Lower rod angle (radians)
    pub phi2: f64,
    /// Upper rod angular velocity (rad/s)
    pub omega1: f64,
    /// Lower rod angular velocity (rad/s)
    pub omega2: f64,
    /// Upper bob mass, also its drawn radius
    pub mass1: f64,
    /// Lower bob mass, also its drawn radius
    pub mass2: f64,
    length1: f64,
    length2: f64,
    gravity: f64,
}

impl PendulumState {
    /// A pendulum at rest at the given angles (radians)
    pub fn new(phi1: f64, phi2: f64, mass1: f64, mass2: f64) -> Self {
        Self {
            phi1,
            phi2,
            omega1: 0.0,
            omega2: 0.0,
            mass1,
            mass2,
            length1: LENGTH1,
            length2: LENGTH2,
            gravity: GRAVITY,
        }
    }

    /// A pendulum at rest built from user parameters (angles in degrees)
    pub fn from_params(params: &Params) -> Self {
        let mut state = Self::default();
        state.reset(params);
        state
    }

    /// Stop both rods and adopt new masses and angles
    pub fn reset(&mut self, params: &Params) {
        self.omega1 = 0.0;
        self.omega2 = 0.0;
        self.mass1 = params.mass1.get() as f64;
        self.mass2 = params.mass2.get() as f64;
        self.phi1 = degrees_to_radians(params.phi1_deg as f64);
        self.phi2 = degrees_to_radians(params.phi2_deg as f64);
    }

    #[inline]
    pub fn length1(&self) -> f64 {
        self.length1
    }

    #[inline]
    pub fn length2(&self) -> f64 {
        self.length2
    }

    #[inline]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// True when both rods are motionless
    pub fn is_at_rest(&self) -> bool {
        self.omega1 == 0.0 && self.omega2 == 0.0
    }
}

impl Default for PendulumState {
    fn default() -> Self {
        Self::new(
            degrees_to_radians(DEFAULT_PHI1_DEG as f64),
            degrees_to_radians(DEFAULT_PHI2_DEG as f64),
            DEFAULT_MASS1 as f64,
            DEFAULT_MASS2 as f64,
        )
    }
}
