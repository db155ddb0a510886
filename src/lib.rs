//! Double Pendulum - a chaotic pendulum simulator with a phase-space plot
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, integrator, coordinate mapping, run control)
//! - `params`: User parameters and form input parsing
//! - `settings`: Persisted preferences
//! - `platform`: Browser/native host adapters (timers, drawing)

pub mod params;
pub mod platform;
pub mod settings;
pub mod sim;

pub use params::{ParamEdit, ParamError, Params};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Gravitational acceleration
    pub const GRAVITY: f64 = 9.8;
    /// Fixed integration step (simulation seconds)
    pub const SIM_DT: f64 = 0.05;
    /// Wall-clock interval between ticks (ms), decoupled from SIM_DT
    pub const TICK_INTERVAL_MS: u32 = 5;

    /// Pendulum anchor on the drawing surface (pixels)
    pub const ANCHOR_X: f64 = 350.0;
    pub const ANCHOR_Y: f64 = 60.0;

    /// Rod lengths (pixels), fixed for the process lifetime
    pub const LENGTH1: f64 = 150.0;
    pub const LENGTH2: f64 = 150.0;

    /// Phase plot spans [-0.8π, 0.8π] on both axes
    pub const PHASE_SCALE: f64 = 0.8;

    /// Start-up parameters
    pub const DEFAULT_MASS1: u32 = 10;
    pub const DEFAULT_MASS2: u32 = 10;
    pub const DEFAULT_PHI1_DEG: i32 = 50;
    pub const DEFAULT_PHI2_DEG: i32 = 65;

    /// Phase plot surface when no canvas dictates one
    pub const PLOT_WIDTH: f64 = 500.0;
    pub const PLOT_HEIGHT: f64 = 500.0;
}

/// Convert degrees to radians (`deg · π / 180`)
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
