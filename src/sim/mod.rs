//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One integration step per tick
//! - No rendering or platform dependencies (hosts plug in through `Ticker` and `Renderer`)

pub mod controller;
pub mod integrator;
pub mod mapper;
pub mod state;
pub mod trace;

pub use controller::{RunPhase, Renderer, SimConfig, SimulationController, TickOutput, Ticker};
pub use integrator::{accelerations, step};
pub use mapper::{Geometry, pendulum_geometry, phase_point, scale_phi, PHI_MAX, PHI_MIN};
pub use state::PendulumState;
pub use trace::PhaseTrace;
