//! Semi-implicit Euler integration of the double pendulum
//!
//! Accelerations come from the classical Lagrangian equations of motion.
//! Velocities are advanced first, then angles are advanced with the *new*
//! velocities. First-order accurate; energy drifts over long runs and is not
//! corrected.

use super::state::PendulumState;

/// Angular accelerations `(a1, a2)` at the given state
///
/// With `mu = 1 + m1/m2` and `delta = phi1 - phi2`, the shared denominator
/// `mu - cos²(delta)` is bounded below by `m1/m2`, so the result is finite
/// whenever both masses are positive. Non-positive masses yield NaN/Inf.
pub fn accelerations(state: &PendulumState) -> (f64, f64) {
    let g = state.gravity();
    let l1 = state.length1();
    let l2 = state.length2();
    let (w1, w2) = (state.omega1, state.omega2);

    let mu = 1.0 + state.mass1 / state.mass2;
    let delta = state.phi1 - state.phi2;
    let (sin_d, cos_d) = delta.sin_cos();
    let (sin1, sin2) = (state.phi1.sin(), state.phi2.sin());
    let denom = mu - cos_d * cos_d;

    let a1 = (g * (sin2 * cos_d - mu * sin1) - (l2 * w2 * w2 + l1 * w1 * w1 * cos_d) * sin_d)
        / (l1 * denom);
    let a2 = (mu * g * (sin1 * cos_d - sin2) + (mu * l1 * w1 * w1 + l2 * w2 * w2 * cos_d) * sin_d)
        / (l2 * denom);

    (a1, a2)
}

/// Advance the pendulum by one fixed step, returning the next state
pub fn step(state: &PendulumState, dt: f64) -> PendulumState {
    let (a1, a2) = accelerations(state);

    let mut next = *state;
    next.omega1 += a1 * dt;
    next.omega2 += a2 * dt;
    next.phi1 += next.omega1 * dt;
    next.phi2 += next.omega2 * dt;
    next
}
