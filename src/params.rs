//! User parameters and form input parsing
//!
//! The simulation core trusts its inputs; this is where raw form text is
//! turned into validated parameters before it reaches the controller.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::degrees_to_radians;
use crate::sim::PendulumState;

/// Rejected form input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{field}: {raw:?} is not a number")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field}: mass must be positive, got {value}")]
    NonPositiveMass { field: &'static str, value: i64 },

    #[error("{field}: {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("unknown parameter field: {0}")]
    UnknownField(String),
}

/// Parameters a user submits to start a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub mass1: NonZeroU32,
    pub mass2: NonZeroU32,
    /// Initial upper angle (degrees)
    pub phi1_deg: i32,
    /// Initial lower angle (degrees)
    pub phi2_deg: i32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mass1: NonZeroU32::new(DEFAULT_MASS1).unwrap_or(NonZeroU32::MIN),
            mass2: NonZeroU32::new(DEFAULT_MASS2).unwrap_or(NonZeroU32::MIN),
            phi1_deg: DEFAULT_PHI1_DEG,
            phi2_deg: DEFAULT_PHI2_DEG,
        }
    }
}

impl Params {
    /// Parse the four form fields
    pub fn parse(mass1: &str, mass2: &str, phi1: &str, phi2: &str) -> Result<Self, ParamError> {
        Ok(Self {
            mass1: parse_mass("mass1", mass1)?,
            mass2: parse_mass("mass2", mass2)?,
            phi1_deg: parse_angle("phi1", phi1)?,
            phi2_deg: parse_angle("phi2", phi2)?,
        })
    }
}

/// One slider edit made while no run is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEdit {
    Mass1(NonZeroU32),
    Mass2(NonZeroU32),
    /// Degrees
    Phi1(i32),
    /// Degrees
    Phi2(i32),
}

impl ParamEdit {
    /// Field names match the form's input ids
    pub const FIELDS: [&'static str; 4] = ["mass1", "mass2", "phi1", "phi2"];

    /// Parse a slider value for the named field
    pub fn parse(field: &str, raw: &str) -> Result<Self, ParamError> {
        match field {
            "mass1" => parse_mass("mass1", raw).map(ParamEdit::Mass1),
            "mass2" => parse_mass("mass2", raw).map(ParamEdit::Mass2),
            "phi1" => parse_angle("phi1", raw).map(ParamEdit::Phi1),
            "phi2" => parse_angle("phi2", raw).map(ParamEdit::Phi2),
            other => Err(ParamError::UnknownField(other.to_string())),
        }
    }

    /// Write the edit into the state. Velocities are left untouched.
    pub fn apply(&self, state: &mut PendulumState) {
        match *self {
            ParamEdit::Mass1(m) => state.mass1 = m.get() as f64,
            ParamEdit::Mass2(m) => state.mass2 = m.get() as f64,
            ParamEdit::Phi1(deg) => state.phi1 = degrees_to_radians(deg as f64),
            ParamEdit::Phi2(deg) => state.phi2 = degrees_to_radians(deg as f64),
        }
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits.
/// Anything after the digits ("12.7", "30deg") is ignored.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, ParamError> {
    parse_leading_int(raw).ok_or_else(|| ParamError::NotANumber {
        field,
        raw: raw.to_string(),
    })
}

fn parse_mass(field: &'static str, raw: &str) -> Result<NonZeroU32, ParamError> {
    let value = parse_int(field, raw)?;
    if value <= 0 {
        return Err(ParamError::NonPositiveMass { field, value });
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(ParamError::OutOfRange { field, value })
}

fn parse_angle(field: &'static str, raw: &str) -> Result<i32, ParamError> {
    let value = parse_int(field, raw)?;
    i32::try_from(value).map_err(|_| ParamError::OutOfRange { field, value })
}
