//! Platform abstraction layer
//!
//! Host adapters plugged into the simulation controller:
//! - Tick sources (`setInterval` on web, a manually pumped ticker natively)
//! - Drawing (2D canvas on web, log output natively)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{LogRenderer, ManualTicker};
