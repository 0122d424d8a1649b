//! Deterministic jump simulation
//!
//! All jump logic lives here. This module must be pure and deterministic:
//! - Explicit delta time only, no wall clock
//! - No shared state between controllers
//! - No rendering, input-device or platform dependencies

pub mod body;
pub mod controller;
pub mod state;
pub mod tick;

pub use body::{Body, Platform, PlatformBody};
pub use controller::{JumpControls, JumpController, PressLatch};
pub use state::{JumpEvent, JumpState};
pub use tick::{SkipReason, TickInput, TickOutcome, TickReport, shaped_gravity, tick};
