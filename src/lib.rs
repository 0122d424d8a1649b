//! Coyote Jump - variable-height platformer jump controller
//!
//! Core modules:
//! - `sim`: Deterministic per-tick jump logic (state, tick, body binding, controller)
//! - `tuning`: Data-driven jump feel
//! - `stepper`: Fixed timestep accumulator for variable frame rates
//! - `session`: Pause, score and lives for one play session

pub mod error;
pub mod session;
pub mod sim;
pub mod stepper;
pub mod tuning;

pub use error::JumpError;
pub use session::{GameSession, SessionPhase};
pub use sim::{Body, JumpControls, JumpController, JumpEvent, JumpState, PressLatch, TickOutcome};
pub use stepper::FixedStepper;
pub use tuning::{JumpPreset, JumpTuning};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
