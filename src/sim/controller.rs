//! Jump controller bound to a host body
//!
//! Owns the tuning, the jump state and the body binding for one controlled
//! body. The host calls [`JumpController::step`] exactly once per simulation
//! tick, then integrates the body itself.

use std::mem;

use glam::Vec2;

use super::body::Body;
use super::state::JumpState;
use super::tick::{TickInput, TickOutcome, tick};
use crate::error::{JumpError, Result};
use crate::tuning::JumpTuning;

/// Jump key samples for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpControls {
    /// Key went down since the previous tick
    pub pressed: bool,
    /// Key is currently down
    pub held: bool,
}

impl JumpControls {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Press on this tick (implies held)
    pub fn press() -> Self {
        Self {
            pressed: true,
            held: true,
        }
    }

    pub fn hold() -> Self {
        Self {
            pressed: false,
            held: true,
        }
    }
}

/// Carries a frame's jump press to the next simulation tick
///
/// Frames and ticks do not line up: a frame can run several ticks, or none
/// when the accumulator is still short of a full step. The press goes to the
/// first tick that runs after it and stays pending until one does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressLatch {
    pending: bool,
    held: bool,
}

impl PressLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's key sample
    pub fn sample(&mut self, controls: JumpControls) {
        self.pending |= controls.pressed;
        self.held = controls.held;
    }

    /// Controls for the next tick, clearing any pending press
    pub fn take(&mut self) -> JumpControls {
        let pressed = mem::take(&mut self.pending);
        JumpControls {
            pressed,
            held: self.held || pressed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct JumpController<B> {
    tuning: JumpTuning,
    state: JumpState,
    body: B,
    /// Simulation time of the last applied tick
    clock: f64,
}

impl<B: Body> JumpController<B> {
    /// Validate tuning and bind to a body
    ///
    /// `body` is whatever the host's lookup produced; `None` means the host
    /// had no physics binding to give and the controller refuses to start.
    pub fn initialize(tuning: JumpTuning, body: Option<B>) -> Result<Self> {
        tuning.validate()?;
        let body = body.ok_or(JumpError::MissingBody)?;

        log::info!(
            "Jump controller ready: impulse={}, coyote={}s, buffer={}s, apex={:.2}",
            tuning.jump_impulse,
            tuning.coyote_window,
            tuning.jump_buffer_window,
            tuning.apex_height()
        );

        let state = JumpState {
            is_grounded: body.is_grounded(),
            velocity: body.velocity(),
            ..JumpState::default()
        };

        Ok(Self {
            tuning,
            state,
            body,
            clock: 0.0,
        })
    }

    /// Release the body back to the host
    pub fn teardown(self) -> B {
        log::debug!(
            "Jump controller detached after {} jumps",
            self.state.jumps_fired
        );
        self.body
    }

    /// Run one tick: sample the body, evaluate, write velocity back
    ///
    /// A skipped tick leaves both the clock and the body untouched.
    pub fn step(&mut self, controls: JumpControls, dt: f32) -> TickOutcome {
        let now = self.clock + f64::from(dt);
        let input = TickInput {
            dt,
            now,
            grounded: self.body.is_grounded(),
            jump_pressed: controls.pressed,
            jump_held: controls.held,
            velocity: self.body.velocity(),
        };

        let outcome = tick(&mut self.state, &self.tuning, &input);
        if let TickOutcome::Applied(report) = &outcome {
            self.clock = now;
            self.body.set_velocity(report.velocity);
        }
        outcome
    }

    /// Fresh jump state for a respawned body, keeping the clock running
    pub fn reset(&mut self) {
        self.state = JumpState {
            is_grounded: self.body.is_grounded(),
            velocity: self.body.velocity(),
            last_tick_at: self.state.last_tick_at,
            ..JumpState::default()
        };
    }

    pub fn tuning(&self) -> &JumpTuning {
        &self.tuning
    }

    pub fn state(&self) -> &JumpState {
        &self.state
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }
}
