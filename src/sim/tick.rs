//! Per-tick jump evaluation
//!
//! Advances one body's jump state by a single simulation step. The step is a
//! pure function of the previous state, the tuning and the sampled inputs:
//! 1. grounding transition
//! 2. jump buffer update
//! 3. eligibility (ground or coyote grace)
//! 4. fire
//! 5. gravity shaping (fast fall, short hop)

use glam::Vec2;
use thiserror::Error;

use super::state::{JumpEvent, JumpState};
use crate::tuning::JumpTuning;

/// Inputs sampled by the host for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Simulation time of this tick (seconds)
    pub now: f64,
    /// Fresh ground-contact sample
    pub grounded: bool,
    /// Jump key went down this tick (edge)
    pub jump_pressed: bool,
    /// Jump key is down (level)
    pub jump_held: bool,
    /// Body velocity before this tick's adjustment
    pub velocity: Vec2,
}

/// Why a tick was skipped without touching state
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SkipReason {
    #[error("non-positive delta time {0}")]
    NonPositiveDelta(f32),
    #[error("non-finite tick input (dt={dt}, now={now}, velocity={velocity})")]
    NonFinite { dt: f32, now: f64, velocity: Vec2 },
    #[error("clock went backwards from {last} to {now}")]
    ClockRewound { last: f64, now: f64 },
}

/// Result of an applied tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Velocity the host should apply to the body
    pub velocity: Vec2,
    /// Events raised this tick, in order
    pub events: Vec<JumpEvent>,
}

impl TickReport {
    pub fn fired(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, JumpEvent::Fired { .. }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Applied(TickReport),
    Skipped(SkipReason),
}

impl TickOutcome {
    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickOutcome::Applied(report) => Some(report),
            TickOutcome::Skipped(_) => None,
        }
    }

    pub fn fired(&self) -> bool {
        self.report().is_some_and(TickReport::fired)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TickOutcome::Skipped(_))
    }
}

fn check_input(state: &JumpState, input: &TickInput) -> Result<(), SkipReason> {
    if !input.dt.is_finite() || !input.now.is_finite() || !input.velocity.is_finite() {
        return Err(SkipReason::NonFinite {
            dt: input.dt,
            now: input.now,
            velocity: input.velocity,
        });
    }
    if input.dt <= 0.0 {
        return Err(SkipReason::NonPositiveDelta(input.dt));
    }
    if let Some(last) = state.last_tick_at {
        if input.now < last {
            return Err(SkipReason::ClockRewound {
                last,
                now: input.now,
            });
        }
    }
    Ok(())
}

fn coyote_eligible(state: &JumpState, tuning: &JumpTuning, now: f64) -> bool {
    if tuning.consume_coyote_on_jump && state.coyote_spent {
        return false;
    }
    state
        .left_ground_at
        .is_some_and(|t| now - t <= f64::from(tuning.coyote_window))
}

/// Extra vertical acceleration on top of ambient gravity
///
/// Falling pulls harder by `fall_gravity_multiplier`; rising with the key
/// released pulls harder by `low_jump_gravity_multiplier`. Resting or rising
/// while held gets nothing extra.
pub fn shaped_gravity(tuning: &JumpTuning, velocity_y: f32, jump_held: bool) -> f32 {
    if velocity_y < 0.0 {
        tuning.gravity_y * (tuning.fall_gravity_multiplier - 1.0)
    } else if velocity_y > 0.0 && !jump_held {
        tuning.gravity_y * (tuning.low_jump_gravity_multiplier - 1.0)
    } else {
        0.0
    }
}

/// Advance jump state by one tick
pub fn tick(state: &mut JumpState, tuning: &JumpTuning, input: &TickInput) -> TickOutcome {
    if let Err(reason) = check_input(state, input) {
        log::warn!("Jump tick skipped: {}", reason);
        return TickOutcome::Skipped(reason);
    }

    let now = input.now;
    let mut events = Vec::new();

    // Grounding transition
    if state.is_grounded && !input.grounded {
        state.left_ground_at = Some(now);
        events.push(JumpEvent::LeftGround { at: now });
    } else if !state.is_grounded && input.grounded {
        state.coyote_spent = false;
        events.push(JumpEvent::Landed { at: now });
    }
    state.is_grounded = input.grounded;

    // Buffer update
    if input.jump_pressed {
        state.jump_buffer_remaining = tuning.jump_buffer_window;
    } else {
        state.jump_buffer_remaining = (state.jump_buffer_remaining - input.dt).max(0.0);
    }

    let mut velocity = input.velocity;

    if state.jump_buffer_remaining > 0.0
        && (input.grounded || coyote_eligible(state, tuning, now))
    {
        velocity.y = 0.0;
        velocity.y += tuning.jump_impulse;
        state.jump_buffer_remaining = 0.0;
        state.jumps_fired += 1;
        if tuning.consume_coyote_on_jump {
            state.coyote_spent = true;
        }
        events.push(JumpEvent::Fired {
            at: now,
            from_coyote: !input.grounded,
            velocity_y: velocity.y,
        });
        log::debug!(
            "Jump fired at {:.3}s (grounded={}, jumps={})",
            now,
            input.grounded,
            state.jumps_fired
        );
    }

    velocity.y += shaped_gravity(tuning, velocity.y, input.jump_held) * input.dt;

    state.velocity = velocity;
    state.last_tick_at = Some(now);

    TickOutcome::Applied(TickReport { velocity, events })
}
