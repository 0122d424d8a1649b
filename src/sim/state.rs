//! Jump state and events
//!
//! Everything a controller remembers between ticks lives here, so a host can
//! snapshot and restore it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete events raised during a tick, for host-side animation and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpEvent {
    /// Ground contact lost (falling edge)
    LeftGround { at: f64 },
    /// Ground contact regained (rising edge)
    Landed { at: f64 },
    /// A jump impulse was applied
    Fired {
        at: f64,
        /// Fired from coyote grace rather than solid ground
        from_coyote: bool,
        /// Vertical velocity right after the impulse
        velocity_y: f32,
    },
}

/// Per-body jump state (owned by exactly one controller)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JumpState {
    /// Ground sample from the last applied tick
    pub is_grounded: bool,
    /// Time of the last grounded -> airborne transition
    pub left_ground_at: Option<f64>,
    /// Seconds left on the buffered jump request, never negative
    pub jump_buffer_remaining: f32,
    /// Body velocity after the last applied tick
    pub velocity: Vec2,
    /// Time of the last applied tick
    pub last_tick_at: Option<f64>,
    /// Coyote grace already used by a jump since the last landing
    #[serde(default)]
    pub coyote_spent: bool,
    /// Jumps fired over the state's lifetime
    #[serde(default)]
    pub jumps_fired: u32,
}

impl JumpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since ground was last lost, if it ever was
    pub fn airborne_for(&self, now: f64) -> Option<f64> {
        if self.is_grounded {
            return None;
        }
        self.left_ground_at.map(|t| now - t)
    }

    /// A buffered request is waiting for ground
    pub fn has_buffered_jump(&self) -> bool {
        self.jump_buffer_remaining > 0.0
    }
}
