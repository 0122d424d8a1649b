//! Host physics binding
//!
//! The controller never integrates motion itself. It reads velocity and a
//! ground sample from a [`Body`] and writes velocity back. [`PlatformBody`]
//! is a small reference host: axis-aligned platforms, semi-implicit Euler and
//! a short downward ground check below the feet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physics binding a host provides for one controlled body
pub trait Body {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Fresh ground-contact sample
    fn is_grounded(&self) -> bool;
}

/// A one-way horizontal platform (solid from above only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub min_x: f32,
    pub max_x: f32,
    /// Walkable surface height
    pub top: f32,
}

impl Platform {
    pub fn new(min_x: f32, max_x: f32, top: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            top,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Horizontal overlap with a body of the given half width
    #[inline]
    pub fn overlaps(&self, x: f32, half_width: f32) -> bool {
        x + half_width > self.min_x && x - half_width < self.max_x
    }
}

/// Reference body: `pos` is the bottom-center of the feet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_width: f32,
    /// Ambient gravity (negative = down)
    pub gravity_y: f32,
    /// How far below the feet ground still counts as contact
    pub ground_tolerance: f32,
    pub platforms: Vec<Platform>,
}

impl PlatformBody {
    pub fn new(pos: Vec2, gravity_y: f32, platforms: Vec<Platform>) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_width: 0.4,
            gravity_y,
            ground_tolerance: 0.05,
            platforms,
        }
    }

    /// Index of the highest platform directly under the feet within tolerance
    pub fn support_index(&self) -> Option<usize> {
        self.platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.overlaps(self.pos.x, self.half_width))
            .filter(|(_, p)| {
                let gap = self.pos.y - p.top;
                (0.0..=self.ground_tolerance).contains(&gap)
            })
            .max_by(|(_, a), (_, b)| a.top.total_cmp(&b.top))
            .map(|(i, _)| i)
    }

    pub fn support(&self) -> Option<&Platform> {
        self.support_index().map(|i| &self.platforms[i])
    }

    /// Advance one step under gravity and resolve landings
    ///
    /// Returns the index of the platform the body rests on afterwards.
    pub fn integrate(&mut self, dt: f32) -> Option<usize> {
        if dt <= 0.0 {
            return None;
        }

        self.vel.y += self.gravity_y * dt;
        let prev = self.pos;
        self.pos += self.vel * dt;

        if self.vel.y > 0.0 {
            return None;
        }

        // Land on the highest top crossed from above this step
        let landing = self
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.overlaps(self.pos.x, self.half_width))
            .filter(|(_, p)| prev.y >= p.top && self.pos.y <= p.top)
            .max_by(|(_, a), (_, b)| a.top.total_cmp(&b.top))
            .map(|(i, p)| (i, p.top));

        let (index, top) = landing?;
        self.pos.y = top;
        self.vel.y = 0.0;
        Some(index)
    }

    /// Move to a new spot at rest (respawn)
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

impl Body for PlatformBody {
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.vel = velocity;
    }

    fn is_grounded(&self) -> bool {
        self.support().is_some()
    }
}
