//! Session state: pause, score and lives
//!
//! Explicitly constructed and passed by reference to whatever needs it. The
//! host owns it; there is no global instance.

use serde::{Deserialize, Serialize};

/// Default lives for a new session
pub const DEFAULT_LIVES: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub lives: u8,
    pub phase: SessionPhase,
    /// Jumps fired across all respawns
    pub jumps: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_LIVES)
    }
}

impl GameSession {
    pub fn new(lives: u8) -> Self {
        log::info!("Session started with {} lives", lives);
        Self {
            score: 0,
            lives,
            phase: if lives == 0 {
                SessionPhase::GameOver
            } else {
                SessionPhase::Playing
            },
            jumps: 0,
        }
    }

    pub fn add_score(&mut self, points: u64) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    pub fn record_jump(&mut self) {
        self.jumps = self.jumps.saturating_add(1);
    }

    /// Lose a life; returns true if that ended the session
    pub fn lose_life(&mut self) -> bool {
        if self.phase == SessionPhase::GameOver {
            return true;
        }
        self.lives = self.lives.saturating_sub(1);
        log::info!("Life lost, {} remaining", self.lives);
        if self.lives == 0 {
            self.phase = SessionPhase::GameOver;
            log::info!("Game over with score {}", self.score);
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.phase = SessionPhase::Paused;
        log::info!("Session paused");
    }

    pub fn resume(&mut self) {
        if self.phase != SessionPhase::Paused {
            return;
        }
        self.phase = SessionPhase::Playing;
        log::info!("Session resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Playing => self.pause(),
            SessionPhase::Paused => self.resume(),
            SessionPhase::GameOver => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Multiplier the host applies to frame time (0 freezes the simulation)
    pub fn time_scale(&self) -> f32 {
        match self.phase {
            SessionPhase::Playing => 1.0,
            SessionPhase::Paused | SessionPhase::GameOver => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_resume_idempotent() {
        let mut session = GameSession::default();
        session.pause();
        session.pause();
        assert!(session.is_paused());
        assert_eq!(session.time_scale(), 0.0);

        session.resume();
        session.resume();
        assert_eq!(session.phase, SessionPhase::Playing);
        assert_eq!(session.time_scale(), 1.0);

        session.toggle_pause();
        assert!(session.is_paused());
        session.toggle_pause();
        assert!(!session.is_paused());
    }

    #[test]
    fn test_losing_all_lives_ends_session() {
        let mut session = GameSession::new(2);
        session.add_score(50);
        assert!(!session.lose_life());
        assert!(session.lose_life());
        assert!(session.is_over());
        assert_eq!(session.time_scale(), 0.0);

        // Frozen once over
        session.add_score(10);
        session.toggle_pause();
        assert_eq!(session.score, 50);
        assert_eq!(session.phase, SessionPhase::GameOver);
        assert!(session.lose_life());
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_zero_lives_starts_over() {
        let session = GameSession::new(0);
        assert!(session.is_over());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = GameSession::default();
        let b = GameSession::default();
        a.add_score(5);
        a.record_jump();
        assert_eq!(b.score, 0);
        assert_eq!(b.jumps, 0);
    }
}
