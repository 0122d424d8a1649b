//! Jump tuning and presets
//!
//! Set once when a controller is initialized and never mutated during a
//! session. Persisted as JSON so designers can iterate without rebuilding.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{JumpError, Result};

/// Named jump feel presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JumpPreset {
    Floaty,
    #[default]
    Classic,
    Snappy,
}

impl JumpPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            JumpPreset::Floaty => "Floaty",
            JumpPreset::Classic => "Classic",
            JumpPreset::Snappy => "Snappy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "floaty" | "float" => Some(JumpPreset::Floaty),
            "classic" | "default" => Some(JumpPreset::Classic),
            "snappy" | "tight" => Some(JumpPreset::Snappy),
            _ => None,
        }
    }

    /// Full tuning for this preset
    pub fn tuning(&self) -> JumpTuning {
        match self {
            JumpPreset::Floaty => JumpTuning {
                jump_impulse: 10.0,
                fall_gravity_multiplier: 1.2,
                low_jump_gravity_multiplier: 1.1,
                coyote_window: 0.15,
                jump_buffer_window: 0.15,
                ..JumpTuning::default()
            },
            JumpPreset::Classic => JumpTuning::default(),
            JumpPreset::Snappy => JumpTuning {
                jump_impulse: 14.0,
                fall_gravity_multiplier: 3.5,
                low_jump_gravity_multiplier: 3.0,
                coyote_window: 0.08,
                jump_buffer_window: 0.08,
                consume_coyote_on_jump: true,
                ..JumpTuning::default()
            },
        }
    }
}

/// Numeric tunables for one jump controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpTuning {
    /// Upward velocity added when a jump fires (units/s)
    pub jump_impulse: f32,
    /// Gravity scale while falling (1.0 = plain gravity)
    pub fall_gravity_multiplier: f32,
    /// Gravity scale while rising with the jump key released
    pub low_jump_gravity_multiplier: f32,
    /// Seconds after leaving ground during which a jump is still honored
    pub coyote_window: f32,
    /// Seconds an early press stays live waiting for ground
    pub jump_buffer_window: f32,
    /// Ambient gravity applied by the host integrator (negative = down)
    pub gravity_y: f32,
    /// A fired jump spends the coyote grace until the next landing
    #[serde(default)]
    pub consume_coyote_on_jump: bool,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            jump_impulse: 12.0,
            fall_gravity_multiplier: 2.5,
            low_jump_gravity_multiplier: 2.0,
            coyote_window: 0.1,
            jump_buffer_window: 0.1,
            gravity_y: -9.81,
            consume_coyote_on_jump: false,
        }
    }
}

impl JumpTuning {
    pub fn from_preset(preset: JumpPreset) -> Self {
        preset.tuning()
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, value: f32, reason: &'static str) -> Result<()> {
            Err(JumpError::InvalidTuning {
                field,
                value,
                reason,
            })
        }

        let fields = [
            ("jump_impulse", self.jump_impulse),
            ("fall_gravity_multiplier", self.fall_gravity_multiplier),
            ("low_jump_gravity_multiplier", self.low_jump_gravity_multiplier),
            ("coyote_window", self.coyote_window),
            ("jump_buffer_window", self.jump_buffer_window),
            ("gravity_y", self.gravity_y),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, value, "must be finite");
        }

        if self.jump_impulse <= 0.0 {
            return invalid("jump_impulse", self.jump_impulse, "must be positive");
        }
        if self.fall_gravity_multiplier < 1.0 {
            return invalid(
                "fall_gravity_multiplier",
                self.fall_gravity_multiplier,
                "must be at least 1",
            );
        }
        if self.low_jump_gravity_multiplier < 1.0 {
            return invalid(
                "low_jump_gravity_multiplier",
                self.low_jump_gravity_multiplier,
                "must be at least 1",
            );
        }
        if self.coyote_window < 0.0 {
            return invalid("coyote_window", self.coyote_window, "must not be negative");
        }
        if self.jump_buffer_window < 0.0 {
            return invalid(
                "jump_buffer_window",
                self.jump_buffer_window,
                "must not be negative",
            );
        }
        if self.gravity_y >= 0.0 {
            return invalid("gravity_y", self.gravity_y, "must point down");
        }
        Ok(())
    }

    /// Peak height of a full (held) jump from rest: h = v² / (2|g|)
    pub fn apex_height(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity_y.abs())
    }

    /// Seconds from takeoff to apex for a held jump
    pub fn time_to_apex(&self) -> f32 {
        self.jump_impulse / self.gravity_y.abs()
    }

    /// Parse and validate tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| JumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded jump tuning from {}", path.display());
        Ok(tuning)
    }

    /// Save tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| JumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Jump tuning saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(JumpTuning::default().validate().is_ok());
        for preset in [JumpPreset::Floaty, JumpPreset::Classic, JumpPreset::Snappy] {
            assert!(preset.tuning().validate().is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_rejects_non_positive_impulse() {
        let tuning = JumpTuning {
            jump_impulse: 0.0,
            ..Default::default()
        };
        match tuning.validate() {
            Err(JumpError::InvalidTuning { field, .. }) => assert_eq!(field, "jump_impulse"),
            other => panic!("expected invalid tuning, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_windows() {
        let tuning = JumpTuning {
            coyote_window: -0.01,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(JumpError::InvalidTuning { field: "coyote_window", .. })
        ));

        let tuning = JumpTuning {
            jump_buffer_window: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(JumpError::InvalidTuning { field: "jump_buffer_window", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_gravity_and_multipliers() {
        let up = JumpTuning {
            gravity_y: 9.81,
            ..Default::default()
        };
        assert!(up.validate().is_err());

        let weak_fall = JumpTuning {
            fall_gravity_multiplier: 0.5,
            ..Default::default()
        };
        assert!(weak_fall.validate().is_err());

        let nan = JumpTuning {
            low_jump_gravity_multiplier: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(JumpError::InvalidTuning { reason: "must be finite", .. })
        ));
    }

    #[test]
    fn test_zero_windows_are_allowed() {
        let tuning = JumpTuning {
            coyote_window: 0.0,
            jump_buffer_window: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(JumpPreset::from_str("SNAPPY"), Some(JumpPreset::Snappy));
        assert_eq!(JumpPreset::from_str("float"), Some(JumpPreset::Floaty));
        assert_eq!(JumpPreset::from_str("default"), Some(JumpPreset::Classic));
        assert_eq!(JumpPreset::from_str("moon"), None);
    }

    #[test]
    fn test_json_missing_optional_flag() {
        let json = r#"{
            "jump_impulse": 8.0,
            "fall_gravity_multiplier": 2.0,
            "low_jump_gravity_multiplier": 1.5,
            "coyote_window": 0.1,
            "jump_buffer_window": 0.12,
            "gravity_y": -20.0
        }"#;
        let tuning = JumpTuning::from_json(json).unwrap();
        assert_eq!(tuning.jump_impulse, 8.0);
        assert!(!tuning.consume_coyote_on_jump);
    }

    #[test]
    fn test_json_invalid_values_rejected() {
        let json = r#"{
            "jump_impulse": -1.0,
            "fall_gravity_multiplier": 2.0,
            "low_jump_gravity_multiplier": 1.5,
            "coyote_window": 0.1,
            "jump_buffer_window": 0.12,
            "gravity_y": -20.0
        }"#;
        assert!(matches!(
            JumpTuning::from_json(json),
            Err(JumpError::InvalidTuning { .. })
        ));
        assert!(matches!(
            JumpTuning::from_json("{ not json"),
            Err(JumpError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "coyote_jump_tuning_{}.json",
            std::process::id()
        ));
        let tuning = JumpPreset::Snappy.tuning();
        tuning.save(&path).unwrap();
        let loaded = JumpTuning::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, tuning);
    }

    #[test]
    fn test_load_missing_file() {
        let err = JumpTuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, JumpError::Io { .. }));
        assert!(err.to_string().contains("tuning.json"));
    }

    #[test]
    fn test_apex_height() {
        let tuning = JumpTuning {
            jump_impulse: 10.0,
            gravity_y: -20.0,
            ..Default::default()
        };
        assert!((tuning.apex_height() - 2.5).abs() < 1e-5);
        assert!((tuning.time_to_apex() - 0.5).abs() < 1e-5);
    }
}
