//! Game tuning and difficulty presets
//!
//! Validated once when a session is built; nothing here is checked again at runtime.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Classic,
    Frantic,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Classic => "Classic",
            DifficultyPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "classic" | "normal" => Some(DifficultyPreset::Classic),
            "frantic" | "hard" => Some(DifficultyPreset::Frantic),
            _ => None,
        }
    }

    /// Starting sweep speed (units per tick)
    pub fn base_speed(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.035,
            DifficultyPreset::Classic => BASE_SPEED,
            DifficultyPreset::Frantic => 0.08,
        }
    }

    /// Speed gained per tower level
    pub fn speed_increment(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.003,
            DifficultyPreset::Classic => SPEED_INCREMENT,
            DifficultyPreset::Frantic => 0.008,
        }
    }

    /// Speed cap
    pub fn max_speed(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.1,
            DifficultyPreset::Classic => MAX_SPEED,
            DifficultyPreset::Frantic => 0.22,
        }
    }
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    // === Tower ===
    /// Base block x-extent
    pub base_width: f32,
    /// Base block z-extent
    pub base_depth: f32,
    /// Height of every layer
    pub layer_height: f32,

    // === Motion ===
    /// In-flight blocks bounce at ±travel_bound
    pub travel_bound: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,

    // === Fragments ===
    /// Offsets at or below this are treated as perfect placements
    pub fragment_epsilon: f32,
    /// Descent per tick (positive number, applied downwards)
    pub fragment_fall_per_tick: f32,
    pub fragment_retire_y: f32,
    pub fragment_spin_primary: f32,
    pub fragment_spin_secondary: f32,

    // === Camera ===
    pub camera_offset: f32,
    pub camera_easing: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            base_depth: BASE_DEPTH,
            layer_height: LAYER_HEIGHT,

            travel_bound: TRAVEL_BOUND,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,

            fragment_epsilon: FRAGMENT_EPSILON,
            fragment_fall_per_tick: FRAGMENT_FALL_PER_TICK,
            fragment_retire_y: FRAGMENT_RETIRE_Y,
            fragment_spin_primary: FRAGMENT_SPIN_PRIMARY,
            fragment_spin_secondary: FRAGMENT_SPIN_SECONDARY,

            camera_offset: CAMERA_OFFSET,
            camera_easing: CAMERA_EASING,
        }
    }
}

impl TowerConfig {
    /// Create a config from a difficulty preset (applies preset speeds)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a difficulty preset (only the speed curve changes)
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.base_speed = preset.base_speed();
        self.speed_increment = preset.speed_increment();
        self.max_speed = preset.max_speed();
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            ("base_width", self.base_width),
            ("base_depth", self.base_depth),
            ("layer_height", self.layer_height),
            ("travel_bound", self.travel_bound),
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
            ("max_speed", self.max_speed),
            ("fragment_epsilon", self.fragment_epsilon),
            ("fragment_fall_per_tick", self.fragment_fall_per_tick),
            ("fragment_retire_y", self.fragment_retire_y),
            ("fragment_spin_primary", self.fragment_spin_primary),
            ("fragment_spin_secondary", self.fragment_spin_secondary),
            ("camera_offset", self.camera_offset),
            ("camera_easing", self.camera_easing),
        ];
        if let Some((field, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field: *field });
        }

        let positive = [
            ("base_width", self.base_width),
            ("base_depth", self.base_depth),
            ("layer_height", self.layer_height),
            ("travel_bound", self.travel_bound),
            ("base_speed", self.base_speed),
            ("fragment_fall_per_tick", self.fragment_fall_per_tick),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("fragment_epsilon", self.fragment_epsilon),
            ("camera_easing", self.camera_easing),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.max_speed < self.base_speed {
            return Err(ConfigError::SpeedCapBelowBase {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        if self.fragment_retire_y >= 0.0 {
            return Err(ConfigError::RetireAboveBase {
                retire_y: self.fragment_retire_y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TowerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            DifficultyPreset::Relaxed,
            DifficultyPreset::Classic,
            DifficultyPreset::Frantic,
        ] {
            let config = TowerConfig::from_preset(preset);
            assert!(config.validate().is_ok(), "{} rejected", preset.as_str());
            assert_eq!(DifficultyPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(
            TowerConfig::from_preset(DifficultyPreset::Classic),
            TowerConfig::default()
        );
    }

    #[test]
    fn test_rejects_negative_increment() {
        let config = TowerConfig {
            speed_increment: -0.01,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "speed_increment",
                value: -0.01
            })
        );
    }

    #[test]
    fn test_rejects_zero_travel_bound() {
        let config = TowerConfig {
            travel_bound: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "travel_bound",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_cap_below_base() {
        let config = TowerConfig {
            base_speed: 0.2,
            max_speed: 0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedCapBelowBase { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = TowerConfig {
            layer_height: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "layer_height"
            })
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = TowerConfig::from_json(r#"{ "travel_bound": 6.0 }"#).unwrap();
        assert_eq!(config.travel_bound, 6.0);
        assert_eq!(config.base_width, BASE_WIDTH);

        assert!(matches!(
            TowerConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(TowerConfig::from_json(r#"{ "fragment_retire_y": 1.0 }"#).is_err());
    }
}
