//! Sweep speed as a function of tower height

use serde::{Deserialize, Serialize};

use crate::config::TowerConfig;

/// Linear ramp with a cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub base_speed: f32,
    pub increment: f32,
    pub max_speed: f32,
}

impl Difficulty {
    pub fn from_config(config: &TowerConfig) -> Self {
        Self {
            base_speed: config.base_speed,
            increment: config.speed_increment,
            max_speed: config.max_speed,
        }
    }

    /// `min(max_speed, base_speed + level * increment)`
    pub fn speed(&self, level: u32) -> f32 {
        (self.base_speed + level as f32 * self.increment).min(self.max_speed)
    }
}
