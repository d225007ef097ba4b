//! Stack Tower - A block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic stacking simulation (overlap geometry, tower, game state)
//! - `config`: Construction-time tuning with validation
//! - `host`: Thin platform bindings (headless runner, browser)
//! - `palette`: Height-based block colouring

pub mod config;
pub mod error;
pub mod host;
pub mod palette;
pub mod sim;

pub use config::{DifficultyPreset, TowerConfig};
pub use error::{ConfigError, StackError};
pub use sim::{CommitOutcome, GameEvent, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Host frame length in milliseconds (the simulation ticks at 60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Base block footprint
    pub const BASE_WIDTH: f32 = 3.0;
    pub const BASE_DEPTH: f32 = 3.0;
    /// Every block in the tower has this height
    pub const LAYER_HEIGHT: f32 = 0.5;

    /// In-flight blocks sweep between -TRAVEL_BOUND and +TRAVEL_BOUND
    pub const TRAVEL_BOUND: f32 = 5.0;

    /// Difficulty curve (units per tick)
    pub const BASE_SPEED: f32 = 0.05;
    pub const SPEED_INCREMENT: f32 = 0.005;
    pub const MAX_SPEED: f32 = 0.15;

    /// Offsets at or below this never shed a fragment (float noise)
    pub const FRAGMENT_EPSILON: f32 = 0.1;
    /// Fragment descent per tick
    pub const FRAGMENT_FALL_PER_TICK: f32 = 0.2;
    /// Fragments at or below this y are retired
    pub const FRAGMENT_RETIRE_Y: f32 = -10.0;
    /// Fragment tumble (radians per tick): primary and secondary axis
    pub const FRAGMENT_SPIN_PRIMARY: f32 = 0.1;
    pub const FRAGMENT_SPIN_SECONDARY: f32 = 0.05;

    /// Camera sits this far above the top of the tower
    pub const CAMERA_OFFSET: f32 = 5.0;
    /// Fraction of the remaining camera distance closed per tick
    pub const CAMERA_EASING: f32 = 0.05;
}
