//! Game state and core simulation types
//!
//! One `GameState` owns a whole session: the tower, the in-flight block,
//! falling fragments and the score. The operations live in `tick.rs`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::difficulty::Difficulty;
use super::fragments::{FallTuning, FragmentField};
use super::geometry::Axis;
use super::oscillator::Oscillator;
use super::tower::{Block, BlockId, Tower};
use crate::config::TowerConfig;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// In-flight block sweeping, commits accepted
    Playing,
    /// Run ended; only reset is accepted
    GameOver,
    /// Transient while a reset rebuilds the session
    Resetting,
}

/// What a visual proxy stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Committed,
    InFlight,
    Fragment,
}

/// Notifications for the host renderer and UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BlockCreated {
        id: BlockId,
        kind: BodyKind,
        position: Vec3,
        size: Vec3,
        /// 0xRRGGBB
        color: u32,
    },
    BlockRemoved {
        id: BlockId,
    },
    BlockMoved {
        id: BlockId,
        position: Vec3,
        /// Fragments tumble; blocks never rotate
        rotation: Option<Vec3>,
    },
    ScoreChanged {
        score: u32,
    },
    GameOver {
        final_score: u32,
    },
    Reset,
}

/// The block currently sweeping above the tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InFlight {
    pub id: BlockId,
    pub axis: Axis,
    pub position: Vec3,
    pub size: Vec3,
    /// Level it will occupy once committed
    pub level: u32,
}

/// Result of a commit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CommitOutcome {
    Placed {
        block: Block,
        /// Falling overhang, if the offset was large enough
        fragment: Option<BlockId>,
        score: u32,
    },
    /// No overlap with the top block; the run is over
    Missed { overlap: f32, final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tuning the session was built with (validated)
    pub config: TowerConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Successful commits this run
    pub score: u32,
    /// Committed blocks, base first
    pub tower: Tower,
    /// Sweeping block (None once the run is over)
    pub in_flight: Option<InFlight>,
    /// Sweep driver shared by consecutive in-flight blocks
    pub oscillator: Oscillator,
    pub difficulty: Difficulty,
    /// Falling overhangs
    pub fragments: FragmentField,
    pub camera: CameraRig,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending host notifications
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID
    pub(crate) next_id: BlockId,
}

impl GameState {
    /// Build a session with a validated config and start playing
    pub fn new(config: TowerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let difficulty = Difficulty::from_config(&config);
        let mut state = Self {
            phase: GamePhase::Resetting,
            score: 0,
            tower: Tower::new(),
            in_flight: None,
            oscillator: Oscillator::new(config.travel_bound, difficulty.speed(0)),
            difficulty,
            fragments: FragmentField::new(FallTuning {
                fall_per_tick: config.fragment_fall_per_tick,
                retire_y: config.fragment_retire_y,
                spin_primary: config.fragment_spin_primary,
                spin_secondary: config.fragment_spin_secondary,
            }),
            camera: CameraRig::new(config.camera_offset, config.camera_easing),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        };
        state.reset();
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> BlockId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current sweep speed (units per tick)
    pub fn speed(&self) -> f32 {
        self.oscillator.speed
    }

    /// y the camera should look at
    pub fn camera_target(&self) -> f32 {
        self.camera.look_at_y()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
