//! Deterministic stacking simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-based time only (1 tick = one 60 Hz frame)
//! - Seeded RNG only (autopilot)
//! - No rendering or platform dependencies; hosts consume `GameEvent`s

pub mod autopilot;
pub mod camera;
pub mod difficulty;
pub mod fragments;
pub mod geometry;
pub mod oscillator;
pub mod state;
pub mod tick;
pub mod tower;

pub use autopilot::Autopilot;
pub use camera::CameraRig;
pub use difficulty::Difficulty;
pub use fragments::{FallTuning, Fragment, FragmentField};
pub use geometry::{Axis, Clip, Overlap, Span, resolve_overlap};
pub use oscillator::Oscillator;
pub use state::{BodyKind, CommitOutcome, GameEvent, GamePhase, GameState, InFlight};
pub use tower::{Block, BlockId, Tower};
