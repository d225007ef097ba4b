//! Demo player
//!
//! Watches the in-flight block and asks for a commit once it drifts within a
//! per-block tolerance of the top of the tower. Now and then it blunders and
//! drops the block wherever it happens to be. Seeded, so demo runs replay.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{CommitOutcome, GameState};

/// Chance (0-1) of dropping a block without aiming
const BLUNDER_CHANCE: f64 = 0.08;
/// Aim tolerance range as a fraction of the top block's extent
const TOLERANCE_MIN: f32 = 0.01;
const TOLERANCE_MAX: f32 = 0.12;

pub struct Autopilot {
    rng: Pcg32,
    /// Level the current plan was drawn for
    planned_level: Option<u32>,
    tolerance: f32,
    blunder: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            planned_level: None,
            tolerance: 0.0,
            blunder: false,
        }
    }

    /// Forget the current plan. A reset session starts back at level 1.
    pub fn reset(&mut self) {
        self.planned_level = None;
        self.blunder = false;
    }

    /// Whether the autopilot wants to commit right now
    pub fn wants_commit(&mut self, state: &GameState) -> bool {
        let (Some(block), Ok(top)) = (state.in_flight, state.tower.last()) else {
            return false;
        };

        if self.planned_level != Some(block.level) {
            self.planned_level = Some(block.level);
            let extent = block.axis.get(top.size);
            self.tolerance = extent * self.rng.random_range(TOLERANCE_MIN..TOLERANCE_MAX);
            self.blunder = self.rng.random_bool(BLUNDER_CHANCE);
        }

        if self.blunder {
            return true;
        }
        let offset = block.axis.get(block.position) - block.axis.get(top.position);
        offset.abs() <= self.tolerance
    }

    /// Play one frame: maybe commit, then tick
    pub fn step(&mut self, state: &mut GameState, dt: f32) -> Option<CommitOutcome> {
        let outcome = if self.wants_commit(state) {
            state.request_commit()
        } else {
            None
        };
        state.tick(dt);
        outcome
    }
}
