//! Host bindings
//!
//! The simulation knows nothing about screens or input devices. A host owns
//! the frame loop: it turns wall-clock time into ticks, forwards player input
//! as commit requests, and applies `GameEvent`s to whatever draws the blocks.
//!
//! - `headless`: native, keeps an in-memory proxy scene (demo runs, tests)
//! - `web`: wasm32, streams events to the page as JSON

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec3;

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};
use crate::sim::{BlockId, BodyKind, GameEvent};

/// Longest frame gap honoured; anything beyond is treated as a stall
const MAX_FRAME_GAP_MS: f64 = 250.0;

/// Fixed-step accumulator turning frame timestamps into whole ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to simulate for a frame presented at `now_ms`
    pub fn ticks_for(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 0;
        };
        self.accumulator += (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS);

        let mut ticks = 0;
        while self.accumulator >= FRAME_MS && ticks < MAX_SUBSTEPS {
            self.accumulator -= FRAME_MS;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Forget timing history (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

/// Receiver for session notifications. Every method defaults to a no-op.
pub trait EventSink {
    fn on_block_created(&mut self, _id: BlockId, _kind: BodyKind, _position: Vec3, _size: Vec3, _color: u32) {}
    fn on_block_removed(&mut self, _id: BlockId) {}
    fn on_block_moved(&mut self, _id: BlockId, _position: Vec3, _rotation: Option<Vec3>) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_game_over(&mut self, _final_score: u32) {}
    fn on_reset(&mut self) {}
}

/// Deliver events to a sink in order
pub fn dispatch<S: EventSink + ?Sized>(sink: &mut S, events: impl IntoIterator<Item = GameEvent>) {
    for event in events {
        match event {
            GameEvent::BlockCreated {
                id,
                kind,
                position,
                size,
                color,
            } => sink.on_block_created(id, kind, position, size, color),
            GameEvent::BlockRemoved { id } => sink.on_block_removed(id),
            GameEvent::BlockMoved {
                id,
                position,
                rotation,
            } => sink.on_block_moved(id, position, rotation),
            GameEvent::ScoreChanged { score } => sink.on_score_changed(score),
            GameEvent::GameOver { final_score } => sink.on_game_over(final_score),
            GameEvent::Reset => sink.on_reset(),
        }
    }
}
