//! Session operations: tick, commit, reset
//!
//! The host loop calls `tick` once per frame and `request_commit` on player
//! input. Neither suspends, so commits always land between two ticks.

use glam::Vec3;

use super::camera::CameraRig;
use super::geometry::{Axis, Overlap, resolve_overlap};
use super::oscillator::Oscillator;
use super::state::{BodyKind, CommitOutcome, GameEvent, GamePhase, GameState, InFlight};
use super::tower::Block;
use crate::error::StackError;
use crate::palette::{color_for_height, to_hex};

impl GameState {
    /// Advance the session by `dt` ticks (1.0 = one 60 Hz frame)
    pub fn tick(&mut self, dt: f32) {
        if self.phase == GamePhase::Resetting {
            return;
        }

        if self.phase == GamePhase::Playing {
            self.time_ticks += 1;
            let along = self.oscillator.advance(dt);
            let axis = self.oscillator.axis;
            if let Some(block) = self.in_flight.as_mut() {
                block.position = axis.with(block.position, along);
                self.events.push(GameEvent::BlockMoved {
                    id: block.id,
                    position: block.position,
                    rotation: None,
                });
            }
        }

        // Fragments finish falling even after the run ends
        let retired = self.fragments.advance(dt);
        for fragment in self.fragments.iter() {
            self.events.push(GameEvent::BlockMoved {
                id: fragment.id,
                position: fragment.position,
                rotation: Some(fragment.rotation),
            });
        }
        self.events
            .extend(retired.into_iter().map(|id| GameEvent::BlockRemoved { id }));

        let top_y = self.tower.last().map(|b| b.position.y).unwrap_or(0.0);
        self.camera.follow(top_y, dt);
    }

    /// Lock the in-flight block where it is.
    ///
    /// A miss ends the run and is reported as [`CommitOutcome::Missed`].
    /// Calling this outside `Playing` is an integration bug.
    pub fn commit(&mut self) -> Result<CommitOutcome, StackError> {
        let invalid = StackError::InvalidStateTransition {
            operation: "commit",
            phase: self.phase,
        };
        if self.phase != GamePhase::Playing {
            return Err(invalid);
        }
        let current = self.in_flight.ok_or(invalid)?;
        let top = *self.tower.last()?;
        let axis = current.axis;

        let clip = match resolve_overlap(top.span(axis), axis.get(current.position)) {
            Overlap::Miss { overlap } => {
                self.phase = GamePhase::GameOver;
                self.in_flight = None;
                self.emit(GameEvent::BlockRemoved { id: current.id });
                self.emit(GameEvent::GameOver {
                    final_score: self.score,
                });
                log::info!(
                    "Game over at level {} (overlap {:.3}), final score {}",
                    current.level,
                    overlap,
                    self.score
                );
                return Ok(CommitOutcome::Missed {
                    overlap,
                    final_score: self.score,
                });
            }
            Overlap::Hit(clip) => clip,
        };

        self.in_flight = None;
        self.emit(GameEvent::BlockRemoved { id: current.id });

        let block = Block {
            id: self.next_entity_id(),
            position: axis.with(current.position, clip.kept.center),
            size: axis.with(current.size, clip.kept.extent),
            level: current.level,
        };
        self.tower.append(block);
        self.emit(created(block.id, BodyKind::Committed, block.position, block.size));

        let fragment = if clip.sheds_fragment(self.config.fragment_epsilon) {
            let id = self.next_entity_id();
            let position = axis.with(current.position, clip.overhang.center);
            let size = axis.with(current.size, clip.overhang.extent);
            self.fragments.spawn(id, position, size, axis);
            self.emit(created(id, BodyKind::Fragment, position, size));
            Some(id)
        } else {
            None
        };

        self.score += 1;
        self.emit(GameEvent::ScoreChanged { score: self.score });

        self.oscillator.speed = self.difficulty.speed(self.tower.len() as u32);
        self.camera.target_y = block.position.y;

        log::debug!(
            "Placed level {} along {:?}: offset {:.3}, extent {:.3}, speed {:.3}",
            block.level,
            axis,
            clip.offset,
            clip.kept.extent,
            self.oscillator.speed
        );

        self.spawn_in_flight()?;

        Ok(CommitOutcome::Placed {
            block,
            fragment,
            score: self.score,
        })
    }

    /// Player input entry point. Ignored unless playing.
    pub fn request_commit(&mut self) -> Option<CommitOutcome> {
        if self.phase != GamePhase::Playing {
            log::warn!("Commit request ignored while {:?}", self.phase);
            return None;
        }
        match self.commit() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("Commit failed: {e}");
                None
            }
        }
    }

    /// Throw away the session and start a fresh run.
    ///
    /// Valid from any phase. Live proxies are reported as removed first.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Resetting;

        let mut stale: Vec<_> = self.tower.blocks().iter().map(|b| b.id).collect();
        stale.extend(self.in_flight.take().map(|b| b.id));
        stale.extend(self.fragments.clear());
        self.events
            .extend(stale.into_iter().map(|id| GameEvent::BlockRemoved { id }));

        self.tower.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.next_id = 1;
        self.oscillator = Oscillator::new(self.config.travel_bound, self.difficulty.speed(0));
        self.camera = CameraRig::new(self.config.camera_offset, self.config.camera_easing);
        self.emit(GameEvent::Reset);

        let base = Block {
            id: self.next_entity_id(),
            position: Vec3::ZERO,
            size: Vec3::new(
                self.config.base_width,
                self.config.layer_height,
                self.config.base_depth,
            ),
            level: 0,
        };
        self.tower.append(base);
        self.emit(created(base.id, BodyKind::Committed, base.position, base.size));
        self.emit(GameEvent::ScoreChanged { score: 0 });

        // The base block was just appended, so the tower cannot be empty
        if let Err(e) = self.spawn_in_flight() {
            log::error!("Reset could not spawn a block: {e}");
        }

        self.phase = GamePhase::Playing;
        log::info!("New run started");
    }

    /// Put a new block above the tower, at the negative travel bound of its axis
    fn spawn_in_flight(&mut self) -> Result<(), StackError> {
        let top = *self.tower.last()?;
        let level = self.tower.len() as u32;
        let axis = Axis::for_tower_len(self.tower.len());
        self.oscillator.restart(axis);

        let above = Vec3::new(
            top.position.x,
            level as f32 * self.config.layer_height,
            top.position.z,
        );
        let block = InFlight {
            id: self.next_entity_id(),
            axis,
            position: axis.with(above, self.oscillator.position),
            size: Vec3::new(top.width(), self.config.layer_height, top.depth()),
            level,
        };
        self.in_flight = Some(block);
        self.emit(created(block.id, BodyKind::InFlight, block.position, block.size));
        Ok(())
    }
}

fn created(id: u32, kind: BodyKind, position: Vec3, size: Vec3) -> GameEvent {
    GameEvent::BlockCreated {
        id,
        kind,
        position,
        size,
        color: to_hex(color_for_height(position.y)),
    }
}
