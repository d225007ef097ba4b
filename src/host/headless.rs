//! Native host without a window
//!
//! Runs a session at fixed ticks and mirrors it into `ProxyScene`, an
//! in-memory stand-in for a renderer's scene graph.

use std::collections::HashMap;

use glam::Vec3;

use super::{EventSink, dispatch};
use crate::config::TowerConfig;
use crate::error::ConfigError;
use crate::sim::{Autopilot, BlockId, BodyKind, CommitOutcome, GamePhase, GameState};

/// One visual stand-in for a block or fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy {
    pub kind: BodyKind,
    pub position: Vec3,
    pub size: Vec3,
    pub rotation: Vec3,
    pub color: u32,
}

/// What a renderer would be showing, plus the HUD
#[derive(Debug, Default)]
pub struct ProxyScene {
    pub proxies: HashMap<BlockId, Proxy>,
    pub score_label: u32,
    /// Final score while the game-over overlay is up
    pub game_over: Option<u32>,
    pub resets: u32,
}

impl ProxyScene {
    pub fn count(&self, kind: BodyKind) -> usize {
        self.proxies.values().filter(|p| p.kind == kind).count()
    }
}

impl EventSink for ProxyScene {
    fn on_block_created(&mut self, id: BlockId, kind: BodyKind, position: Vec3, size: Vec3, color: u32) {
        let proxy = Proxy {
            kind,
            position,
            size,
            rotation: Vec3::ZERO,
            color,
        };
        if self.proxies.insert(id, proxy).is_some() {
            log::warn!("Proxy {id} created twice");
        }
    }

    fn on_block_removed(&mut self, id: BlockId) {
        if self.proxies.remove(&id).is_none() {
            log::warn!("Removed unknown proxy {id}");
        }
    }

    fn on_block_moved(&mut self, id: BlockId, position: Vec3, rotation: Option<Vec3>) {
        match self.proxies.get_mut(&id) {
            Some(proxy) => {
                proxy.position = position;
                if let Some(rotation) = rotation {
                    proxy.rotation = rotation;
                }
            }
            None => log::warn!("Moved unknown proxy {id}"),
        }
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score_label = score;
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.game_over = Some(final_score);
        log::info!("Game Over! Score: {final_score}");
    }

    fn on_reset(&mut self) {
        self.game_over = None;
        self.resets += 1;
    }
}

/// A session plus its scene, optionally driven by the autopilot
pub struct HeadlessHost {
    pub state: GameState,
    pub scene: ProxyScene,
    pilot: Option<Autopilot>,
}

impl HeadlessHost {
    pub fn new(config: TowerConfig) -> Result<Self, ConfigError> {
        let mut host = Self {
            state: GameState::new(config)?,
            scene: ProxyScene::default(),
            pilot: None,
        };
        host.flush();
        Ok(host)
    }

    /// Host whose input comes from a seeded autopilot
    pub fn with_autopilot(config: TowerConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut host = Self::new(config)?;
        host.pilot = Some(Autopilot::new(seed));
        Ok(host)
    }

    /// Player input
    pub fn commit_requested(&mut self) -> Option<CommitOutcome> {
        let outcome = self.state.request_commit();
        self.flush();
        outcome
    }

    /// Play-again button
    pub fn restart(&mut self) {
        self.state.reset();
        if let Some(pilot) = self.pilot.as_mut() {
            pilot.reset();
        }
        self.flush();
    }

    /// Run `frames` ticks
    pub fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            match self.pilot.as_mut() {
                Some(pilot) => {
                    pilot.step(&mut self.state, 1.0);
                }
                None => self.state.tick(1.0),
            }
            self.flush();
        }
    }

    /// Run until the game ends or `max_frames` pass. Returns the score.
    pub fn run_until_game_over(&mut self, max_frames: u32) -> u32 {
        for _ in 0..max_frames {
            if self.state.phase == GamePhase::GameOver {
                break;
            }
            self.run_frames(1);
        }
        self.state.score
    }

    fn flush(&mut self) {
        let events = self.state.drain_events();
        dispatch(&mut self.scene, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The scene must hold exactly one proxy per live entity
    fn assert_scene_matches(host: &HeadlessHost) {
        let state = &host.state;
        assert_eq!(host.scene.count(BodyKind::Committed), state.tower.len());
        assert_eq!(
            host.scene.count(BodyKind::InFlight),
            usize::from(state.in_flight.is_some())
        );
        assert_eq!(host.scene.count(BodyKind::Fragment), state.fragments.len());
        assert_eq!(host.scene.score_label, state.score);
        if let Some(block) = state.in_flight {
            assert_eq!(host.scene.proxies[&block.id].position, block.position);
        }
    }

    #[test]
    fn test_scene_tracks_manual_play() {
        let mut host = HeadlessHost::new(TowerConfig::default()).unwrap();
        assert_scene_matches(&host);

        // Sweep toward the center, then drop
        host.run_frames(95);
        assert!(matches!(
            host.commit_requested(),
            Some(CommitOutcome::Placed { .. })
        ));
        assert_scene_matches(&host);

        host.run_frames(30);
        assert_scene_matches(&host);

        // Block starts at -5 on Z, far off the tower
        assert!(matches!(
            host.commit_requested(),
            Some(CommitOutcome::Missed { .. })
        ));
        assert_eq!(host.scene.game_over, Some(1));
        assert_scene_matches(&host);

        // Ignored while the overlay is up
        assert!(host.commit_requested().is_none());
    }

    #[test]
    fn test_restart_clears_scene() {
        let mut host = HeadlessHost::with_autopilot(TowerConfig::default(), 7).unwrap();
        host.run_until_game_over(20_000);
        host.restart();

        assert_eq!(host.scene.resets, 2);
        assert_eq!(host.scene.game_over, None);
        assert_eq!(host.scene.proxies.len(), 2);
        assert_scene_matches(&host);
    }

    #[test]
    fn test_demo_recovers_after_restart() {
        let mut host = HeadlessHost::with_autopilot(TowerConfig::default(), 0).unwrap();
        host.run_until_game_over(20_000);

        let mut runs = Vec::new();
        for _ in 0..10 {
            host.restart();
            host.run_until_game_over(20_000);
            runs.push((host.state.score, host.state.time_ticks));
        }
        assert!(
            runs.iter().any(|&(_, ticks)| ticks > 0),
            "every run after restart ended on the first tick: {runs:?}"
        );
        assert!(runs.iter().any(|&(score, _)| score > 0), "no run scored: {runs:?}");
    }

    #[test]
    fn test_autopilot_session_stays_consistent() {
        let mut host = HeadlessHost::with_autopilot(TowerConfig::default(), 3).unwrap();
        for _ in 0..200 {
            host.run_frames(50);
            assert_scene_matches(&host);
            assert_eq!(host.state.score as usize, host.state.tower.len() - 1);
            if host.state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
