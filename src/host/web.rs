//! Browser host
//!
//! The page owns the renderer (three.js or similar). Each animation frame it
//! calls `frame(now)` and applies the returned JSON events to its scene.
//! Input listeners only queue a commit; the queue is drained at the next
//! tick boundary so commits never land mid-tick.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

use super::FrameClock;
use crate::config::{DifficultyPreset, TowerConfig};
use crate::sim::{Autopilot, GameEvent, GamePhase, GameState};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Stack Tower starting...");
}

struct Session {
    state: GameState,
    clock: FrameClock,
    pilot: Option<Autopilot>,
    commit_queued: bool,
}

impl Session {
    /// Apply a queued commit, then run the ticks this frame owes
    fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if std::mem::take(&mut self.commit_queued) {
            self.state.request_commit();
        }
        for _ in 0..self.clock.ticks_for(now_ms) {
            match self.pilot.as_mut() {
                Some(pilot) => {
                    pilot.step(&mut self.state, 1.0);
                }
                None => self.state.tick(1.0),
            }
        }
        self.state.drain_events()
    }

    fn queue_commit(&mut self) {
        // Debounce: only one commit per tick boundary, and none after game over
        if self.state.phase == GamePhase::Playing {
            self.commit_queued = true;
        }
    }
}

/// A game session exposed to JavaScript
#[wasm_bindgen]
pub struct WebTower {
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl WebTower {
    /// `config` is an optional JSON object; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>, preset: Option<String>) -> Result<WebTower, JsValue> {
        let mut config = match config {
            Some(json) => TowerConfig::from_json(&json),
            None => Ok(TowerConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(preset) = preset.as_deref().and_then(DifficultyPreset::from_str) {
            config.apply_preset(preset);
            log::info!("Difficulty preset: {}", preset.as_str());
        }

        let state = GameState::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebTower {
            session: Rc::new(RefCell::new(Session {
                state,
                clock: FrameClock::new(),
                pilot: None,
                commit_queued: false,
            })),
        })
    }

    /// Advance to `now_ms` (requestAnimationFrame timestamp). Returns a JSON
    /// array of events for the page's renderer and HUD.
    pub fn frame(&self, now_ms: f64) -> String {
        let events = self.session.borrow_mut().frame(now_ms);
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Event serialization failed: {e}");
            "[]".to_string()
        })
    }

    /// Queue a commit for the next tick boundary
    pub fn commit_requested(&self) {
        self.session.borrow_mut().queue_commit();
    }

    /// Play again
    pub fn reset(&self) {
        let mut session = self.session.borrow_mut();
        session.commit_queued = false;
        session.clock.reset();
        session.state.reset();
        if let Some(pilot) = session.pilot.as_mut() {
            pilot.reset();
        }
    }

    pub fn score(&self) -> u32 {
        self.session.borrow().state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.session.borrow().state.phase == GamePhase::GameOver
    }

    /// Eased camera height
    pub fn camera_height(&self) -> f32 {
        self.session.borrow().state.camera.height
    }

    /// Height the camera looks at
    pub fn camera_target(&self) -> f32 {
        self.session.borrow().state.camera_target()
    }

    /// Let the demo player take over (attract mode). Seeds from the clock if none given.
    pub fn enable_autopilot(&self, seed: Option<f64>) {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        self.session.borrow_mut().pilot = Some(Autopilot::new(seed));
        log::info!("Autopilot on (seed {seed})");
    }

    pub fn disable_autopilot(&self) {
        self.session.borrow_mut().pilot = None;
        log::info!("Autopilot off");
    }

    /// Route click/touch on `element_id` and Space/Enter anywhere to commits
    pub fn bind_input(&self, element_id: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{element_id}")))?;

        // Mouse click
        {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                session.borrow_mut().queue_commit();
            });
            element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Keep the synthetic click from committing a second time
                event.prevent_default();
                session.borrow_mut().queue_commit();
            });
            element
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") && !event.repeat() {
                    event.prevent_default();
                    session.borrow_mut().queue_commit();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        log::info!("Input bound to #{element_id}");
        Ok(())
    }
}
