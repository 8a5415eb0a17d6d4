//! Game session: the simulation wired to its collaborators
//!
//! One `frame` call runs input -> simulation -> presentation sync -> render,
//! in that order. The session is the only place simulation events turn into
//! renderer calls, HUD updates and record writes.

use crate::consts::MAX_LEVEL;
use crate::highscores::Records;
use crate::persistence::ScalarStore;
use crate::platform::{Hud, HudEvent, HudSnapshot, InputEdges, InputSnapshot, InputTracker, Renderer};
use crate::settings::Settings;
use crate::sim::{EntityId, GameEvent, GamePhase, GameState, TickInput, TickParams, phase, tick};

pub struct Session<R: Renderer, H: Hud, S: ScalarStore> {
    state: GameState,
    records: Records,
    renderer: R,
    hud: H,
    store: S,
    input: InputTracker,
    debug_mode: bool,
    slow_motion: bool,
    last_hud: Option<HudSnapshot>,
}

impl<R: Renderer, H: Hud, S: ScalarStore> Session<R, H, S> {
    /// New session at the menu; records are read from `store`
    pub fn new(settings: Settings, renderer: R, hud: H, store: S) -> Self {
        let records = Records::load(&store);
        let mut session = Self {
            state: GameState::new(settings),
            records,
            renderer,
            hud,
            store,
            input: InputTracker::new(),
            debug_mode: false,
            slow_motion: false,
            last_hud: None,
        };
        session.sync_presentation();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests; changes show up at the next sync
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn records(&self) -> Records {
        self.records
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn slow_motion(&self) -> bool {
        self.slow_motion
    }

    /// Run one frame of `dt_ms` milliseconds
    pub fn frame(&mut self, snapshot: &InputSnapshot, dt_ms: f64) {
        let edges = self.input.edges(snapshot);
        let fire_consumed = self.apply_menu_input(snapshot, &edges);
        self.apply_debug_input(&edges);

        let input = TickInput {
            steer_left: snapshot.move_left,
            steer_right: snapshot.move_right,
            fire: snapshot.fire && !fire_consumed,
            pause: edges.pause,
        };
        let speed = self.state.settings.effective_bullet_speed(self.slow_motion);
        tick(&mut self.state, &input, TickParams::new(dt_ms, speed));

        self.sync_presentation();
        self.renderer.render_frame();
    }

    /// Fire presses drive the menus. Returns true when the press was used up.
    fn apply_menu_input(&mut self, snapshot: &InputSnapshot, edges: &InputEdges) -> bool {
        if let Some(id) = snapshot.pick {
            phase::pick_ship(&mut self.state, id);
        }
        if !edges.fire {
            return false;
        }
        match self.state.phase {
            GamePhase::Menu => phase::start_ship_selection(&mut self.state),
            GamePhase::ShipSelection => phase::confirm_ship(&mut self.state),
            GamePhase::LevelComplete => phase::next_level(&mut self.state),
            GamePhase::GameOver | GamePhase::Victory => phase::restart(&mut self.state),
            _ => false,
        }
    }

    fn apply_debug_input(&mut self, edges: &InputEdges) {
        if edges.debug_toggle {
            self.debug_mode = !self.debug_mode;
            log::info!("Debug mode {}", if self.debug_mode { "on" } else { "off" });
        }
        if !self.debug_mode {
            return;
        }
        let [invincible, clear, skip, slow] = edges.debug_actions;
        if invincible {
            phase::toggle_invincibility(&mut self.state);
        }
        if clear {
            phase::clear_enemies(&mut self.state);
        }
        if skip {
            phase::skip_level(&mut self.state);
        }
        if slow && self.state.phase == GamePhase::Playing {
            self.slow_motion = !self.slow_motion;
            log::info!("Slow motion {}", if self.slow_motion { "on" } else { "off" });
        }
    }

    // === Explicit actions (menus, overlay buttons) ===

    pub fn start(&mut self) -> bool {
        self.act(phase::start_ship_selection)
    }

    pub fn pick(&mut self, id: EntityId) -> bool {
        let picked = phase::pick_ship(&mut self.state, id);
        self.sync_presentation();
        picked
    }

    pub fn confirm(&mut self) -> bool {
        self.act(phase::confirm_ship)
    }

    pub fn pause(&mut self) -> bool {
        self.act(phase::pause)
    }

    pub fn resume(&mut self) -> bool {
        self.act(phase::resume)
    }

    pub fn restart(&mut self) -> bool {
        self.act(phase::restart)
    }

    pub fn next_level(&mut self) -> bool {
        self.act(phase::next_level)
    }

    /// Back to the title menu (the source of a fresh run)
    pub fn main_menu(&mut self) -> bool {
        self.slow_motion = false;
        self.act(phase::return_to_menu)
    }

    fn act(&mut self, action: fn(&mut GameState) -> bool) -> bool {
        let applied = action(&mut self.state);
        self.sync_presentation();
        applied
    }

    // === Presentation ===

    fn sync_presentation(&mut self) {
        for event in self.state.drain_events() {
            self.dispatch(event);
        }

        for (id, kind, position) in self.state.render_list() {
            self.renderer
                .update_transform(id, position, kind.base_rotation());
        }
        let player_shown = !matches!(self.state.phase, GamePhase::Menu | GamePhase::ShipSelection)
            && self.state.player.is_visible(self.state.clock_ms);
        self.renderer.set_visible(self.state.player.id, player_shown);

        self.push_hud();
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Spawned { id, kind, position } => {
                self.renderer.add_to_scene(id, kind, position);
            }
            GameEvent::Despawned { id, .. } => self.renderer.remove_from_scene(id),
            GameEvent::BossHit { id } => self.renderer.flash(id),
            GameEvent::LevelStarted { level } => log::debug!("Level {} started", level),
            GameEvent::LevelComplete { level, score } => {
                self.record_level((level + 1).min(MAX_LEVEL));
                self.hud.event(&HudEvent::LevelComplete { level, score });
            }
            GameEvent::GameOver {
                score,
                levels_completed,
            } => {
                self.record_score(score);
                self.hud.event(&HudEvent::GameOver {
                    score,
                    levels_completed,
                });
            }
            GameEvent::Victory { score } => {
                self.record_score(score);
                self.hud.event(&HudEvent::Victory { score });
            }
            GameEvent::SpecialAttack { .. } | GameEvent::PhaseChanged { .. } => {}
        }
    }

    fn record_score(&mut self, score: u64) {
        if let Err(err) = self.records.record_score(score, &mut self.store) {
            log::warn!("Failed to persist high score: {}", err);
        }
    }

    fn record_level(&mut self, level: u32) {
        if let Err(err) = self.records.record_level(level, &mut self.store) {
            log::warn!("Failed to persist highest level: {}", err);
        }
    }

    fn push_hud(&mut self) {
        let snapshot = HudSnapshot {
            score: self.state.score,
            lives: self.state.displayed_lives(),
            level: self.state.level,
            high_score: self.records.high_score,
            highest_level: self.records.highest_level,
        };
        if self.last_hud != Some(snapshot) {
            self.hud.update(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }
}
