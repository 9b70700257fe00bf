/// The session controller: round state machine plus the per-frame passes.
///
/// A frame is driven from outside in this order:
///
/// 1. [`Session::step_movement`]: advance the clock, move every entity
/// 2. render (the caller draws the world)
/// 3. [`Session::resolve`]: collision scan, removal flush, kill / death
///    bookkeeping, swarm logic
/// 4. [`Session::apply_input`]: held keys become ship velocity and shots
///
/// [`Session::frame`] runs 1, 3 and 4 back to back for callers that don't
/// render.  Key events may arrive at any time between frames; they only
/// touch the key tracker and the start gate, never the world.

use std::rc::Rc;

use crate::consts::{
    ALIEN_COLUMNS, ALIEN_ORIGIN, ALIEN_ROWS, ALIEN_SPACING_X, ALIEN_SPACING_Y, ALIEN_SPEEDUP,
    ALIEN_SPRITE, FIRE_COOLDOWN_MS, MSG_LOSE, MSG_WIN, SHIP_SPEED, SHIP_SPRITE, SHIP_START,
    SHOT_OFFSET, SHOT_SPRITE,
};
use crate::entities::{Entity, EntityId, EntityKind, FrameEvent};
use crate::input::{InputIntent, Key, KeyTracker};
use crate::sprite::{Sprite, SpriteError, SpriteStore};
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for "any key" before a round starts.
    AwaitingStart,
    Playing,
    /// Round over; one key press acknowledges it and returns to the gate.
    Ended(Outcome),
}

impl RoundState {
    /// True while the world is frozen behind a message.
    pub fn is_gated(&self) -> bool {
        !matches!(self, RoundState::Playing)
    }
}

/// What the shell should do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Handles resolved once per session so spawning never fails mid-round.
#[derive(Debug)]
struct SpriteSet {
    ship: Rc<Sprite>,
    alien: Rc<Sprite>,
    shot: Rc<Sprite>,
}

#[derive(Debug)]
pub struct Session {
    store: SpriteStore,
    sprites: SpriteSet,
    world: World,
    ship: EntityId,
    state: RoundState,
    message: String,
    alien_count: usize,
    keys: KeyTracker,
    intent: InputIntent,
    /// Game time accumulated from frame deltas (ms).
    clock_ms: u64,
    last_fire_ms: Option<u64>,
    logic_required: bool,
    /// Requests collected during the current frame's passes.
    events: Vec<FrameEvent>,
}

impl Session {
    pub fn new() -> Result<Self, SpriteError> {
        Self::with_store(SpriteStore::new())
    }

    /// Build a session around an existing sprite cache.  Fails if any of the
    /// game's sprites can't be resolved.
    pub fn with_store(mut store: SpriteStore) -> Result<Self, SpriteError> {
        let sprites = SpriteSet {
            ship: store.get(SHIP_SPRITE)?,
            alien: store.get(ALIEN_SPRITE)?,
            shot: store.get(SHOT_SPRITE)?,
        };

        let mut session = Session {
            store,
            sprites,
            world: World::new(),
            ship: EntityId(0),
            state: RoundState::AwaitingStart,
            message: String::new(),
            alien_count: 0,
            keys: KeyTracker::new(),
            intent: InputIntent::default(),
            clock_ms: 0,
            last_fire_ms: None,
            logic_required: false,
            events: Vec::new(),
        };
        // The formation is on screen behind the start message.
        session.init_entities();
        Ok(session)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn alien_count(&self) -> usize {
        self.alien_count
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ship(&self) -> Option<&Entity> {
        self.world.get(self.ship)
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// The intent applied by the last [`Session::apply_input`].
    pub fn intent(&self) -> InputIntent {
        self.intent
    }

    pub fn sprite_store(&self) -> &SpriteStore {
        &self.store
    }

    // ── Round setup ──────────────────────────────────────────────────────────

    fn init_entities(&mut self) {
        self.ship = self.world.add(Entity::ship(
            Rc::clone(&self.sprites.ship),
            SHIP_START.0,
            SHIP_START.1,
        ));

        self.alien_count = 0;
        for row in 0..ALIEN_ROWS {
            for column in 0..ALIEN_COLUMNS {
                let x = ALIEN_ORIGIN.0 + column as f64 * ALIEN_SPACING_X;
                let y = ALIEN_ORIGIN.1 + row as f64 * ALIEN_SPACING_Y;
                self.world
                    .add(Entity::alien(Rc::clone(&self.sprites.alien), x, y));
                self.alien_count += 1;
            }
        }
    }

    /// Fresh formation, no held keys, state `Playing`.
    pub fn start_round(&mut self) {
        self.world.clear();
        self.events.clear();
        self.logic_required = false;
        self.init_entities();

        self.keys.clear();
        self.intent = InputIntent::default();

        self.message.clear();
        self.state = RoundState::Playing;
        log::info!("round started with {} aliens", self.alien_count);
    }

    // ── Key events ───────────────────────────────────────────────────────────

    /// A key went down.  While gated this is the "any key" signal; escape
    /// always asks to quit.
    ///
    /// Game keys are tracked in every state.  A press from a key that is
    /// still held (auto-repeat on terminals without release events) never
    /// moves the gate.
    pub fn key_pressed(&mut self, key: Key) -> Control {
        if key == Key::Escape {
            return Control::Quit;
        }

        let already_held = self.keys.is_held(key, self.clock_ms);
        self.keys.press(key, self.clock_ms);

        match self.state {
            RoundState::Playing => {}
            _ if already_held => log::debug!("{key:?} still held, gate unchanged"),
            RoundState::AwaitingStart => self.start_round(),
            RoundState::Ended(outcome) => {
                log::debug!("{outcome:?} acknowledged, waiting for start");
                self.state = RoundState::AwaitingStart;
            }
        }
        Control::Continue
    }

    /// Auto-repeat of a held key.  Keeps it fresh but never opens the gate.
    pub fn key_repeated(&mut self, key: Key) {
        self.keys.press(key, self.clock_ms);
    }

    pub fn key_released(&mut self, key: Key) {
        self.keys.release(key);
    }

    // ── Frame passes ─────────────────────────────────────────────────────────

    /// Advance the clock and, while playing, move every entity.
    pub fn step_movement(&mut self, delta_ms: u64) {
        self.clock_ms += delta_ms;

        if self.state != RoundState::Playing {
            return;
        }
        for entity in self.world.iter_mut() {
            entity.move_by(delta_ms, &mut self.events);
        }
    }

    /// Collisions, removals, kills, death and swarm logic for this frame.
    ///
    /// The collision scan only runs while playing: a frozen world can still
    /// hold the overlap that ended the round, and it must not be reported
    /// again into the gate.
    pub fn resolve(&mut self) {
        let playing = self.state == RoundState::Playing;
        let mut events = std::mem::take(&mut self.events);

        if playing {
            self.world.scan_collisions(&mut events);
        }

        let mut killed: Vec<EntityId> = Vec::new();
        let mut ship_destroyed = false;
        for event in events.drain(..) {
            match event {
                FrameEvent::LogicRequired => self.logic_required = true,
                FrameEvent::Remove(id) => self.world.remove(id),
                FrameEvent::AlienKilled(id) => {
                    // Two shots on one alien in the same frame is still one kill.
                    if !killed.contains(&id) {
                        killed.push(id);
                    }
                }
                FrameEvent::ShipDestroyed => ship_destroyed = true,
            }
        }
        self.events = events;

        for id in killed {
            self.notify_alien_killed(id);
        }
        self.world.flush_removals();

        if ship_destroyed {
            self.notify_death();
        }

        if self.logic_required {
            if playing {
                self.do_swarm_logic();
            }
            self.logic_required = false;
        }
    }

    /// Turn held keys into ship velocity and, if fire is held, a shot.
    pub fn apply_input(&mut self) {
        self.intent = self.keys.intent(self.clock_ms);
        let playing = self.state == RoundState::Playing;

        if let Some(ship) = self.world.get_mut(self.ship) {
            ship.dx = if playing {
                self.intent.direction() as f64 * SHIP_SPEED
            } else {
                0.0
            };
        }

        if playing && self.intent.fire {
            self.try_fire();
        }
    }

    /// One whole frame without a render pass.
    pub fn frame(&mut self, delta_ms: u64) {
        self.step_movement(delta_ms);
        self.resolve();
        self.apply_input();
    }

    /// Spawn a shot if the cooldown has elapsed.  Returns whether it fired.
    pub fn try_fire(&mut self) -> bool {
        if let Some(last) = self.last_fire_ms {
            if self.clock_ms.saturating_sub(last) < FIRE_COOLDOWN_MS {
                return false;
            }
        }
        let Some(ship) = self.world.get(self.ship) else {
            return false;
        };

        let x = ship.x as i32 + SHOT_OFFSET.0;
        let y = ship.y as i32 + SHOT_OFFSET.1;
        self.last_fire_ms = Some(self.clock_ms);
        self.world
            .add(Entity::shot(Rc::clone(&self.sprites.shot), x as f64, y as f64));
        log::debug!("shot fired from ({x}, {y}) at {}ms", self.clock_ms);
        true
    }

    // ── Outcomes ─────────────────────────────────────────────────────────────

    fn notify_alien_killed(&mut self, id: EntityId) {
        self.alien_count = self.alien_count.saturating_sub(1);
        log::debug!("alien {:?} killed, {} left", id, self.alien_count);

        if self.alien_count == 0 {
            self.end_round(Outcome::Win);
        }

        // Survivors get 2% faster.  The dead alien is still in the world until
        // the flush; its speed no longer matters.
        for alien in self.world.iter_mut().filter(|e| e.is(EntityKind::Alien)) {
            alien.dx *= ALIEN_SPEEDUP;
        }
    }

    fn notify_death(&mut self) {
        self.end_round(Outcome::Lose);
    }

    fn end_round(&mut self, outcome: Outcome) {
        self.message = match outcome {
            Outcome::Win => MSG_WIN,
            Outcome::Lose => MSG_LOSE,
        }
        .to_string();
        self.state = RoundState::Ended(outcome);
        log::info!("round ended: {outcome:?} ({} aliens left)", self.alien_count);
    }

    fn do_swarm_logic(&mut self) {
        for entity in self.world.iter_mut() {
            entity.do_logic();
        }
        log::debug!("swarm reversed");
    }
}
