//! Game state aggregate
//!
//! Everything the frame loop reads or writes lives here: the actor arena,
//! score, camera scroll and the cull queue. Actors are kept sorted by id so
//! iteration order is stable; spawns made during a tick are buffered and
//! appended at the tick boundary.

use std::time::Duration;

use glam::Vec2;

use super::actor::{Actor, ActorId, ActorKind};
use super::cull::CullQueue;
use crate::level::Level;
use crate::score::Score;
use crate::settings::Settings;

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Level description, kept for reloads
    pub level: Level,
    /// Scene tiles and dynamic actors, sorted by id
    pub actors: Vec<Actor>,
    /// Handle of the current player
    pub player: ActorId,
    pub score: Score,
    /// Tick counter since the last (re)load
    pub frame: u64,
    /// Total horizontal scroll applied since the last (re)load
    pub camera_x: f32,
    pub cull: CullQueue,
    /// Actors spawned this tick, not yet visible to collision
    pending: Vec<Actor>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh state from a level
    pub fn new(level: Level, settings: Settings) -> Self {
        let mut state = Self {
            settings,
            level,
            actors: Vec::new(),
            player: ActorId(0),
            score: Score::new(),
            frame: 0,
            camera_x: 0.0,
            cull: CullQueue::new(),
            pending: Vec::new(),
            next_id: 1,
        };
        state.populate();
        state
    }

    /// Throw away all runtime state and rebuild from the level description
    pub fn reload(&mut self) {
        self.actors.clear();
        self.pending.clear();
        self.cull.clear();
        self.score.reset();
        self.frame = 0;
        self.camera_x = 0.0;
        self.next_id = 1;
        self.populate();
        log::info!("Level reloaded ({} actors)", self.actors.len());
    }

    fn populate(&mut self) {
        // Row-major: the player's id sits among the cells in grid order
        let player = self.level.player;
        let mut cells: Vec<_> = self.level.cells.clone();
        cells.push(player);
        cells.sort_by_key(|c| (c.row, c.col));

        for cell in cells {
            let id = self.next_actor_id();
            let actor = Actor::new(id, cell.tile.actor_kind(), cell.position());
            if actor.kind == ActorKind::Player {
                self.player = id;
            }
            self.actors.push(actor);
        }
    }

    /// Allocate a new actor handle
    pub fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.binary_search_by_key(&id, |a| a.id).ok()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.index_of(id).map(|i| &self.actors[i])
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        match self.index_of(id) {
            Some(i) => Some(&mut self.actors[i]),
            None => None,
        }
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actor(self.player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player;
        self.actor_mut(id)
    }

    /// Static scene tiles in id order
    pub fn scene(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.kind.is_static())
    }

    /// Create an actor at the next tick boundary. The returned reference
    /// lets the caller set velocity or facing before it goes live.
    pub fn spawn(&mut self, kind: ActorKind, pos: Vec2) -> &mut Actor {
        let id = self.next_actor_id();
        self.pending.push(Actor::new(id, kind, pos));
        let last = self.pending.len() - 1;
        &mut self.pending[last]
    }

    /// Move buffered spawns into the arena. Ids are increasing, so the
    /// arena stays sorted.
    pub fn flush_spawns(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Spawning {} actors", self.pending.len());
            self.actors.append(&mut self.pending);
        }
    }

    /// Remove an actor from the arena. Absent ids are a no-op.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.index_of(id).map(|i| self.actors.remove(i))
    }

    /// Schedule removal `delay` after `now`
    pub fn schedule_removal(&mut self, id: ActorId, now: Duration, delay: Duration) {
        self.cull.schedule(id, now, delay);
    }

    /// Live (not dead) actors of `kind`, including ones spawned this tick
    pub fn live_count(&self, kind: ActorKind) -> usize {
        self.actors
            .iter()
            .chain(self.pending.iter())
            .filter(|a| a.kind == kind && !a.dead)
            .count()
    }

    /// Shift every actor horizontally (camera scroll)
    pub fn shift_world(&mut self, dx: f32) {
        for actor in self.actors.iter_mut().chain(self.pending.iter_mut()) {
            actor.pos.x += dx;
        }
    }
}
