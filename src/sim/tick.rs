//! Frame loop
//!
//! One call to [`tick`] advances the game by one frame: input, per-actor
//! resolution and integration, outcome application, animation, camera
//! scroll, bounds checks, deferred removals, and finally buffered spawns.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{ActorId, ActorKind, Facing};
use super::cull::Clock;
use super::interaction::Outcome;
use super::resolve::{Contact, resolve};
use super::state::GameState;
use crate::anim::Animator;
use crate::consts::*;

/// Decoded directional command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Command {
    Up,
    Left,
    Right,
    #[default]
    None,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional commands currently held, applied in order
    pub commands: Vec<Command>,
    /// Run modifier
    pub run: bool,
    /// Cast a fireball
    pub fire: bool,
    /// Spawn an enemy at the right edge (debug)
    pub spawn_enemy: bool,
    /// Grow or shrink the player (debug)
    pub toggle_growth: bool,
}

/// Something the frame loop did that the UI or audio may care about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { id: ActorId },
    BrickBroken { id: ActorId },
    FireballCast { id: ActorId },
    EnemySpawned { id: ActorId },
    PlayerDied,
    ActorRemoved { id: ActorId },
    LevelReloaded,
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    /// Camera scroll applied this tick (pixels, world moved left by it)
    pub scroll: f32,
    /// Points scored this tick
    pub points: u32,
}

impl TickResult {
    pub fn reloaded(&self) -> bool {
        self.events.contains(&GameEvent::LevelReloaded)
    }
}

/// Advance the game by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    clock: &dyn Clock,
    animator: &mut dyn Animator,
) -> TickResult {
    let now = clock.now();
    let mut result = TickResult::default();
    state.frame += 1;

    apply_input(state, input, &mut result);

    for index in resolution_order(state) {
        step_actor(state, index, now, &mut result);
    }

    for actor in &state.actors {
        animator.advance(actor, state.frame);
    }

    result.scroll = scroll_camera(state);
    cull_out_of_bounds(state, now, &mut result);
    process_culls(state, now, &mut result);
    state.flush_spawns();

    result
}

/// Horizontal scroll for a player at `player_x`. The world only scrolls
/// right; there is no scroll-back.
pub fn camera_offset(player_x: f32, viewport_width: f32) -> f32 {
    let edge = viewport_width * SCROLL_RIGHT_EDGE;
    if player_x > edge {
        player_x - edge
    } else {
        0.0
    }
}

fn apply_input(state: &mut GameState, input: &TickInput, result: &mut TickResult) {
    if let Some(player) = state.player_mut().filter(|p| !p.dead) {
        player.jump_held = input.commands.contains(&Command::Up);
        for &command in &input.commands {
            player.apply_command(command, input.run);
        }
        if input.toggle_growth && !player.grow() {
            player.shrink();
        }
    }

    if input.fire {
        cast_fireball(state, result);
    }

    if input.spawn_enemy {
        let pos = Vec2::new(state.settings.viewport_width - 50.0, 0.0);
        let id = state.spawn(ActorKind::Enemy, pos).id;
        log::debug!("Spawned enemy {id}");
        result.events.push(GameEvent::EnemySpawned { id });
    }
}

fn cast_fireball(state: &mut GameState, result: &mut TickResult) {
    if state.live_count(ActorKind::Fireball) >= state.settings.max_fireballs {
        return;
    }
    let Some(player) = state.player().filter(|p| !p.dead) else {
        return;
    };

    let hitbox = player.hitbox();
    let facing = player.facing;
    let x = match facing {
        Facing::Right => hitbox.right(),
        Facing::Left => hitbox.left() - FIREBALL_SIZE,
    };
    let y = hitbox.top() + (hitbox.h - FIREBALL_SIZE) / 2.0;

    let fireball = state.spawn(ActorKind::Fireball, Vec2::new(x, y));
    fireball.vel.x = facing.sign() * FIREBALL_SPEED;
    fireball.facing = facing;
    let id = fireball.id;

    log::debug!("Fireball {id} cast");
    result.events.push(GameEvent::FireballCast { id });
}

/// Player first, then every other actor in id order. The player going
/// first means a stomp always lands before the enemy's own side check.
fn resolution_order(state: &GameState) -> Vec<usize> {
    let player = state.player;
    let mut order: Vec<usize> = Vec::with_capacity(state.actors.len());
    order.extend(state.actors.iter().position(|a| a.id == player));
    order.extend(
        state
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.id != player && !a.kind.is_static())
            .map(|(i, _)| i),
    );
    order
}

fn step_actor(state: &mut GameState, index: usize, now: Duration, result: &mut TickResult) {
    let mut me = state.actors[index];
    if me.dead || me.kind.is_static() {
        return;
    }

    if !me.is_finite() {
        log::warn!("Actor {} ({:?}) has non-finite state, removing", me.id, me.kind);
        retire(state, me.id, now, result);
        return;
    }

    let contacts = resolve(&mut me, &state.actors);
    state.actors[index] = me;

    for contact in contacts {
        apply_outcome(state, me.id, contact, now, result);
    }

    let me = &mut state.actors[index];
    if !me.dead {
        me.integrate();
    }
}

fn apply_outcome(
    state: &mut GameState,
    self_id: ActorId,
    contact: Contact,
    now: Duration,
    result: &mut TickResult,
) {
    match contact.outcome {
        Outcome::Bounce | Outcome::Kill => kill(state, contact.other, now, result),
        Outcome::Killed => kill(state, self_id, now, result),
        Outcome::MutualKill => {
            kill(state, contact.other, now, result);
            kill(state, self_id, now, result);
        }
        Outcome::Break => break_brick(state, contact.other, now, result),
        Outcome::None | Outcome::Block | Outcome::DragAlign | Outcome::Reverse => {}
    }
}

/// Combat death. Enemies score and linger, the player lingers then
/// reloads the level, anything else disappears right away.
fn kill(state: &mut GameState, id: ActorId, now: Duration, result: &mut TickResult) {
    let kind = match state.actor_mut(id) {
        Some(actor) if !actor.dead => {
            actor.kill();
            actor.kind
        }
        _ => return,
    };

    let linger = state.settings.death_linger();
    match kind {
        ActorKind::Enemy => {
            let points = state.score.add(KILL_POINTS);
            result.points += points;
            state.schedule_removal(id, now, linger);
            log::debug!("Enemy {id} killed, score {}", state.score);
            result.events.push(GameEvent::EnemyKilled { id });
        }
        ActorKind::Player => {
            state.schedule_removal(id, now, linger);
            log::debug!("Player {id} died");
            result.events.push(GameEvent::PlayerDied);
        }
        _ => state.schedule_removal(id, now, Duration::ZERO),
    }
}

/// Non-combat removal (fell out of the world, left the screen, bad state).
/// No points; a player still goes through the death linger.
fn retire(state: &mut GameState, id: ActorId, now: Duration, result: &mut TickResult) {
    let kind = match state.actor_mut(id) {
        Some(actor) if !actor.dead => {
            actor.kill();
            actor.kind
        }
        _ => return,
    };

    if kind == ActorKind::Player {
        let linger = state.settings.death_linger();
        state.schedule_removal(id, now, linger);
        result.events.push(GameEvent::PlayerDied);
    } else {
        state.schedule_removal(id, now, Duration::ZERO);
    }
}

/// Shatter a brick into four fragments thrown up and outward
fn break_brick(state: &mut GameState, id: ActorId, now: Duration, result: &mut TickResult) {
    let (origin, size) = match state.actor_mut(id) {
        Some(brick) if !brick.dead && brick.kind == ActorKind::Brick => {
            brick.kill();
            (brick.pos, brick.size)
        }
        _ => return,
    };
    state.schedule_removal(id, now, Duration::ZERO);

    let half = size / 2.0;
    let pieces = [
        (Vec2::ZERO, Vec2::new(-FRAGMENT_VX, FRAGMENT_VY_HIGH)),
        (Vec2::new(half.x, 0.0), Vec2::new(FRAGMENT_VX, FRAGMENT_VY_HIGH)),
        (Vec2::new(0.0, half.y), Vec2::new(-FRAGMENT_VX, FRAGMENT_VY_LOW)),
        (half, Vec2::new(FRAGMENT_VX, FRAGMENT_VY_LOW)),
    ];

    let lifetime = state.settings.fragment_lifetime();
    for (offset, vel) in pieces {
        let fragment = state.spawn(ActorKind::BrickFragment, origin + offset);
        fragment.vel = vel;
        fragment.set_size(half);
        let fragment_id = fragment.id;
        state.schedule_removal(fragment_id, now, lifetime);
    }

    log::debug!("Brick {id} broken");
    result.events.push(GameEvent::BrickBroken { id });
}

/// Keep the player left of the scroll edge by moving the whole world
fn scroll_camera(state: &mut GameState) -> f32 {
    let Some(player) = state.player() else {
        return 0.0;
    };
    let offset = camera_offset(player.pos.x, state.settings.viewport_width);
    if offset > 0.0 {
        state.shift_world(-offset);
        state.camera_x += offset;
    }
    offset
}

/// Anything below the viewport has fallen out; fireballs also expire when
/// they leave it sideways
fn cull_out_of_bounds(state: &mut GameState, now: Duration, result: &mut TickResult) {
    let width = state.settings.viewport_width;
    let height = state.settings.viewport_height;

    let gone: Vec<ActorId> = state
        .actors
        .iter()
        .filter(|a| !a.dead && !a.kind.is_static())
        .filter(|a| {
            let b = a.bounds();
            let fell = b.top() > height;
            let off_side = a.kind == ActorKind::Fireball && (b.right() < 0.0 || b.left() > width);
            fell || off_side
        })
        .map(|a| a.id)
        .collect();

    for id in gone {
        retire(state, id, now, result);
    }
}

/// Remove actors whose deadline has passed. A player removal reloads the
/// level, which also discards everything else that was due.
fn process_culls(state: &mut GameState, now: Duration, result: &mut TickResult) {
    for id in state.cull.drain_due(now) {
        let Some(actor) = state.remove(id) else {
            continue;
        };
        result.events.push(GameEvent::ActorRemoved { id });

        if actor.kind == ActorKind::Player {
            state.reload();
            result.events.push(GameEvent::LevelReloaded);
            break;
        }
    }
}
