//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one call to [`tick`] per frame
//! - Stable iteration order (player first, then by actor id)
//! - Time only through an injected [`Clock`]
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod cull;
pub mod geom;
pub mod interaction;
pub mod resolve;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, ActorKind, Facing};
pub use collision::{WallSide, ceiling_collision, close_enough, floor_collision, wall_collision};
pub use cull::{Clock, CullQueue, ManualClock, MonotonicClock};
pub use geom::{Rect, Span};
pub use interaction::{Face, Outcome, collide_actor, passes_through};
pub use resolve::{Contact, resolve};
pub use state::GameState;
pub use tick::{Command, GameEvent, TickInput, TickResult, camera_offset, tick};
