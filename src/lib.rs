//! Musu - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (collision detection, resolution, culling)
//! - `level`: Grid level format
//! - `score`: Score counter and display
//! - `anim`: Per-actor visual state hook
//! - `settings`: Viewport and gameplay configuration

pub mod anim;
pub mod level;
pub mod score;
pub mod settings;
pub mod sim;

pub use level::{Level, LevelError};
pub use score::Score;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Level grid cell size (pixels)
    pub const TILE_SIZE: f32 = 32.0;

    /// Gravity added to vy each airborne frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Falling speed cap (pixels/frame)
    pub const TERMINAL_VELOCITY: f32 = 10.0;
    /// Horizontal velocity decay applied to the player while grounded
    pub const VELOCITY_DECAY: f32 = 0.8;

    /// Pixel band used to decide which face of a box was struck
    pub const FACE_TOLERANCE: f32 = 5.0;
    /// Distance under which an actor counts as resting on a surface
    pub const GROUND_TOLERANCE: f32 = 1.0;

    /// Jump impulse (negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;
    /// Rebound after a stomp when jump is not held
    pub const STOMP_BOUNCE: f32 = -5.0;
    /// Rebound after a stomp while jump is held
    pub const STOMP_BOUNCE_HELD: f32 = -8.0;

    /// Walking speed (pixels/frame)
    pub const WALK_SPEED: f32 = 3.0;
    /// Speed with the run modifier held
    pub const RUN_SPEED: f32 = 5.0;
    /// Speed when steering against the jump direction mid-air
    pub const AIR_REVERSE_SPEED: f32 = 2.0;
    /// Horizontal speed under which the player counts as not steering
    pub const DRAG_THRESHOLD: f32 = 1.0;

    /// Player hitbox width as a fraction of sprite width
    pub const PLAYER_HITBOX_RATIO: f32 = 0.75;

    /// Enemy patrol speed (starts walking left)
    pub const ENEMY_SPEED: f32 = 1.0;

    /// Fireball horizontal speed
    pub const FIREBALL_SPEED: f32 = 6.0;
    /// Fireball sprite size
    pub const FIREBALL_SIZE: f32 = 16.0;

    /// Brick fragment impulses: sideways, low arc and high arc
    pub const FRAGMENT_VX: f32 = 2.0;
    pub const FRAGMENT_VY_LOW: f32 = -4.0;
    pub const FRAGMENT_VY_HIGH: f32 = -6.0;

    /// Points for each kill
    pub const KILL_POINTS: u32 = 100;
    /// Score ceiling
    pub const MAX_SCORE: u32 = 999_999;

    /// Fraction of the viewport width past which the camera scrolls right
    pub const SCROLL_RIGHT_EDGE: f32 = 0.75;

    /// Simulation frame length used by the headless driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}
