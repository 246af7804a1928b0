//! Boxfall - A wave-based box-throwing platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, entities, waves, abilities)
//! - `render`: Sprite handles and frame building for an external render sink
//! - `tuning`: Data-driven game balance
//! - `records`: In-process session records

pub mod records;
pub mod render;
pub mod sim;
pub mod tuning;

pub use records::SessionRecords;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed timestep in seconds
    pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Playfield dimensions (screen coordinates, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Gravity added to vertical velocity every tick
    pub const GRAVITY: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPAWN_X: f32 = 400.0;
    pub const PLAYER_SPAWN_Y: f32 = 300.0;
    pub const PLAYER_ACCEL: f32 = 2.0;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    /// Elevated speed cap with the SpeedUp ability
    pub const PLAYER_MAX_SPEED_UP: f32 = 15.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = -70.0;
    pub const PLAYER_BASE_HEALTH: i32 = 3;
    /// Elevated max health with the HealthUp ability
    pub const PLAYER_MAX_HEALTH_UP: i32 = 5;

    /// Knockback impulse from a bullet hit, and its per-tick decay step
    pub const IMPULSE_STRENGTH: f32 = 30.0;
    pub const IMPULSE_DECAY: f32 = 3.0;

    /// Box defaults
    pub const BOX_SIZE: f32 = 30.0;
    /// Horizontal throw speed per held direction key
    pub const THROW_SPEED_X: f32 = 20.0;
    /// Vertical throw velocity: up held / down held / neither
    pub const THROW_SPEED_UP: f32 = -40.0;
    pub const THROW_SPEED_DOWN: f32 = 10.0;
    pub const THROW_SPEED_DEFAULT: f32 = -20.0;
    /// Extra upward pop from the NoGravityThrow ability
    pub const THROW_NO_GRAVITY_POP: f32 = -10.0;

    /// Heart pickup defaults
    pub const HEART_SIZE: f32 = 20.0;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 8.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_HEALTH: i32 = 2;
    pub const ENEMY_COOLDOWN: i32 = 90;
    /// Stretched cooldown after absorbing a frozen box
    pub const ENEMY_COOLDOWN_FROZEN: i32 = 270;

    /// Retaliation ring from the HitBoxes ability
    pub const HIT_BOX_SIZE: f32 = 15.0;
    pub const HIT_BOX_COUNT: u32 = 8;
    pub const HIT_BOX_SPEED: f32 = 12.0;

    /// Box spawn modifier (boxes per enemy), normal and with MoreBoxes
    pub const BOX_MODIFIER: u32 = 2;
    pub const BOX_MODIFIER_MORE: u32 = 4;

    /// Weighted coin flips used by the spawn manager
    pub const HEART_BOX_CHANCE: f64 = 0.25;
    pub const FROZEN_BOX_CHANCE: f64 = 0.3;
    /// Probabilistic dodge from the MissChance ability
    pub const MISS_CHANCE: f64 = 0.5;

    /// Cards offered after a wave, normal and with ChoiceUp
    pub const CARD_COUNT: usize = 2;
    pub const CARD_COUNT_UP: usize = 3;

    /// Ticks spent in GameOver before the session restarts
    pub const GAME_OVER_TICKS: u32 = 120;
}

/// Direction from `from` to `to`, normalized to unit length.
///
/// Returns `None` when the two points coincide so callers can skip
/// aiming instead of dividing by zero.
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length_squared() == 0.0 {
        None
    } else {
        Some(delta.normalize())
    }
}
