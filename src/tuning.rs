//! Data-driven game balance
//!
//! Every hand-tuned gameplay number lives in `Tuning` so balance passes are
//! config edits, not code edits. Defaults mirror `crate::consts`; a JSON
//! file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay balance knobs. All distances are pixels, all times are ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub gravity: f32,

    pub player_size: f32,
    pub player_spawn_x: f32,
    pub player_spawn_y: f32,
    pub player_accel: f32,
    pub player_max_speed: f32,
    pub player_max_speed_up: f32,
    pub player_jump_velocity: f32,
    pub player_base_health: i32,
    pub player_max_health_up: i32,

    pub impulse_strength: f32,
    pub impulse_decay: f32,

    pub box_size: f32,
    pub throw_speed_x: f32,
    pub throw_speed_up: f32,
    pub throw_speed_down: f32,
    pub throw_speed_default: f32,
    pub throw_no_gravity_pop: f32,

    pub heart_size: f32,

    pub bullet_size: f32,
    pub bullet_speed: f32,

    pub enemy_size: f32,
    pub enemy_health: i32,
    pub enemy_cooldown: i32,
    pub enemy_cooldown_frozen: i32,

    pub hit_box_size: f32,
    pub hit_box_count: u32,
    pub hit_box_speed: f32,

    pub box_modifier: u32,
    pub box_modifier_more: u32,
    pub heart_box_chance: f64,
    pub frozen_box_chance: f64,
    pub miss_chance: f64,

    pub card_count: usize,
    pub card_count_up: usize,

    /// Enemy count per wave; restarts from the top once exhausted
    pub wave_schedule: Vec<u32>,

    pub game_over_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,
            gravity: consts::GRAVITY,

            player_size: consts::PLAYER_SIZE,
            player_spawn_x: consts::PLAYER_SPAWN_X,
            player_spawn_y: consts::PLAYER_SPAWN_Y,
            player_accel: consts::PLAYER_ACCEL,
            player_max_speed: consts::PLAYER_MAX_SPEED,
            player_max_speed_up: consts::PLAYER_MAX_SPEED_UP,
            player_jump_velocity: consts::PLAYER_JUMP_VELOCITY,
            player_base_health: consts::PLAYER_BASE_HEALTH,
            player_max_health_up: consts::PLAYER_MAX_HEALTH_UP,

            impulse_strength: consts::IMPULSE_STRENGTH,
            impulse_decay: consts::IMPULSE_DECAY,

            box_size: consts::BOX_SIZE,
            throw_speed_x: consts::THROW_SPEED_X,
            throw_speed_up: consts::THROW_SPEED_UP,
            throw_speed_down: consts::THROW_SPEED_DOWN,
            throw_speed_default: consts::THROW_SPEED_DEFAULT,
            throw_no_gravity_pop: consts::THROW_NO_GRAVITY_POP,

            heart_size: consts::HEART_SIZE,

            bullet_size: consts::BULLET_SIZE,
            bullet_speed: consts::BULLET_SPEED,

            enemy_size: consts::ENEMY_SIZE,
            enemy_health: consts::ENEMY_HEALTH,
            enemy_cooldown: consts::ENEMY_COOLDOWN,
            enemy_cooldown_frozen: consts::ENEMY_COOLDOWN_FROZEN,

            hit_box_size: consts::HIT_BOX_SIZE,
            hit_box_count: consts::HIT_BOX_COUNT,
            hit_box_speed: consts::HIT_BOX_SPEED,

            box_modifier: consts::BOX_MODIFIER,
            box_modifier_more: consts::BOX_MODIFIER_MORE,
            heart_box_chance: consts::HEART_BOX_CHANCE,
            frozen_box_chance: consts::FROZEN_BOX_CHANCE,
            miss_chance: consts::MISS_CHANCE,

            card_count: consts::CARD_COUNT,
            card_count_up: consts::CARD_COUNT_UP,

            wave_schedule: vec![1, 2, 3, 4, 5, 6],

            game_over_ticks: consts::GAME_OVER_TICKS,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults on any error.
    /// Balance files list only the fields they override.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning.sanitized()
                }
                Err(err) => {
                    log::warn!("bad tuning file {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("cannot read {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace values a loaded file can make unusable. The wave schedule
    /// must be non-empty: every wave needs an enemy count.
    fn sanitized(mut self) -> Self {
        if self.wave_schedule.is_empty() {
            log::warn!("empty wave_schedule in tuning file, using the default schedule");
            self.wave_schedule = Self::default().wave_schedule;
        }
        self
    }
}
