//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order within each category)
//! - No rendering or platform dependencies

pub mod ability;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wave;

pub use ability::{Ability, AbilitySet};
pub use collision::{HorizontalHit, VerticalHit, step_horizontal, step_vertical};
pub use rect::Rect;
pub use state::{
    Block, BoxKind, BoxProp, Bullet, Enemy, GamePhase, GameState, Heart, Player, World,
};
pub use tick::{TickInput, tick};
pub use wave::{BOX_POINTS, ENEMY_POINTS, generate_wave};
