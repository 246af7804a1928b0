//! Sprite handles and frame building
//!
//! The sim never draws. Once per frame it is flattened into an ordered list
//! of (sprite handle, position) pairs and handed to a `RenderSink`; what the
//! sink does with them (blit images, print text, nothing) is its business,
//! and nothing ever flows back.

use glam::Vec2;

use crate::sim::ability::Ability;
use crate::sim::state::{GamePhase, GameState};

/// Stable handle for a named image asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    BlockTile,
    Player,
    BoxPlain,
    BoxFrozen,
    BoxHeart,
    BoxBullet,
    Enemy,
    EnemyFrozen,
    Bullet,
    Heart,
    /// Health bar pips
    UiHeartFull,
    UiHeartEmpty,
    /// One card face per ability
    Card(Ability),
}

/// One positioned image in a frame. Positions are top-left corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    pub pos: Vec2,
}

/// Presentation endpoint for a finished frame
pub trait RenderSink {
    fn present(&mut self, frame: &[Sprite]);
}

/// Sink that discards every frame; used by headless runs and tests
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &[Sprite]) {}
}

/// Health bar layout
const UI_HEART_SPACING: f32 = 40.0;
const UI_HEART_POS: Vec2 = Vec2::new(110.0, 10.0);

/// Card row layout
const CARD_SPACING: f32 = 180.0;
const CARD_Y: f32 = 220.0;

/// Flatten the current state into draw order: world entities by category,
/// then the health bar, then the card row while a choice is open.
pub fn build_frame(state: &GameState) -> Vec<Sprite> {
    let world = &state.world;
    let mut frame = Vec::new();

    for block in &world.blocks {
        frame.push(Sprite {
            id: SpriteId::BlockTile,
            pos: block.rect.pos,
        });
    }
    for prop in &world.boxes {
        let id = match prop.kind {
            crate::sim::state::BoxKind::Plain => SpriteId::BoxPlain,
            crate::sim::state::BoxKind::Frozen => SpriteId::BoxFrozen,
            crate::sim::state::BoxKind::Heart => SpriteId::BoxHeart,
            crate::sim::state::BoxKind::Bullet => SpriteId::BoxBullet,
        };
        frame.push(Sprite {
            id,
            pos: prop.rect.pos,
        });
    }
    for enemy in &world.enemies {
        let id = if enemy.is_frozen(state.tuning.enemy_cooldown) {
            SpriteId::EnemyFrozen
        } else {
            SpriteId::Enemy
        };
        frame.push(Sprite {
            id,
            pos: enemy.rect.pos,
        });
    }
    for bullet in &world.bullets {
        frame.push(Sprite {
            id: SpriteId::Bullet,
            pos: bullet.rect.pos,
        });
    }
    for heart in &world.hearts {
        frame.push(Sprite {
            id: SpriteId::Heart,
            pos: heart.rect.pos,
        });
    }
    frame.push(Sprite {
        id: SpriteId::Player,
        pos: world.player.rect.pos,
    });

    // Health bar: one pip per max health point
    for i in 0..world.player.max_health {
        let id = if i < world.player.health {
            SpriteId::UiHeartFull
        } else {
            SpriteId::UiHeartEmpty
        };
        frame.push(Sprite {
            id,
            pos: UI_HEART_POS + Vec2::new(i as f32 * UI_HEART_SPACING, 0.0),
        });
    }

    if state.phase == GamePhase::ChoosingCard {
        for (i, &card) in state.cards.iter().enumerate() {
            let row_width = state.cards.len() as f32 * CARD_SPACING;
            let x = state.tuning.field_width / 2.0 - row_width / 2.0 + i as f32 * CARD_SPACING;
            frame.push(Sprite {
                id: SpriteId::Card(card),
                pos: Vec2::new(x, CARD_Y),
            });
        }
    }

    frame
}
