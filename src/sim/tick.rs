//! Fixed timestep simulation tick
//!
//! One call advances one frame. Update order within a tick: player, boxes,
//! enemies, bullets, hearts, then the death and wave-completion checks.
//! Passes iterate live lists by index and defer their own removals to the
//! end of the pass, so an entity consumed mid-tick is never updated again
//! that tick.

use glam::Vec2;
use rand::Rng;

use super::ability::Ability;
use super::collision::{step_horizontal, step_vertical};
use super::state::{BoxKind, GamePhase, GameState};
use super::wave::{generate_wave, sample_cards};
use crate::aim_direction;

/// Held logical actions for a single tick, plus one-shot signals.
/// The core only ever asks "is this action currently held".
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    /// Pick up / carry a box while held; releasing throws
    pub hold: bool,
    /// Card index chosen this tick (ChoosingCard phase only)
    pub select: Option<usize>,
    /// Top-level quit signal, checked by the runner loop
    pub quit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Playing => {
            update_player(state, input);
            update_boxes(state);
            update_enemies(state);
            update_bullets(state);
            update_hearts(state);

            if state.world.player.health <= 0 {
                enter_game_over(state);
            } else if state.world.enemies.is_empty() {
                finish_wave(state);
            }
        }

        GamePhase::ChoosingCard => {
            if let Some(index) = input.select {
                // Out-of-range picks are ignored; the choice stays modal
                if let Some(&ability) = state.cards.get(index) {
                    state.world.player.add_ability(ability, &state.tuning);
                    state.cards.clear();
                    advance_wave(state);
                }
            }
        }

        GamePhase::GameOver => {
            state.game_over_ticks = state.game_over_ticks.saturating_sub(1);
            if state.game_over_ticks == 0 {
                state.restart_session();
            }
        }
    }
}

/// Damage the player by one point, applying mitigation abilities in order:
/// Turtle (no damage while stationary) short-circuits first, then MissChance
/// rolls a dodge. HitBoxes retaliates with a ring of bullet-boxes when the
/// damage actually lands.
pub fn lose_health(state: &mut GameState) {
    let abilities = state.world.player.abilities;

    if abilities.contains(Ability::Turtle) && state.world.player.is_stationary() {
        log::debug!("turtle absorbed a hit");
        return;
    }
    if abilities.contains(Ability::MissChance) && state.rng.random_bool(state.tuning.miss_chance) {
        log::debug!("dodged a hit");
        return;
    }

    state.world.player.health -= 1;
    log::debug!(
        "player hit, health {}/{}",
        state.world.player.health,
        state.world.player.max_health
    );

    if abilities.contains(Ability::HitBoxes) {
        spawn_retaliation_ring(state);
    }
}

/// Eight bullet-boxes in a ring around the player, flying outward
fn spawn_retaliation_ring(state: &mut GameState) {
    let center = state.world.player.rect.center();
    let count = state.tuning.hit_box_count;
    let offset = state.tuning.player_size / 2.0 + state.tuning.hit_box_size;

    for i in 0..count {
        let angle = i as f32 * std::f32::consts::TAU / count as f32;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let size = state.tuning.hit_box_size;
        let speed = state.tuning.hit_box_speed;
        let id = state
            .world
            .spawn_box(center + dir * offset, size, BoxKind::Bullet);
        if let Some(prop) = state.world.boxes.iter_mut().find(|b| b.id == id) {
            prop.vel = dir * speed;
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let world = &mut state.world;
    let blocks = &world.blocks;
    let player = &mut world.player;

    // Horizontal acceleration model: ramp toward the cap, snap to zero when
    // directions cancel or nothing is held
    let cap = player.max_speed(tuning);
    if input.left == input.right {
        player.vel.x = 0.0;
    } else if input.right {
        player.vel.x = (player.vel.x + tuning.player_accel).min(cap);
    } else {
        player.vel.x = (player.vel.x - tuning.player_accel).max(-cap);
    }

    if input.jump && player.grounded {
        player.grounded = false;
        player.vel.y = tuning.player_jump_velocity;
    }

    // Knockback impulse decays toward zero by a fixed step
    if player.impulse > 0.0 {
        player.impulse = (player.impulse - tuning.impulse_decay).max(0.0);
    } else if player.impulse < 0.0 {
        player.impulse = (player.impulse + tuning.impulse_decay).min(0.0);
    }

    // Horizontal pass; any wall contact eats the remaining impulse
    let dx = player.vel.x + player.impulse;
    let h = step_horizontal(&mut player.rect, dx, blocks.iter().map(|b| &b.rect));
    if h.any() {
        player.impulse = 0.0;
    }

    // Vertical pass
    player.vel.y += tuning.gravity;
    let v = step_vertical(&mut player.rect, player.vel.y, blocks.iter().map(|b| &b.rect));
    if v.landed {
        player.grounded = true;
        player.vel.y = 0.0;
    } else if v.ceiling {
        player.vel.y = 0.0;
    }

    // Escaped the playfield entirely: teleport home rather than clamping
    if player.rect.pos.x < 0.0
        || player.rect.pos.y < 0.0
        || player.rect.pos.x > tuning.field_width
        || player.rect.pos.y > tuning.field_height
    {
        log::debug!("player escaped the field, respawning");
        player.respawn(tuning);
    }

    resolve_hold(state, input);
}

/// Box pickup, carry and throw
fn resolve_hold(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let world = &mut state.world;
    let player = &mut world.player;
    let boxes = &mut world.boxes;

    if input.hold {
        if player.held_box.is_none() {
            // Pick up the first overlapping box; spent bullet-boxes refuse
            let grabbed = boxes
                .iter()
                .find(|b| b.kind != BoxKind::Bullet && b.rect.overlaps(&player.rect))
                .map(|b| b.id);
            if let Some(id) = grabbed {
                player.held_box = Some(id);
            }
        }
        // Carried box rides pinned to the player, physics frozen. Inside
        // the player rect the box cannot overlap a block the player clears,
        // so a release never starts inside a wall.
        if let Some(id) = player.held_box {
            if let Some(prop) = boxes.iter_mut().find(|b| b.id == id) {
                prop.rect = super::rect::Rect::centered(player.rect.center(), prop.rect.size.x);
                prop.vel = Vec2::ZERO;
            } else {
                // Consumed out from under us (e.g. by an enemy)
                player.held_box = None;
            }
        }
    } else if let Some(id) = player.held_box.take() {
        // Release: impart velocity from the held direction keys
        if let Some(prop) = boxes.iter_mut().find(|b| b.id == id) {
            let vx = if input.left == input.right {
                0.0
            } else if input.right {
                tuning.throw_speed_x
            } else {
                -tuning.throw_speed_x
            };
            let mut vy = if input.up == input.down {
                tuning.throw_speed_default
            } else if input.up {
                tuning.throw_speed_up
            } else {
                tuning.throw_speed_down
            };

            prop.gravity = !player.abilities.contains(Ability::NoGravityThrow);
            if !prop.gravity {
                vy += tuning.throw_no_gravity_pop;
            }
            prop.vel = Vec2::new(vx, vy);
        }
    }
}

/// Free boxes: gravity, both collision passes, variant reactions on impact
fn update_boxes(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    let held = state.world.player.held_box;
    let world = &mut state.world;
    let blocks = &world.blocks;
    let boxes = &mut world.boxes;

    let mut to_remove: Vec<u32> = Vec::new();
    let mut hearts_to_spawn: Vec<Vec2> = Vec::new();

    for prop in boxes.iter_mut() {
        if held == Some(prop.id) {
            continue;
        }

        let h = step_horizontal(&mut prop.rect, prop.vel.x, blocks.iter().map(|b| &b.rect));
        if h.any() {
            if prop.kind == BoxKind::Bullet {
                to_remove.push(prop.id);
                continue;
            }
            // Bounce off walls at half speed
            prop.vel.x = -prop.vel.x / 2.0;
        }

        if prop.gravity {
            prop.vel.y += gravity;
        }
        let v = step_vertical(&mut prop.rect, prop.vel.y, blocks.iter().map(|b| &b.rect));
        if v.landed {
            prop.vel.y = 0.0;
            prop.vel.x /= 2.0; // skid to rest
            match prop.kind {
                BoxKind::Heart => {
                    hearts_to_spawn.push(prop.rect.center());
                    to_remove.push(prop.id);
                }
                BoxKind::Bullet => to_remove.push(prop.id),
                _ => {}
            }
        } else if v.ceiling {
            prop.vel.y = 0.0;
        }
    }

    for id in to_remove {
        world.remove_box(id);
    }
    for pos in hearts_to_spawn {
        world.spawn_heart(pos, &state.tuning);
    }
}

/// Enemy pass: absorb one overlapping box, then tick the shoot timer
fn update_enemies(state: &mut GameState) {
    let mut dead: Vec<u32> = Vec::new();

    for i in 0..state.world.enemies.len() {
        let enemy_rect = state.world.enemies[i].rect;

        // First overlapping box that is not a heart-box gets consumed.
        // Heart-boxes are ignored entirely, not eaten.
        let absorbed = state
            .world
            .boxes
            .iter()
            .find(|b| b.kind != BoxKind::Heart && b.rect.overlaps(&enemy_rect))
            .map(|b| (b.id, b.kind));
        if let Some((box_id, kind)) = absorbed {
            state.world.remove_box(box_id);
            let enemy = &mut state.world.enemies[i];
            enemy.health -= 1;
            if kind == BoxKind::Frozen {
                enemy.cooldown = state.tuning.enemy_cooldown_frozen;
            }
            if enemy.health <= 0 {
                dead.push(enemy.id);
                continue;
            }
        }

        // Shoot timer runs independently of absorption
        state.world.enemies[i].cooldown -= 1;
        if state.world.enemies[i].cooldown <= 0 {
            let from = state.world.enemies[i].rect.center();
            let to = state.world.player.rect.center();
            // Coincident positions give no aim; skip this tick and retry
            if let Some(dir) = aim_direction(from, to) {
                let vel = dir * state.tuning.bullet_speed;
                state.world.spawn_bullet(from, vel, &state.tuning);
                state.world.enemies[i].cooldown = state.tuning.enemy_cooldown;
            }
        }
    }

    for id in dead {
        state.world.remove_enemy(id);
    }
}

/// Bullets fly straight; blocks stop them, the player absorbs them
fn update_bullets(state: &mut GameState) {
    let mut to_remove: Vec<u32> = Vec::new();
    let mut hits = 0u32;
    let mut last_hit_dir = 0.0f32;

    for bullet in state.world.bullets.iter_mut() {
        bullet.rect.pos += bullet.vel;

        if state.world.blocks.iter().any(|b| bullet.rect.overlaps(&b.rect)) {
            to_remove.push(bullet.id);
            continue;
        }
        if bullet.rect.overlaps(&state.world.player.rect) {
            hits += 1;
            last_hit_dir = bullet.vel.x;
            to_remove.push(bullet.id);
        }
    }

    for id in to_remove {
        state.world.remove_bullet(id);
    }
    for _ in 0..hits {
        // Knockback pushes the player along the bullet's travel direction
        if last_hit_dir != 0.0 {
            state.world.player.impulse = last_hit_dir.signum() * state.tuning.impulse_strength;
        }
        lose_health(state);
    }
}

/// Hearts fall until blocked, heal on player touch
fn update_hearts(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    let world = &mut state.world;
    let blocks = &world.blocks;
    let player_rect = world.player.rect;

    let mut touched: Vec<u32> = Vec::new();
    for heart in world.hearts.iter_mut() {
        heart.vel.y += gravity;
        let v = step_vertical(&mut heart.rect, heart.vel.y, blocks.iter().map(|b| &b.rect));
        if v.any() {
            heart.vel.y = 0.0;
        }
        if heart.rect.overlaps(&player_rect) {
            touched.push(heart.id);
        }
    }

    for id in touched {
        if world.remove_heart(id).is_some() {
            world.player.heal(1);
        }
    }
}

/// Wave cleared: quiesce the world, then offer cards (or advance straight
/// through when every ability is already owned)
fn finish_wave(state: &mut GameState) {
    state.world.clear_transients();

    // Residual motion must not carry into the next wave: velocity zeroed
    // except the baseline gravity value, impulse cleared
    let player = &mut state.world.player;
    player.vel = Vec2::new(0.0, state.tuning.gravity);
    player.impulse = 0.0;

    let cards = sample_cards(state);
    if cards.is_empty() {
        advance_wave(state);
    } else {
        log::info!(
            "wave {} cleared, offering: {:?}",
            state.wave,
            cards.iter().map(|c| c.name()).collect::<Vec<_>>()
        );
        state.cards = cards;
        state.phase = GamePhase::ChoosingCard;
    }
}

fn advance_wave(state: &mut GameState) {
    state.wave += 1;
    state.phase = GamePhase::Playing;
    generate_wave(state);
}

fn enter_game_over(state: &mut GameState) {
    log::info!("player died on wave {}", state.wave);
    state.phase = GamePhase::GameOver;
    state.game_over_ticks = state.tuning.game_over_ticks;
    let (wave, ticks) = (state.wave, state.time_ticks);
    state.records.push(wave, ticks);
}
