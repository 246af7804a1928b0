//! Wave spawning and card sampling
//!
//! Each wave draws enemy and box positions without replacement from two
//! fixed point pools: shuffle a copy, take the first N. No position repeats
//! within one wave; nothing is guaranteed across waves. Counts that exceed
//! a pool clamp to the pool size.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::ability::Ability;
use super::state::{BoxKind, GameState};

/// Enemy spawn points: standing positions on the floor, ledges and the
/// center platform (entity centers).
pub const ENEMY_POINTS: [(f32, f32); 9] = [
    (135.0, 375.0),
    (250.0, 375.0),
    (400.0, 375.0),
    (550.0, 375.0),
    (665.0, 375.0),
    (340.0, 175.0),
    (460.0, 175.0),
    (180.0, 295.0),
    (620.0, 295.0),
];

/// Box spawn points: scattered in the air so boxes drop into place.
pub const BOX_POINTS: [(f32, f32); 16] = [
    (130.0, 300.0),
    (200.0, 300.0),
    (280.0, 300.0),
    (360.0, 300.0),
    (440.0, 300.0),
    (520.0, 300.0),
    (600.0, 300.0),
    (660.0, 300.0),
    (330.0, 130.0),
    (400.0, 130.0),
    (470.0, 130.0),
    (150.0, 200.0),
    (650.0, 200.0),
    (250.0, 150.0),
    (550.0, 150.0),
    (400.0, 280.0),
];

/// Populate the world for the current wave index: enemies from the schedule,
/// boxes at `enemy_count x modifier`, with ability-conditioned box variants.
pub fn generate_wave(state: &mut GameState) {
    let enemy_count = state.scheduled_enemy_count() as usize;
    let abilities = state.world.player.abilities;

    let modifier = if abilities.contains(Ability::MoreBoxes) {
        state.tuning.box_modifier_more
    } else {
        state.tuning.box_modifier
    };
    let box_count = enemy_count * modifier as usize;

    // Draw without replacement: shuffle a copy, take the first N (clamped)
    let mut enemy_points = ENEMY_POINTS;
    enemy_points.shuffle(&mut state.rng);
    let enemy_count = enemy_count.min(enemy_points.len());

    let mut box_points = BOX_POINTS;
    box_points.shuffle(&mut state.rng);
    let box_count = box_count.min(box_points.len());

    // A weighted flip may reserve the first box point for a heart box
    let heart_box = abilities.contains(Ability::HeartBoxes)
        && box_count > 0
        && state.rng.random_bool(state.tuning.heart_box_chance);

    for &(x, y) in &enemy_points[..enemy_count] {
        state.world.spawn_enemy(Vec2::new(x, y), &state.tuning);
    }

    let mut frozen = 0usize;
    for (i, &(x, y)) in box_points[..box_count].iter().enumerate() {
        let kind = if heart_box && i == 0 {
            BoxKind::Heart
        } else if abilities.contains(Ability::FrozenBoxes)
            && state.rng.random_bool(state.tuning.frozen_box_chance)
        {
            frozen += 1;
            BoxKind::Frozen
        } else {
            BoxKind::Plain
        };
        let size = state.tuning.box_size;
        state.world.spawn_box(Vec2::new(x, y), size, kind);
    }

    log::info!(
        "wave {}: {} enemies, {} boxes ({} frozen, heart box: {})",
        state.wave,
        enemy_count,
        box_count,
        frozen,
        heart_box
    );
}

/// Sample the card offer for the end-of-wave choice: a fixed count of
/// unowned abilities drawn without replacement. Fewer remain than the
/// sample size wants: offer what remains. Nothing remains: empty offer,
/// the caller skips the choice step.
pub fn sample_cards(state: &mut GameState) -> Vec<Ability> {
    let count = if state.world.player.abilities.contains(Ability::ChoiceUp) {
        state.tuning.card_count_up
    } else {
        state.tuning.card_count
    };

    let mut pool = state.world.player.abilities.unowned();
    pool.shuffle(&mut state.rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::GamePhase;

    fn state_with_wave(wave: u32) -> GameState {
        let mut state = GameState::new(42, Tuning::default());
        state.world.clear_transients();
        state.wave = wave;
        state
    }

    #[test]
    fn test_enemy_points_are_distinct() {
        let mut state = state_with_wave(4); // schedule: 5 enemies
        generate_wave(&mut state);
        assert_eq!(state.world.enemies.len(), 5);

        let mut positions: Vec<_> = state
            .world
            .enemies
            .iter()
            .map(|e| (e.rect.pos.x as i32, e.rect.pos.y as i32))
            .collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), 5);
        // All drawn from the fixed pool
        for enemy in &state.world.enemies {
            let c = enemy.rect.center();
            assert!(ENEMY_POINTS.contains(&(c.x, c.y)));
        }
    }

    #[test]
    fn test_spawn_pools_lie_inside_the_field() {
        use crate::sim::rect::Rect;
        let tuning = Tuning::default();
        for &(x, y) in ENEMY_POINTS.iter() {
            let rect = Rect::centered(Vec2::new(x, y), tuning.enemy_size);
            assert!(rect.in_bounds(tuning.field_width, tuning.field_height));
        }
        for &(x, y) in BOX_POINTS.iter() {
            let rect = Rect::centered(Vec2::new(x, y), tuning.box_size);
            assert!(rect.in_bounds(tuning.field_width, tuning.field_height));
        }
    }

    #[test]
    fn test_box_count_scales_and_clamps() {
        let mut state = state_with_wave(1); // 2 enemies
        generate_wave(&mut state);
        assert_eq!(state.world.boxes.len(), 4); // 2 x modifier 2

        // MoreBoxes at a big wave exceeds the pool and clamps
        let mut state = state_with_wave(5); // 6 enemies
        let tuning = state.tuning.clone();
        state
            .world
            .player
            .add_ability(Ability::MoreBoxes, &tuning);
        generate_wave(&mut state);
        assert_eq!(state.world.boxes.len(), BOX_POINTS.len()); // 24 clamped to 16
    }

    #[test]
    fn test_plain_waves_have_no_variants() {
        let mut state = state_with_wave(3);
        generate_wave(&mut state);
        assert!(
            state
                .world
                .boxes
                .iter()
                .all(|b| b.kind == BoxKind::Plain)
        );
    }

    #[test]
    fn test_heart_box_appears_with_ability() {
        // The flip is 0.25 per wave; over many regenerations one must land
        let mut state = state_with_wave(2);
        let tuning = state.tuning.clone();
        state
            .world
            .player
            .add_ability(Ability::HeartBoxes, &tuning);

        let mut seen_heart = false;
        for _ in 0..64 {
            state.world.clear_transients();
            generate_wave(&mut state);
            if state
                .world
                .boxes
                .iter()
                .any(|b| b.kind == BoxKind::Heart)
            {
                seen_heart = true;
                break;
            }
        }
        assert!(seen_heart);
    }

    #[test]
    fn test_at_most_one_heart_box_per_wave() {
        let mut state = state_with_wave(5);
        let tuning = state.tuning.clone();
        state
            .world
            .player
            .add_ability(Ability::HeartBoxes, &tuning);
        state
            .world
            .player
            .add_ability(Ability::FrozenBoxes, &tuning);

        for _ in 0..32 {
            state.world.clear_transients();
            generate_wave(&mut state);
            let hearts = state
                .world
                .boxes
                .iter()
                .filter(|b| b.kind == BoxKind::Heart)
                .count();
            assert!(hearts <= 1);
        }
    }

    #[test]
    fn test_card_sample_size() {
        let mut state = state_with_wave(0);
        let cards = sample_cards(&mut state);
        assert_eq!(cards.len(), state.tuning.card_count);

        // No duplicates and none owned
        let mut sorted = cards.clone();
        sorted.sort_by_key(|a| *a as u8);
        sorted.dedup();
        assert_eq!(sorted.len(), cards.len());
    }

    #[test]
    fn test_card_sample_with_choice_up() {
        let mut state = state_with_wave(0);
        let tuning = state.tuning.clone();
        state.world.player.add_ability(Ability::ChoiceUp, &tuning);
        let cards = sample_cards(&mut state);
        assert_eq!(cards.len(), state.tuning.card_count_up);
        assert!(!cards.contains(&Ability::ChoiceUp));
    }

    #[test]
    fn test_card_sample_degrades_when_pool_runs_dry() {
        let mut state = state_with_wave(0);
        let tuning = state.tuning.clone();
        for ability in &Ability::ALL[..Ability::ALL.len() - 1] {
            state.world.player.add_ability(*ability, &tuning);
        }
        // One unowned left: one card, not two
        let cards = sample_cards(&mut state);
        assert_eq!(cards.len(), 1);

        state.world.player.add_ability(cards[0], &tuning);
        assert!(sample_cards(&mut state).is_empty());
        // Phase untouched by sampling itself
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
