//! Game state and core simulation types
//!
//! Entities are concrete structs held in per-category lists on the `World`
//! registry; there is no runtime type inspection. Entity kinds that can be
//! destroyed carry a `u32` id from a per-world counter so removal can be
//! id-based and tolerant of double removal.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ability::{Ability, AbilitySet};
use super::rect::Rect;
use crate::records::SessionRecords;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Modal card choice between waves; the sim is frozen
    ChoosingCard,
    /// Player died; restarts automatically after a short pause
    GameOver,
}

/// A static collision target. Created at layout time, never destroyed.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub rect: Rect,
}

impl Block {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// What a box turns into (or does) on top of being a throwable prop.
/// Variants are mutually exclusive for a box's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Plain,
    /// Stretches an enemy's cooldown when absorbed
    Frozen,
    /// Converts to a heart pickup on landing; enemies refuse to eat it
    Heart,
    /// Disposable projectile: cannot be picked up, breaks on block impact
    Bullet,
}

/// A movable physics prop the player can pick up and throw
#[derive(Debug, Clone)]
pub struct BoxProp {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    /// Gravity suppression flag (NoGravityThrow marks thrown boxes)
    pub gravity: bool,
    pub kind: BoxKind,
}

/// A falling health pickup
#[derive(Debug, Clone)]
pub struct Heart {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
}

/// An enemy projectile. Constant velocity, no gravity, aimed once at launch.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
}

/// A stationary shooter
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub health: i32,
    /// Ticks until the next shot
    pub cooldown: i32,
}

impl Enemy {
    /// Cosmetic frozen indication: the timer was stretched past its base
    /// duration by a frozen box and has not recovered yet.
    pub fn is_frozen(&self, base_cooldown: i32) -> bool {
        self.cooldown > base_cooldown
    }
}

/// The controlled rigid body. Exactly one exists per session.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    /// Transient horizontal knockback, decays toward zero each tick
    pub impulse: f32,
    /// Set by landing on a block, cleared by jumping
    pub grounded: bool,
    /// Id of the currently held box, if any
    pub held_box: Option<u32>,
    pub health: i32,
    pub max_health: i32,
    pub abilities: AbilitySet,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::centered(
                Vec2::new(tuning.player_spawn_x, tuning.player_spawn_y),
                tuning.player_size,
            ),
            vel: Vec2::ZERO,
            impulse: 0.0,
            grounded: false,
            held_box: None,
            health: tuning.player_base_health,
            max_health: tuning.player_base_health,
            abilities: AbilitySet::new(),
        }
    }

    /// Horizontal speed cap, derived from owned abilities
    pub fn max_speed(&self, tuning: &Tuning) -> f32 {
        if self.abilities.contains(Ability::SpeedUp) {
            tuning.player_max_speed_up
        } else {
            tuning.player_max_speed
        }
    }

    /// Grant an ability and re-derive dependent stats. Granting an ability
    /// twice is a no-op: effects never stack on repeat calls.
    pub fn add_ability(&mut self, ability: Ability, tuning: &Tuning) {
        if !self.abilities.insert(ability) {
            return;
        }
        if ability == Ability::HealthUp {
            let gained = tuning.player_max_health_up - self.max_health;
            self.max_health = tuning.player_max_health_up;
            self.health = (self.health + gained).min(self.max_health);
        }
        log::info!("ability granted: {}", ability.name());
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Stationary for Turtle purposes: no horizontal motion while grounded
    pub fn is_stationary(&self) -> bool {
        self.vel.x == 0.0 && self.grounded
    }

    /// Teleport back to the spawn point (out-of-bounds recovery)
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.rect = Rect::centered(
            Vec2::new(tuning.player_spawn_x, tuning.player_spawn_y),
            tuning.player_size,
        );
        self.vel = Vec2::ZERO;
        self.impulse = 0.0;
    }
}

/// Owns all live entities, one list per category. Category membership is
/// exclusive for an entity's lifetime: a heart-box becomes a heart by box
/// removal plus heart insertion. Lists keep insertion order; removal is
/// id-based and silently tolerates absent ids.
#[derive(Debug, Clone)]
pub struct World {
    pub blocks: Vec<Block>,
    pub boxes: Vec<BoxProp>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub hearts: Vec<Heart>,
    pub player: Player,
    next_id: u32,
}

impl World {
    /// Fresh world with the fixed level layout and a new player
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            blocks: level_layout(),
            boxes: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            hearts: Vec::new(),
            player: Player::new(tuning),
            next_id: 1,
        }
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_box(&mut self, pos: Vec2, size: f32, kind: BoxKind) -> u32 {
        let id = self.next_entity_id();
        self.boxes.push(BoxProp {
            id,
            rect: Rect::centered(pos, size),
            vel: Vec2::ZERO,
            gravity: true,
            kind,
        });
        id
    }

    pub fn spawn_enemy(&mut self, pos: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            rect: Rect::centered(pos, tuning.enemy_size),
            health: tuning.enemy_health,
            cooldown: tuning.enemy_cooldown,
        });
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            rect: Rect::centered(pos, tuning.bullet_size),
            vel,
        });
        id
    }

    pub fn spawn_heart(&mut self, pos: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.hearts.push(Heart {
            id,
            rect: Rect::centered(pos, tuning.heart_size),
            vel: Vec2::ZERO,
        });
        id
    }

    /// Remove a box by id. No-op (None) when the id is already gone, which
    /// happens legitimately when two effects consume the same box in quick
    /// succession.
    pub fn remove_box(&mut self, id: u32) -> Option<BoxProp> {
        let idx = self.boxes.iter().position(|b| b.id == id)?;
        if self.player.held_box == Some(id) {
            self.player.held_box = None;
        }
        Some(self.boxes.remove(idx))
    }

    pub fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    pub fn remove_bullet(&mut self, id: u32) -> Option<Bullet> {
        let idx = self.bullets.iter().position(|b| b.id == id)?;
        Some(self.bullets.remove(idx))
    }

    pub fn remove_heart(&mut self, id: u32) -> Option<Heart> {
        let idx = self.hearts.iter().position(|h| h.id == id)?;
        Some(self.hearts.remove(idx))
    }

    /// Clear everything that does not survive between waves
    pub fn clear_transients(&mut self) {
        self.boxes.clear();
        self.enemies.clear();
        self.bullets.clear();
        self.hearts.clear();
        self.player.held_box = None;
    }
}

/// The fixed level geometry: floor, ceiling, side walls, and platforms.
/// Stable insertion order here pins the collision resolution order.
pub fn level_layout() -> Vec<Block> {
    vec![
        Block::new(0.0, 400.0, 800.0, 200.0),   // floor
        Block::new(0.0, 0.0, 800.0, 100.0),     // ceiling
        Block::new(300.0, 200.0, 200.0, 50.0),  // center platform
        Block::new(0.0, 0.0, 100.0, 600.0),     // left wall
        Block::new(700.0, 0.0, 100.0, 600.0),   // right wall
        Block::new(120.0, 320.0, 120.0, 30.0),  // left ledge
        Block::new(560.0, 320.0, 120.0, 30.0),  // right ledge
    ]
}

/// Complete game state for one process run. Sessions (world + wave counter)
/// reset on death; the RNG, tuning and records persist across sessions.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Monotonic wave counter; indexes the schedule modulo its length
    pub wave: u32,
    pub phase: GamePhase,
    /// Ticks remaining in the GameOver pause
    pub game_over_ticks: u32,
    /// Cards on offer while in ChoosingCard
    pub cards: Vec<Ability>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub records: SessionRecords,
}

impl GameState {
    /// Create a new game state with the given seed and spawn wave 0
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world: World::new(&tuning),
            tuning,
            wave: 0,
            phase: GamePhase::Playing,
            game_over_ticks: 0,
            cards: Vec::new(),
            time_ticks: 0,
            records: SessionRecords::new(),
        };
        super::wave::generate_wave(&mut state);
        state
    }

    /// Enemy count the schedule prescribes for the current wave. The
    /// schedule restarts from the top once exhausted; an empty schedule
    /// (possible when `Tuning` is built by hand) degrades to one enemy.
    pub fn scheduled_enemy_count(&self) -> u32 {
        let schedule = &self.tuning.wave_schedule;
        if schedule.is_empty() {
            return 1;
        }
        schedule[self.wave as usize % schedule.len()]
    }

    /// End the current session and start a fresh one: new world, player at
    /// full base health, abilities cleared, wave counter back to the top.
    pub fn restart_session(&mut self) {
        log::info!(
            "session over at wave {}, starting fresh (best so far: {:?})",
            self.wave,
            self.records.best_wave()
        );
        self.world = World::new(&self.tuning);
        self.wave = 0;
        self.cards.clear();
        self.phase = GamePhase::Playing;
        self.game_over_ticks = 0;
        super::wave::generate_wave(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_removal_is_noop_when_absent() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let id = world.spawn_box(Vec2::new(400.0, 300.0), 30.0, BoxKind::Plain);

        assert!(world.remove_box(id).is_some());
        // Double removal tolerated
        assert!(world.remove_box(id).is_none());
        assert!(world.remove_enemy(999).is_none());
        assert!(world.remove_bullet(999).is_none());
        assert!(world.remove_heart(999).is_none());
    }

    #[test]
    fn test_removing_held_box_clears_hold() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let id = world.spawn_box(Vec2::new(400.0, 300.0), 30.0, BoxKind::Plain);
        world.player.held_box = Some(id);

        world.remove_box(id);
        assert_eq!(world.player.held_box, None);
    }

    #[test]
    fn test_add_ability_is_idempotent() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        player.add_ability(Ability::SpeedUp, &tuning);
        let cap = player.max_speed(&tuning);
        assert_eq!(cap, tuning.player_max_speed_up);

        player.add_ability(Ability::SpeedUp, &tuning);
        assert_eq!(player.max_speed(&tuning), cap);
    }

    #[test]
    fn test_health_up_rederives_and_heals_once() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.health = 2;

        player.add_ability(Ability::HealthUp, &tuning);
        assert_eq!(player.max_health, tuning.player_max_health_up);
        assert_eq!(player.health, 4);

        player.add_ability(Ability::HealthUp, &tuning);
        assert_eq!(player.max_health, tuning.player_max_health_up);
        assert_eq!(player.health, 4);
    }

    #[test]
    fn test_heal_is_capped() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.heal(5);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_wave_schedule_wraps() {
        let mut state = GameState::new(7, Tuning::default());
        let schedule = state.tuning.wave_schedule.clone();

        state.wave = schedule.len() as u32; // one past the end
        assert_eq!(state.scheduled_enemy_count(), schedule[0]);
        state.wave = schedule.len() as u32 + 2;
        assert_eq!(state.scheduled_enemy_count(), schedule[2]);
    }

    #[test]
    fn test_empty_schedule_degrades_to_one_enemy() {
        let tuning = Tuning {
            wave_schedule: Vec::new(),
            ..Tuning::default()
        };
        let state = GameState::new(7, tuning);
        assert_eq!(state.scheduled_enemy_count(), 1);
        assert_eq!(state.world.enemies.len(), 1);
    }

    #[test]
    fn test_restart_session_resets_world() {
        let mut state = GameState::new(7, Tuning::default());
        state.world.player.health = 0;
        state.world.player.abilities.insert(Ability::Turtle);
        state.wave = 5;

        state.restart_session();
        assert_eq!(state.wave, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.world.player.health, state.tuning.player_base_health);
        assert!(state.world.player.abilities.is_empty());
        // Fresh wave spawned
        assert!(!state.world.enemies.is_empty());
    }
}
