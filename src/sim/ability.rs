//! Upgrade abilities and the set of owned upgrades
//!
//! Abilities are permanent rule modifiers granted through the end-of-wave
//! card choice. The owned set is an enum-indexed bitset rather than a keyed
//! map: the enumeration is closed and tiny, and a `u16` of flags keeps
//! lookups branch-free and type-safe.

/// Every recognized upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ability {
    /// Raises the horizontal speed cap
    SpeedUp,
    /// Raises max health (and heals the difference)
    HealthUp,
    /// Spawned boxes may come frozen, stretching enemy cooldowns
    FrozenBoxes,
    /// Spawned waves may include a heart-yielding box
    HeartBoxes,
    /// Thrown boxes fly without gravity, with a small extra pop
    NoGravityThrow,
    /// Coin-flip chance to dodge incoming damage
    MissChance,
    /// No damage while standing still
    Turtle,
    /// Taking damage releases a ring of retaliatory boxes
    HitBoxes,
    /// More boxes per enemy each wave
    MoreBoxes,
    /// One extra card at every choice
    ChoiceUp,
}

impl Ability {
    /// All abilities, in card-deck order
    pub const ALL: [Ability; 10] = [
        Ability::SpeedUp,
        Ability::HealthUp,
        Ability::FrozenBoxes,
        Ability::HeartBoxes,
        Ability::NoGravityThrow,
        Ability::MissChance,
        Ability::Turtle,
        Ability::HitBoxes,
        Ability::MoreBoxes,
        Ability::ChoiceUp,
    ];

    /// Stable identifier, used for card labels and logs
    pub fn name(&self) -> &'static str {
        match self {
            Ability::SpeedUp => "speed-up",
            Ability::HealthUp => "health-up",
            Ability::FrozenBoxes => "frozen-boxes",
            Ability::HeartBoxes => "heart-boxes",
            Ability::NoGravityThrow => "no-gravity-throw",
            Ability::MissChance => "miss-chance",
            Ability::Turtle => "turtle",
            Ability::HitBoxes => "hit-boxes",
            Ability::MoreBoxes => "more-boxes",
            Ability::ChoiceUp => "choice-up",
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// Owned-upgrade flags, one bit per `Ability`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilitySet(u16);

impl AbilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, ability: Ability) -> bool {
        self.0 & ability.bit() != 0
    }

    /// Mark an ability owned. Returns false if it was already owned,
    /// letting callers keep grant side effects idempotent.
    pub fn insert(&mut self, ability: Ability) -> bool {
        if self.contains(ability) {
            return false;
        }
        self.0 |= ability.bit();
        true
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Abilities not yet owned, in deck order
    pub fn unowned(&self) -> Vec<Ability> {
        Ability::ALL
            .iter()
            .copied()
            .filter(|a| !self.contains(*a))
            .collect()
    }
}
