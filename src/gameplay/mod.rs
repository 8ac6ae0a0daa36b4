//! Gameplay domain: units, commands, AI, combat, and transient effects.

pub mod ai;
pub mod combat;
pub mod command;
pub mod effects;
pub mod formation;
pub mod selection;
pub mod units;

use bevy::prelude::*;

// === Shared Components ===

/// Faction id. Units on different teams are mutually hostile; units on the
/// same team never target each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Reflect)]
pub struct Team(pub u32);

impl Team {
    #[must_use]
    pub fn is_hostile_to(self, other: Self) -> bool {
        self != other
    }
}

/// Hit points. `current` stays within `[0, max]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Derived death flag. The `Dead` tag, not this, gates the other systems.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtracts `amount`, clamping at zero. Returns the remaining health.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount).max(0.0);
        self.current
    }
}

/// Terminal tag. Once attached it is never removed; every other system
/// excludes tagged entities from targeting, movement, and combat.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>().register_type::<Dead>();

    app.add_plugins((
        units::plugin,
        command::plugin,
        ai::plugin,
        combat::plugin,
        effects::plugin,
    ));
}
