//! Combat systems: attacks, projectiles, collisions, death, and cleanup.

mod attack;
mod death;
mod projectile;

use bevy::prelude::*;

use crate::SimSet;
use crate::gameplay::Team;

pub use death::CLEANUP_DELAY_SECS;

// === Constants ===

/// Projectile travel speed (world units per second).
pub const PROJECTILE_SPEED: f32 = 20.0;

/// Seconds a projectile flies before it is discarded.
pub const PROJECTILE_LIFETIME_SECS: f32 = 5.0;

/// A projectile this close to a unit counts as a hit.
pub const HIT_THRESHOLD: f32 = 1.0;

/// Lifetime of the Hit effect when a projectile reaches its bound target.
pub const IMPACT_EFFECT_SECS: f32 = 1.0;

/// Lifetime of the Hit effect when a stray projectile collides with a unit.
pub const COLLISION_EFFECT_SECS: f32 = 0.5;

/// Lifetime of the flash spawned when a ranged unit fires.
pub const MUZZLE_FLASH_SECS: f32 = 0.1;

// === Components ===

/// Attack payload and cooldown state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Damage {
    pub amount: f32,
    /// Attacks per second.
    pub attack_rate: f32,
    pub last_attack_time: f32,
}

impl Damage {
    #[must_use]
    pub const fn new(amount: f32, attack_rate: f32) -> Self {
        Self {
            amount,
            attack_rate,
            last_attack_time: 0.0,
        }
    }

    /// Minimum seconds between two attacks.
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        1.0 / self.attack_rate
    }

    #[must_use]
    pub fn ready(&self, now: f32) -> bool {
        now - self.last_attack_time >= self.cooldown()
    }
}

/// A projectile in flight.
///
/// Spawned by ranged attacks; despawned on hit or when `lifetime` runs out.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub speed: f32,
    /// Unit vector fixed at launch.
    pub direction: Vec3,
    /// Bound target. May have been despawned since launch.
    pub target: Entity,
    pub damage: f32,
    /// Seconds left before the projectile is discarded.
    pub lifetime: f32,
    /// Team of the shooter. Never damages this team.
    pub team: Team,
    resolved: bool,
}

impl Projectile {
    #[must_use]
    pub const fn new(direction: Vec3, target: Entity, damage: f32, team: Team) -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            direction,
            target,
            damage,
            lifetime: PROJECTILE_LIFETIME_SECS,
            team,
            resolved: false,
        }
    }

    /// Whether the projectile has already hit or expired this tick and is
    /// waiting to be despawned.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn resolve(&mut self) {
        self.resolved = true;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Damage>().register_type::<Projectile>();

    app.add_systems(Update, attack::unit_attack.in_set(SimSet::Attack));
    app.add_systems(
        Update,
        projectile::update_projectiles.in_set(SimSet::Projectile),
    );
    app.add_systems(
        Update,
        projectile::detect_collisions.in_set(SimSet::Collision),
    );
    app.add_systems(Update, death::mark_dead.in_set(SimSet::Death));
    app.add_systems(Update, death::cleanup_dead.in_set(SimSet::Cleanup));
}
