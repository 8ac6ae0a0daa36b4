//! Transient visual-effect entities (hits, deaths, muzzle flashes).

use bevy::prelude::*;

use crate::SimSet;
use crate::deferred::SimCommandsExt;

/// Kinds of transient effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EffectKind {
    Death,
    Hit,
    MuzzleFlash,
    /// Never spawned by the simulation itself.
    Explosion,
}

/// A short-lived effect at a fixed position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Effect {
    pub kind: EffectKind,
    pub duration: f32,
    pub started_at: f32,
    pub position: Vec3,
}

impl Effect {
    #[must_use]
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.started_at >= self.duration
    }
}

/// Queue an effect entity starting at `now`.
pub fn spawn_effect(
    commands: &mut Commands,
    kind: EffectKind,
    position: Vec3,
    duration: f32,
    now: f32,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("{kind:?} Effect")),
            Effect {
                kind,
                duration,
                started_at: now,
                position,
            },
            Transform::from_translation(position),
        ))
        .id()
}

/// Despawns effects whose duration has elapsed. Runs in `SimSet::Effects`.
fn expire_effects(time: Res<Time>, mut commands: Commands, effects: Query<(Entity, &Effect)>) {
    let now = time.elapsed_secs();
    for (entity, effect) in &effects {
        if effect.is_expired(now) {
            commands.despawn_once(entity);
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Effect>();

    app.add_systems(Update, expire_effects.in_set(SimSet::Effects));
}
