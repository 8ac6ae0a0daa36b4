//! Per-tick simulation core for a real-time-strategy battle.
//!
//! Units are Bevy entities; every behavior (command resolution, AI targeting,
//! movement, combat, death, transient effects) is a system scheduled into one
//! of the [`SimSet`] phases of the `Update` schedule. Structural changes go
//! through `Commands` and are played back at the two explicit sync points.

pub mod deferred;
pub mod diagnostics;
pub mod gameplay;
pub mod prelude;
pub mod query;
#[cfg(test)]
pub mod testing;

use bevy::ecs::schedule::ApplyDeferred;
use bevy::prelude::*;

/// Phases of one simulation tick, in execution order.
///
/// Phases are chained without implicit sync points: structural changes queued
/// by one phase are not visible to later phases of the same tick. They are
/// applied at [`SimSet::BeginPlayback`] (requests from collaborators running in
/// [`SimSet::Orders`]) and [`SimSet::EndPlayback`] (everything the simulation
/// itself queued).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Collaborator systems (input, UI, scripted scenarios) issue orders here.
    Orders,
    /// Plays back mutations queued by `Orders`.
    BeginPlayback,
    /// Formation planning and command resolution.
    Command,
    /// Throttled AI re-targeting.
    Ai,
    /// Pathfinding, then movement.
    Movement,
    /// Melee damage and projectile launches.
    Attack,
    /// Projectile flight and bound-target impacts.
    Projectile,
    /// Fallback projectile-versus-unit collision scan.
    Collision,
    /// Health to `Dead` transition.
    Death,
    /// Transient effect expiry.
    Effects,
    /// Post-death cleanup and diagnostics.
    Cleanup,
    /// Plays back everything queued during the tick.
    EndPlayback,
}

/// Installs the whole simulation into an app.
///
/// The caller supplies time (`MinimalPlugins` or `DefaultPlugins`); the
/// simulation owns no global state outside the app's `World`.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimSet::Orders,
            SimSet::BeginPlayback,
            SimSet::Command,
            SimSet::Ai,
            SimSet::Movement,
            SimSet::Attack,
            SimSet::Projectile,
            SimSet::Collision,
            SimSet::Death,
            SimSet::Effects,
            SimSet::Cleanup,
            SimSet::EndPlayback,
        )
            .chain_ignore_deferred(),
    );

    app.add_systems(
        Update,
        (
            ApplyDeferred.in_set(SimSet::BeginPlayback),
            ApplyDeferred.in_set(SimSet::EndPlayback),
        ),
    );

    app.add_plugins((gameplay::plugin, diagnostics::plugin));
}
