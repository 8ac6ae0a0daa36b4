//! Common imports for the entire crate.

pub use bevy::prelude::*;

pub use crate::SimSet;
pub use crate::deferred::SimCommandsExt;
pub use crate::gameplay::ai::{AiBehavior, AiController};
pub use crate::gameplay::combat::{Damage, Projectile};
pub use crate::gameplay::command::{CommandKind, Order, UnitCommand};
pub use crate::gameplay::effects::{Effect, EffectKind};
pub use crate::gameplay::units::pathfinding::Pathfinding;
pub use crate::gameplay::units::{
    AttackRange, Group, Movement, PlayerUnit, Selected, UnitKind, UnitType,
};
pub use crate::gameplay::{Dead, Health, Team};
