//! Level domain: entity components and markers for level objects.

use bevy::prelude::*;

use crate::content::Currency;

/// Entities that return to their initial state when the level restarts.
#[derive(Component, Debug, Default)]
pub struct Resettable;

/// Everything spawned for the current level. Despawned on level load.
#[derive(Component, Debug)]
pub struct LevelEntity;

/// A static level box.
#[derive(Component, Debug)]
pub struct Block {
    pub cell: IVec3,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub currency: Currency,
    pub value: i32,
}

/// Marker for pickups taken since the last restart
#[derive(Component, Debug)]
pub struct Collected;

#[derive(Component, Debug)]
pub struct Hazard;

#[derive(Component, Debug)]
pub struct Exit;
