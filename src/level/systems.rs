//! Level domain: timer, proximity triggers and the restart broadcast.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::level::components::{Collected, Exit, Hazard, Pickup, Resettable};
use crate::level::events::{LevelRestartEvent, LevelWonEvent, ScoredEvent};
use crate::level::session::LevelSession;
use crate::level::spawn::LevelMaterials;
use crate::movement::{LocomotionKind, Player, PlayerDiedEvent, PlayerMotor};

/// Trigger radius around pickups, hazards and the exit, in boxes.
const TRIGGER_REACH: f32 = 0.5;

/// True when the sphere center is close enough to an object centered in a
/// neighbouring empty cell to touch it.
pub fn within_reach(player: Vec3, object: Vec3, box_size: f32) -> bool {
    player.distance(object) < TRIGGER_REACH * box_size
}

pub(crate) fn tick_level_timer(
    time: Res<Time>,
    mut session: ResMut<LevelSession>,
    mut restart: MessageWriter<LevelRestartEvent>,
) {
    if session.tick(time.delta_secs()) {
        info!(
            "Time limit of {:.0}s exceeded on '{}', restarting",
            session.time_limit, session.level_name
        );
        restart.write(LevelRestartEvent);
    }
}

pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut session: ResMut<LevelSession>,
    players: Query<&PlayerMotor, With<Player>>,
    pickups: Query<(Entity, &Pickup, &Transform), Without<Collected>>,
    mut scored: MessageWriter<ScoredEvent>,
) {
    let Ok(motor) = players.single() else {
        return;
    };
    if !motor.body().collision_enabled {
        return;
    }

    let position = motor.body().position;
    let box_size = motor.metrics().box_size;
    for (entity, pickup, transform) in &pickups {
        if !within_reach(position, transform.translation, box_size) {
            continue;
        }

        session.score(pickup.value, pickup.currency);
        commands.entity(entity).insert((Collected, Visibility::Hidden));
        scored.write(ScoredEvent {
            currency: pickup.currency,
            value: pickup.value,
        });
        debug!(
            "Collected {:?} worth {} (points {}, energy {}/{})",
            pickup.currency, pickup.value, session.points, session.energy, session.target_energy
        );
    }
}

/// Hazards are harmless while the player is warping through them.
pub(crate) fn touch_hazards(
    players: Query<&PlayerMotor, With<Player>>,
    hazards: Query<&Transform, With<Hazard>>,
    mut died: MessageWriter<PlayerDiedEvent>,
) {
    let Ok(motor) = players.single() else {
        return;
    };
    if motor.kind() == LocomotionKind::Warping || !motor.body().collision_enabled {
        return;
    }

    let position = motor.body().position;
    let box_size = motor.metrics().box_size;
    if hazards
        .iter()
        .any(|hazard| within_reach(position, hazard.translation, box_size))
    {
        info!("Player touched a hazard");
        died.write(PlayerDiedEvent);
    }
}

pub(crate) fn reach_exit(
    session: Res<LevelSession>,
    players: Query<&PlayerMotor, With<Player>>,
    exits: Query<&Transform, With<Exit>>,
    mut won: MessageWriter<LevelWonEvent>,
) {
    if !session.exit_open() {
        return;
    }
    let Ok(motor) = players.single() else {
        return;
    };
    if !motor.body().collision_enabled {
        return;
    }

    let position = motor.body().position;
    let box_size = motor.metrics().box_size;
    if exits
        .iter()
        .any(|exit| within_reach(position, exit.translation, box_size))
    {
        won.write(LevelWonEvent {
            level_index: session.level_index,
            points: session.points,
        });
    }
}

pub(crate) fn reset_session_on_restart(
    mut events: MessageReader<LevelRestartEvent>,
    mut session: ResMut<LevelSession>,
) {
    if events.read().last().is_none() {
        return;
    }

    session.restart();
    info!("Level '{}' restarted", session.level_name);
}

pub(crate) fn reset_pickups_on_restart(
    mut commands: Commands,
    mut events: MessageReader<LevelRestartEvent>,
    pickups: Query<Entity, (With<Pickup>, With<Collected>, With<Resettable>)>,
) {
    if events.read().last().is_none() {
        return;
    }

    for entity in &pickups {
        commands
            .entity(entity)
            .remove::<Collected>()
            .insert(Visibility::Inherited);
    }
}

/// Exit colour follows whether enough energy has been collected.
pub(crate) fn update_exit_material(
    session: Res<LevelSession>,
    level_materials: Option<Res<LevelMaterials>>,
    mut exits: Query<&mut MeshMaterial3d<StandardMaterial>, With<Exit>>,
) {
    let Some(level_materials) = level_materials else {
        return;
    };
    if !session.is_changed() && !level_materials.is_changed() {
        return;
    }

    let handle = if session.exit_open() {
        &level_materials.exit_open
    } else {
        &level_materials.exit_locked
    };
    for mut material in &mut exits {
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}
