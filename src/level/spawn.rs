//! Level domain: turning a level definition into world-space objects and
//! spawning them.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::camera::{CameraRig, PausePose};
use crate::content::{ContentRegistry, Currency, LevelDef, cell, vec3};
use crate::grid::{GridMetrics, Orientation, OrientationError};
use crate::level::components::{Block, Exit, Hazard, LevelEntity, Pickup, Resettable};
use crate::level::events::LoadLevelEvent;
use crate::level::session::LevelSession;
use crate::movement::{
    GameLayer, MovementInput, MovementTuning, Player, PlayerMotor, PlayerSphere, SpawnPoint,
    SphereAnimation,
};

/// Everything the spawn system needs from a level, in world space.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub metrics: GridMetrics,
    pub gravity: f32,
    pub spawn: SpawnPoint,
    pub blocks: Vec<(IVec3, Vec3)>,
    pub pickups: Vec<(Vec3, Pickup)>,
    pub hazards: Vec<Vec3>,
    pub exit: Vec3,
    pub pause_pose: PausePose,
}

impl LevelLayout {
    pub fn from_def(level: &LevelDef, tuning: &MovementTuning) -> Result<Self, OrientationError> {
        let metrics = tuning.metrics(level.box_size);
        let orientation = Orientation::new(vec3(level.start.up), vec3(level.start.forward))?;
        let spawn = SpawnPoint {
            position: metrics.rest_position_on(cell(level.start.cell), orientation.up()),
            orientation,
        };

        let blocks = level
            .solid_cells()
            .into_iter()
            .map(|block| (block, metrics.cell_center(block)))
            .collect();
        let pickups = level
            .pickups
            .iter()
            .map(|pickup| {
                (
                    metrics.cell_center(cell(pickup.cell)),
                    Pickup {
                        currency: pickup.currency,
                        value: pickup.value,
                    },
                )
            })
            .collect();
        let hazards = level
            .hazards
            .iter()
            .map(|hazard| metrics.cell_center(cell(hazard.cell)))
            .collect();

        let pause_pose = match &level.pause_camera {
            Some(pose) => PausePose {
                position: vec3(pose.position),
                look_at: vec3(pose.look_at),
            },
            None => PausePose::default(),
        };

        Ok(Self {
            metrics,
            gravity: level.gravity,
            spawn,
            blocks,
            pickups,
            hazards,
            exit: metrics.cell_center(cell(level.exit.cell)),
            pause_pose,
        })
    }
}

/// Materials shared by the objects of the current level.
#[derive(Resource, Debug, Clone)]
pub struct LevelMaterials {
    pub exit_locked: Handle<StandardMaterial>,
    pub exit_open: Handle<StandardMaterial>,
}

fn currency_color(currency: Currency) -> Color {
    match currency {
        Currency::Points => Color::srgb(0.95, 0.8, 0.2),
        Currency::Energy => Color::srgb(0.2, 0.9, 0.95),
        Currency::Secret => Color::srgb(0.7, 0.3, 0.9),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn spawn_level(
    mut commands: Commands,
    mut events: MessageReader<LoadLevelEvent>,
    registry: Res<ContentRegistry>,
    tuning: Res<MovementTuning>,
    mut input: ResMut<MovementInput>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, With<LevelEntity>>,
    mut rigs: Query<&mut CameraRig>,
) {
    let Some(event) = events.read().last().copied() else {
        return;
    };

    let (index, level) = match registry.level(event.index) {
        Some(level) => (event.index, level),
        None => {
            warn!("Level {} does not exist, loading the first level", event.index);
            match registry.level(0) {
                Some(level) => (0, level),
                None => {
                    error!("No levels loaded, nothing to spawn");
                    return;
                }
            }
        }
    };

    let layout = match LevelLayout::from_def(level, &tuning) {
        Ok(layout) => layout,
        Err(e) => {
            error!("Level '{}' has an unusable start: {}", level.id, e);
            return;
        }
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    info!(
        "Loading level {} '{}' ({} blocks, {} pickups)",
        index,
        level.name,
        layout.blocks.len(),
        layout.pickups.len()
    );

    let box_size = layout.metrics.box_size;
    let env_layers = CollisionLayers::new(GameLayer::Environment, [GameLayer::Default]);

    // Geometry
    let block_mesh = meshes.add(Cuboid::from_length(box_size));
    let block_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.5, 0.6),
        perceptual_roughness: 0.8,
        ..default()
    });
    for (block, center) in &layout.blocks {
        commands.spawn((
            Block { cell: *block },
            LevelEntity,
            Mesh3d(block_mesh.clone()),
            MeshMaterial3d(block_material.clone()),
            Transform::from_translation(*center),
            RigidBody::Static,
            Collider::cuboid(box_size, box_size, box_size),
            env_layers,
        ));
    }

    // Pickups
    let pickup_mesh = meshes.add(Sphere::new(box_size * 0.15).mesh().uv(16, 12));
    for (center, pickup) in &layout.pickups {
        let material = materials.add(StandardMaterial {
            base_color: currency_color(pickup.currency),
            emissive: currency_color(pickup.currency).to_linear() * 0.5,
            ..default()
        });
        commands.spawn((
            *pickup,
            Resettable,
            LevelEntity,
            Mesh3d(pickup_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(*center),
            Visibility::default(),
        ));
    }

    // Hazards
    let hazard_mesh = meshes.add(Cuboid::from_length(box_size * 0.4));
    let hazard_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.15, 0.1),
        ..default()
    });
    for center in &layout.hazards {
        commands.spawn((
            Hazard,
            LevelEntity,
            Mesh3d(hazard_mesh.clone()),
            MeshMaterial3d(hazard_material.clone()),
            Transform::from_translation(*center),
        ));
    }

    // Exit
    let level_materials = LevelMaterials {
        exit_locked: materials.add(StandardMaterial {
            base_color: Color::srgb(0.4, 0.1, 0.1),
            ..default()
        }),
        exit_open: materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.9, 0.3),
            emissive: LinearRgba::rgb(0.1, 0.6, 0.2),
            ..default()
        }),
    };
    let session = LevelSession::new(index, level.name.clone(), level.time_limit, level.target_energy);
    let exit_material = if session.exit_open() {
        level_materials.exit_open.clone()
    } else {
        level_materials.exit_locked.clone()
    };
    commands.spawn((
        Exit,
        LevelEntity,
        Mesh3d(meshes.add(Cuboid::from_length(box_size * 0.5))),
        MeshMaterial3d(exit_material),
        Transform::from_translation(layout.exit),
    ));

    // Player
    let motor = PlayerMotor::new(layout.spawn, box_size, layout.gravity, *tuning);
    let sphere_mesh = meshes.add(Sphere::new(layout.metrics.sphere_radius).mesh().uv(32, 18));
    let sphere_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.85, 0.9),
        metallic: 0.6,
        ..default()
    });
    commands
        .spawn((
            Player,
            Resettable,
            LevelEntity,
            motor,
            SphereAnimation::default(),
            Transform::from_translation(layout.spawn.position)
                .with_rotation(layout.spawn.orientation.body_rotation()),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerSphere,
                Mesh3d(sphere_mesh),
                MeshMaterial3d(sphere_material),
                Transform::default(),
                Visibility::default(),
            ));
        });

    commands.spawn((
        LevelEntity,
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for mut rig in &mut rigs {
        rig.configure(layout.metrics, layout.pause_pose, level.intro_seconds);
        rig.reset(layout.spawn.orientation);
    }

    *input = MovementInput::default();
    commands.insert_resource(level_materials);
    commands.insert_resource(session);
}
