//! Validation for cross-field consistency of level definitions.

use bevy::prelude::*;
use std::collections::HashSet;

use super::data::*;
use super::data::vec3;
use super::registry::ContentRegistry;
use crate::grid::Orientation;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    (@$source_type:literal, $errors:expr, $cond:expr, $source_id:expr, $field:expr, $($message:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($message)+),
            });
        }
    };
    ($errors:expr, $cond:expr, $source_id:expr, $field:expr, $($message:tt)+) => {
        check!(@"Level", $errors, $cond, $source_id, $field, $($message)+)
    };
}

/// Validate every level in the registry.
/// Returns a list of validation errors, empty if all levels are consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for level in &registry.levels {
        check!(
            errors,
            seen_ids.insert(level.id.as_str()),
            level.id,
            "id",
            "duplicate level id"
        );
        validate_level(level, &mut errors);
    }

    errors
}

fn validate_level(level: &LevelDef, errors: &mut Vec<ValidationError>) {
    let id = &level.id;

    check!(
        errors,
        level.box_size > 0.0 && level.box_size.is_finite(),
        id,
        "box_size",
        "must be positive, got {}",
        level.box_size
    );
    check!(
        errors,
        level.gravity > 0.0 && level.gravity.is_finite(),
        id,
        "gravity",
        "must be positive, got {}",
        level.gravity
    );
    check!(
        errors,
        level.time_limit > 0.0,
        id,
        "time_limit",
        "must be positive, got {}",
        level.time_limit
    );

    let up = vec3(level.start.up);
    let forward = vec3(level.start.forward);
    match Orientation::new(up, forward) {
        Ok(_) => {
            check!(
                errors,
                is_lattice_axis(up) && is_lattice_axis(forward),
                id,
                "start",
                "up {:?} and forward {:?} must be lattice axes",
                up,
                forward
            );
        }
        Err(e) => {
            check!(errors, false, id, "start", "{}", e);
        }
    }

    let mut solid = HashSet::new();
    for block in level.solid_cells() {
        check!(
            errors,
            solid.insert(block),
            id,
            "blocks",
            "cell {:?} is defined twice",
            block
        );
    }

    check!(
        errors,
        solid.contains(&cell(level.start.cell)),
        id,
        "start",
        "no block under the start cell {:?}",
        level.start.cell
    );

    for pickup in &level.pickups {
        check!(
            errors,
            !solid.contains(&cell(pickup.cell)),
            id,
            "pickups",
            "pickup at {:?} is inside a block",
            pickup.cell
        );
    }
    for hazard in &level.hazards {
        check!(
            errors,
            !solid.contains(&cell(hazard.cell)),
            id,
            "hazards",
            "hazard at {:?} is inside a block",
            hazard.cell
        );
    }
    check!(
        errors,
        !solid.contains(&cell(level.exit.cell)),
        id,
        "exit",
        "exit at {:?} is inside a block",
        level.exit.cell
    );

    check!(
        errors,
        level.available_energy() >= level.target_energy,
        id,
        "target_energy",
        "needs {} energy but only {} can be collected",
        level.target_energy,
        level.available_energy()
    );
}

/// Validate the gameplay tuning, on its own and against every level's box size.
pub fn validate_defaults(
    defaults: &GameplayDefaults,
    registry: &ContentRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let movement = &defaults.movement;
    let camera = &defaults.camera;

    let positive = [
        ("speed", movement.speed),
        ("probe_length", movement.probe_length),
        ("landing_probe_factor", movement.landing_probe_factor),
        ("idle_probe_factor", movement.idle_probe_factor),
        ("warp_face_probe", movement.warp_face_probe),
        ("fall_death_probe", movement.fall_death_probe),
        ("fall_death_time", movement.fall_death_time),
    ];
    for (field, value) in positive {
        check!(
            @"Tuning",
            errors,
            value > 0.0 && value.is_finite(),
            "movement",
            field,
            "must be positive, got {}",
            value
        );
    }

    let non_negative = [
        ("ease_in_time", movement.ease_in_time),
        ("warp_dissolve_time", movement.warp_dissolve_time),
        ("hover_time", movement.hover_time),
    ];
    for (field, value) in non_negative {
        check!(
            @"Tuning",
            errors,
            value >= 0.0 && value.is_finite(),
            "movement",
            field,
            "must not be negative, got {}",
            value
        );
    }

    let camera_positive = [
        ("rot_speed", camera.rot_speed),
        ("tilt_speed", camera.tilt_speed),
        ("follow_speed", camera.follow_speed),
        ("warp_follow_factor", camera.warp_follow_factor),
    ];
    for (field, value) in camera_positive {
        check!(
            @"Tuning",
            errors,
            value > 0.0 && value.is_finite(),
            "camera",
            field,
            "must be positive, got {}",
            value
        );
    }

    // The sphere must fit on a block face with a positive rest offset.
    for level in &registry.levels {
        check!(
            @"Tuning",
            errors,
            movement.sphere_radius > 0.0 && movement.sphere_radius < level.box_size * 0.5,
            "movement",
            "sphere_radius",
            "{} does not fit level '{}' with box size {}",
            movement.sphere_radius,
            level.id,
            level.box_size
        );
    }

    errors
}

/// True for the six unit vectors along the coordinate axes.
fn is_lattice_axis(v: Vec3) -> bool {
    let abs = v.abs();
    (abs.max_element() - 1.0).abs() < 1e-3 && (abs.element_sum() - 1.0).abs() < 1e-3
}
