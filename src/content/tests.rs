//! Content domain: tests for parsing, the built-in level and validation.

use bevy::prelude::*;
use std::path::Path;

use super::{
    ContentRegistry, Currency, FillDef, GameplayDefaults, LevelDef, PickupDef, load_all_content,
    parse_data_file, parse_single_file, validate_content, validate_defaults,
};

const MINIMAL_LEVELS: &str = r#"
(
    schema_version: 1,
    items: [
        (
            id: "first",
            name: "First Steps",
            start: (cell: (0, 0, 0)),
            blocks: [(0, 0, 0), (1, 0, 0)],
            exit: (cell: (1, 1, 0)),
        ),
    ],
)
"#;

fn level_with(edit: impl FnOnce(&mut LevelDef)) -> ContentRegistry {
    let mut registry = ContentRegistry::builtin();
    edit(&mut registry.levels[0]);
    registry
}

fn failing_fields(registry: &ContentRegistry) -> Vec<&'static str> {
    validate_content(registry)
        .iter()
        .map(|error| error.field)
        .collect()
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_minimal_level_fills_in_defaults() {
    let levels: Vec<LevelDef> = parse_data_file("levels.ron", MINIMAL_LEVELS).unwrap();
    let level = &levels[0];

    assert_eq!(level.box_size, 1.0);
    assert_eq!(level.gravity, 9.81);
    assert_eq!(level.time_limit, 120.0);
    assert_eq!(level.intro_seconds, 2.0);
    assert_eq!(level.start.up, (0.0, 1.0, 0.0));
    assert_eq!(level.start.forward, (1.0, 0.0, 0.0));
    assert_eq!(level.target_energy, 0);
    assert!(level.pause_camera.is_none());
    assert!(level.pickups.is_empty());
}

#[test]
fn test_pause_camera_parses_without_some() {
    let text = MINIMAL_LEVELS.replace(
        "exit: (cell: (1, 1, 0)),",
        "exit: (cell: (1, 1, 0)),\n pause_camera: (position: (0.0, 8.0, 0.0), look_at: (1.0, 0.0, 0.0)),",
    );
    let levels: Vec<LevelDef> = parse_data_file("levels.ron", &text).unwrap();

    let pose = levels[0].pause_camera.as_ref().expect("pose parsed");
    assert_eq!(pose.position, (0.0, 8.0, 0.0));
}

#[test]
fn test_parse_error_names_the_file() {
    let err = parse_data_file::<LevelDef>("levels.ron", "(schema_version: 1, items: [(id: 3)])")
        .unwrap_err();

    assert_eq!(err.file, "levels.ron");
    assert!(err.to_string().starts_with("Failed to load levels.ron"));
}

#[test]
fn test_partial_gameplay_defaults_keep_tuning_defaults() {
    let defaults: GameplayDefaults = parse_single_file(
        "gameplay_defaults.ron",
        "(schema_version: 1, movement: (speed: 5.0))",
    )
    .unwrap();

    assert_eq!(defaults.movement.speed, 5.0);
    assert_eq!(defaults.movement.sphere_radius, 0.25);
    assert_eq!(defaults.camera.dir_offset, -1.6);
}

#[test]
fn test_shipped_content_loads_and_validates() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
    let (registry, defaults) = match load_all_content(&base) {
        Ok(loaded) => loaded,
        Err(errors) => panic!("{:?}", errors),
    };

    assert!(registry.level_count() >= 1);
    assert_eq!(defaults.schema_version, 1);

    let errors = validate_content(&registry);
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_missing_directory_reports_errors() {
    let result = load_all_content(Path::new("does/not/exist"));
    assert!(result.is_err());
}

// -----------------------------------------------------------------------------
// Level helpers
// -----------------------------------------------------------------------------

#[test]
fn test_fill_expands_inclusive_box_in_any_corner_order() {
    let fill = FillDef {
        from: (1, 0, 1),
        to: (0, 0, 0),
    };
    let cells = fill.cells();

    assert_eq!(cells.len(), 4);
    assert!(cells.contains(&IVec3::new(0, 0, 0)));
    assert!(cells.contains(&IVec3::new(1, 0, 1)));
}

#[test]
fn test_available_energy_counts_energy_pickups_only() {
    let registry = ContentRegistry::builtin();
    assert_eq!(registry.levels[0].available_energy(), 1);
}

#[test]
fn test_registry_lookup() {
    let registry = ContentRegistry::builtin();

    assert_eq!(registry.level_index("builtin"), Some(0));
    assert_eq!(registry.level_index("nope"), None);
    assert!(registry.level(1).is_none());
    assert_eq!(registry.total_count(), 1);
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_builtin_level_is_valid() {
    assert!(validate_content(&ContentRegistry::builtin()).is_empty());
}

#[test]
fn test_duplicate_level_ids_are_rejected() {
    let mut registry = ContentRegistry::builtin();
    registry.levels.push(registry.levels[0].clone());

    assert_eq!(failing_fields(&registry), vec!["id"]);
}

#[test]
fn test_start_basis_must_be_orthonormal_lattice_axes() {
    let skewed = level_with(|level| level.start.forward = (1.0, 1.0, 0.0));
    assert_eq!(failing_fields(&skewed), vec!["start"]);

    let diagonal = level_with(|level| level.start.forward = (1.0, 0.0, 1.0));
    assert_eq!(failing_fields(&diagonal), vec!["start"]);

    let zero = level_with(|level| level.start.up = (0.0, 0.0, 0.0));
    assert_eq!(failing_fields(&zero), vec!["start"]);
}

#[test]
fn test_start_must_stand_on_a_block() {
    let floating = level_with(|level| level.start.cell = (0, 5, 0));
    assert_eq!(failing_fields(&floating), vec!["start"]);
}

#[test]
fn test_blocks_must_be_unique() {
    let doubled = level_with(|level| level.blocks.push((2, 0, 0)));
    assert_eq!(failing_fields(&doubled), vec!["blocks"]);
}

#[test]
fn test_energy_target_must_be_reachable() {
    let greedy = level_with(|level| level.target_energy = 2);
    assert_eq!(failing_fields(&greedy), vec!["target_energy"]);

    let enough = level_with(|level| {
        level.target_energy = 2;
        level.pickups.push(PickupDef {
            cell: (3, 1, 0),
            currency: Currency::Energy,
            value: 1,
        });
    });
    assert!(validate_content(&enough).is_empty());
}

#[test]
fn test_objects_cannot_sit_inside_blocks() {
    let buried = level_with(|level| {
        level.exit.cell = (4, 0, 0);
        level.pickups[1].cell = (3, 0, 0);
    });

    let fields = failing_fields(&buried);
    assert!(fields.contains(&"exit"));
    assert!(fields.contains(&"pickups"));
}

#[test]
fn test_non_positive_physics_values_are_rejected() {
    let broken = level_with(|level| {
        level.box_size = 0.0;
        level.gravity = -1.0;
    });

    assert_eq!(failing_fields(&broken), vec!["box_size", "gravity"]);
}

// -----------------------------------------------------------------------------
// Tuning validation
// -----------------------------------------------------------------------------

fn tuning_failures(defaults: &GameplayDefaults, registry: &ContentRegistry) -> Vec<&'static str> {
    validate_defaults(defaults, registry)
        .iter()
        .map(|error| error.field)
        .collect()
}

#[test]
fn test_default_tuning_is_valid() {
    let defaults = GameplayDefaults::default();
    assert!(validate_defaults(&defaults, &ContentRegistry::builtin()).is_empty());
}

#[test]
fn test_zero_speed_tuning_parses_but_is_rejected() {
    let defaults: GameplayDefaults = parse_single_file(
        "gameplay_defaults.ron",
        "(schema_version: 1, movement: (speed: 0.0))",
    )
    .unwrap();

    assert_eq!(
        tuning_failures(&defaults, &ContentRegistry::builtin()),
        vec!["speed"]
    );
}

#[test]
fn test_stalling_camera_and_movement_speeds_are_rejected() {
    let mut defaults = GameplayDefaults::default();
    defaults.movement.speed = -2.0;
    defaults.movement.fall_death_time = f32::NAN;
    defaults.camera.rot_speed = 0.0;
    defaults.camera.follow_speed = -1.0;

    let fields = tuning_failures(&defaults, &ContentRegistry::builtin());
    assert!(fields.contains(&"speed"));
    assert!(fields.contains(&"fall_death_time"));
    assert!(fields.contains(&"rot_speed"));
    assert!(fields.contains(&"follow_speed"));
    assert_eq!(fields.len(), 4);
}

#[test]
fn test_negative_delays_are_rejected_but_zero_is_fine() {
    let mut defaults = GameplayDefaults::default();
    defaults.movement.ease_in_time = 0.0;
    defaults.movement.hover_time = 0.0;
    assert!(validate_defaults(&defaults, &ContentRegistry::builtin()).is_empty());

    defaults.movement.warp_dissolve_time = -0.1;
    assert_eq!(
        tuning_failures(&defaults, &ContentRegistry::builtin()),
        vec!["warp_dissolve_time"]
    );
}

#[test]
fn test_sphere_must_fit_every_level_box() {
    let mut defaults = GameplayDefaults::default();
    defaults.movement.sphere_radius = 0.5;
    assert_eq!(
        tuning_failures(&defaults, &ContentRegistry::builtin()),
        vec!["sphere_radius"]
    );

    // Fits a box of 2 but not the built-in box of 1
    let mut registry = ContentRegistry::builtin();
    let mut big = registry.levels[0].clone();
    big.id = "big".to_string();
    big.box_size = 2.0;
    registry.levels.push(big);
    defaults.movement.sphere_radius = 0.75;

    let errors = validate_defaults(&defaults, &registry);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("builtin"));
}

#[test]
fn test_shipped_tuning_is_valid() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
    let (registry, defaults) = match load_all_content(&base) {
        Ok(loaded) => loaded,
        Err(errors) => panic!("{:?}", errors),
    };

    let errors = validate_defaults(&defaults, &registry);
    assert!(errors.is_empty(), "{:?}", errors);
}
