//! Movement domain: headless tests for the locomotion machine.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    AnimEvent, BlockLevel, LocomotionKind, LocomotionState, MotorContext, MotorEvent,
    MovementInput, MovementTuning, PlayerMotor, ShiftOrigin, SpawnPoint, SphereAnimation,
    select_warp_face, warp_probe_order,
};
use crate::grid::{Orientation, Turn};
use crate::probe::BlockGrid;

const DT: f32 = 1.0 / 60.0;

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn spawn_on(cell: IVec3) -> PlayerMotor {
    let tuning = MovementTuning::default();
    let metrics = tuning.metrics(1.0);
    let spawn = SpawnPoint {
        position: metrics.rest_position_on(cell, Vec3::Y),
        orientation: Orientation::default(),
    };
    PlayerMotor::new(spawn, 1.0, 9.81, tuning)
}

fn spawn_scaled(cell: IVec3, box_size: f32) -> PlayerMotor {
    let tuning = MovementTuning::default();
    let metrics = tuning.metrics(box_size);
    let spawn = SpawnPoint {
        position: metrics.rest_position_on(cell, Vec3::Y),
        orientation: Orientation::default(),
    };
    PlayerMotor::new(spawn, box_size, 9.81, tuning)
}

fn edge_rolling(motor: &PlayerMotor) -> bool {
    matches!(motor.state(), LocomotionState::GravityChange(shift) if shift.roll.is_some())
}

fn row(len: i32) -> BlockGrid {
    BlockGrid::from_cells(1.0, (0..len).map(|x| IVec3::new(x, 0, 0)))
}

fn forward() -> MovementInput {
    MovementInput {
        forward_held: true,
        ..default()
    }
}

fn warp(forward_held: bool) -> MovementInput {
    MovementInput {
        forward_held,
        warp_pressed: true,
        ..default()
    }
}

fn tick(motor: &mut PlayerMotor, input: &MovementInput, grid: &BlockGrid) {
    motor.tick(input, MotorContext::default(), grid, DT);
}

fn run_until(
    motor: &mut PlayerMotor,
    input: &MovementInput,
    grid: &BlockGrid,
    max_ticks: usize,
    done: impl Fn(&PlayerMotor) -> bool,
) -> bool {
    for _ in 0..max_ticks {
        tick(motor, input, grid);
        if done(motor) {
            return true;
        }
    }
    false
}

fn run_until_idle(motor: &mut PlayerMotor, grid: &BlockGrid) {
    let reached = run_until(motor, &MovementInput::default(), grid, 600, |m| {
        m.kind() == LocomotionKind::Idle
    });
    assert!(reached, "never settled, stuck in {:?}", motor.kind());
}

fn assert_vec_eq(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-3),
        "{:?} != {:?}",
        actual,
        expected
    );
}

fn count_deaths(events: &[MotorEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, MotorEvent::Died))
        .count()
}

// -----------------------------------------------------------------------------
// Idle
// -----------------------------------------------------------------------------

#[test]
fn test_idle_on_floor_stays_put() {
    let grid = row(3);
    let mut motor = spawn_on(IVec3::ZERO);

    for _ in 0..30 {
        tick(&mut motor, &MovementInput::default(), &grid);
    }

    assert_eq!(motor.kind(), LocomotionKind::Idle);
    assert_vec_eq(motor.body().position, Vec3::new(0.0, 0.75, 0.0));
}

#[test]
fn test_idle_without_ground_starts_falling() {
    let grid = BlockGrid::new(1.0);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &MovementInput::default(), &grid);

    assert_eq!(motor.kind(), LocomotionKind::Falling);
}

// -----------------------------------------------------------------------------
// Probing
// -----------------------------------------------------------------------------

#[test]
fn test_next_block_level_classification() {
    let motor = spawn_on(IVec3::ZERO);

    assert_eq!(motor.next_block_level(&row(2)), BlockLevel::Level);
    assert_eq!(motor.next_block_level(&row(1)), BlockLevel::Down);

    let mut step = row(2);
    step.insert(IVec3::new(1, 1, 0));
    assert_eq!(motor.next_block_level(&step), BlockLevel::Up);
}

#[test]
fn test_can_move_requires_default_camera_and_no_pause() {
    let grid = row(3);
    let motor = spawn_on(IVec3::ZERO);

    assert!(motor.can_move(MotorContext::default(), &grid));
    assert!(!motor.can_move(
        MotorContext {
            camera_default: false,
            paused: false,
        },
        &grid
    ));
    assert!(!motor.can_move(
        MotorContext {
            camera_default: true,
            paused: true,
        },
        &grid
    ));
}

#[test]
fn test_forward_ignored_while_camera_busy() {
    let grid = row(3);
    let mut motor = spawn_on(IVec3::ZERO);
    let busy = MotorContext {
        camera_default: false,
        paused: false,
    };

    for _ in 0..10 {
        motor.tick(&forward(), busy, &grid, DT);
    }

    assert_eq!(motor.kind(), LocomotionKind::Idle);
    assert_vec_eq(motor.body().position, Vec3::new(0.0, 0.75, 0.0));
}

#[test]
fn test_edge_with_side_neighbour_cannot_be_rolled_over() {
    // Nothing ahead, but the block beside the floor cell forbids the edge roll
    let grid = BlockGrid::from_cells(1.0, [IVec3::ZERO, IVec3::new(0, 0, 1)]);
    let motor = spawn_on(IVec3::ZERO);

    assert!(!motor.can_move(MotorContext::default(), &grid));
}

// -----------------------------------------------------------------------------
// Moving
// -----------------------------------------------------------------------------

#[test]
fn test_single_press_moves_exactly_one_cell() {
    let grid = row(4);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    assert_eq!(motor.kind(), LocomotionKind::Moving);

    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(1.0, 0.75, 0.0));
    assert_eq!(motor.orientation(), Orientation::default());
}

#[test]
fn test_first_leg_eases_in_and_continuation_does_not() {
    let grid = row(5);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    let LocomotionState::Moving(first) = *motor.state() else {
        panic!("expected Moving, got {:?}", motor.kind());
    };
    assert!(first.ease_in > 0.0);

    let continued = run_until(&mut motor, &forward(), &grid, 120, |m| {
        matches!(m.state(), LocomotionState::Moving(intent) if intent.start.x > 0.5)
    });
    assert!(continued);

    let LocomotionState::Moving(second) = *motor.state() else {
        panic!("expected Moving, got {:?}", motor.kind());
    };
    assert_eq!(second.ease_in, 0.0);
    assert_vec_eq(second.start, Vec3::new(1.0, 0.75, 0.0));
}

#[test]
fn test_held_forward_never_stops_between_cells() {
    let grid = row(6);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    motor.drain_events();

    let reached = run_until(&mut motor, &forward(), &grid, 300, |m| {
        m.body().position.x >= 3.0
    });
    assert!(reached);

    let stopped = motor.events().iter().any(|event| {
        matches!(
            event,
            MotorEvent::StateChanged {
                to: LocomotionKind::Idle,
                ..
            }
        )
    });
    assert!(!stopped, "rolling paused between cells");
}

#[test]
fn test_rolling_over_edge_lands_on_front_face() {
    let grid = BlockGrid::from_cells(1.0, [IVec3::ZERO]);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    let rolling = run_until(&mut motor, &MovementInput::default(), &grid, 120, edge_rolling);
    assert!(rolling);
    assert!(!motor.body().gravity_enabled);

    // Half a box to the edge before pivoting
    assert_vec_eq(motor.body().position, Vec3::new(0.5, 0.75, 0.0));

    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(0.75, 0.0, 0.0));
    assert_vec_eq(motor.orientation().up(), Vec3::X);
    assert_vec_eq(motor.orientation().forward(), Vec3::NEG_Y);
    assert_vec_eq(motor.gravity(), Vec3::new(-9.81, 0.0, 0.0));
    assert!(motor.body().gravity_enabled);

    let changed = motor
        .events()
        .iter()
        .any(|event| matches!(event, MotorEvent::GravityChanged(o) if o.up() == Vec3::X));
    assert!(changed);
}

#[test]
fn test_edge_roll_scales_with_box_size() {
    let grid = BlockGrid::from_cells(2.0, [IVec3::new(1, 0, 0), IVec3::new(2, 0, 0)]);
    let mut motor = spawn_scaled(IVec3::new(1, 0, 0), 2.0);
    assert_vec_eq(motor.body().position, Vec3::new(2.0, 1.25, 0.0));

    let rolling = run_until(&mut motor, &forward(), &grid, 300, edge_rolling);
    assert!(rolling);
    assert_vec_eq(motor.body().position, Vec3::new(5.0, 1.25, 0.0));

    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(5.25, 0.0, 0.0));
    assert_vec_eq(motor.orientation().up(), Vec3::X);
    assert_vec_eq(motor.orientation().forward(), Vec3::NEG_Y);
}

#[test]
fn test_step_up_climbs_onto_block_face() {
    let mut grid = row(3);
    grid.insert(IVec3::new(1, 1, 0));
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(0.25, 1.0, 0.0));
    assert_vec_eq(motor.orientation().up(), Vec3::NEG_X);
    assert_vec_eq(motor.orientation().forward(), Vec3::Y);
}

#[test]
fn test_round_trip_over_pillar_restores_orientation() {
    let mut grid = row(3);
    grid.insert(IVec3::new(1, 1, 0));
    let mut motor = spawn_on(IVec3::ZERO);

    // Climb the pillar's side...
    tick(&mut motor, &forward(), &grid);
    run_until_idle(&mut motor, &grid);

    // ...then roll over its top edge
    tick(&mut motor, &forward(), &grid);
    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(1.0, 1.75, 0.0));
    assert_eq!(motor.orientation(), Orientation::default());
    assert_vec_eq(motor.gravity(), Vec3::new(0.0, -9.81, 0.0));
}

// -----------------------------------------------------------------------------
// Warping
// -----------------------------------------------------------------------------

#[test]
fn test_forward_warp_lands_two_cells_ahead() {
    let grid = row(4);
    let mut motor = spawn_on(IVec3::ZERO);

    // Warp wins over a forward press on the same tick
    tick(&mut motor, &warp(true), &grid);
    assert_eq!(motor.kind(), LocomotionKind::Warping);
    assert!(!motor.body().collision_enabled);
    assert!(!motor.body().gravity_enabled);

    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.body().position, Vec3::new(2.0, 0.75, 0.0));
    assert_eq!(motor.orientation(), Orientation::default());
    assert!(motor.body().collision_enabled);
    assert!(motor.body().gravity_enabled);

    let events = motor.drain_events();
    assert!(events.contains(&MotorEvent::Anim(AnimEvent::Warp)));
    assert!(events.contains(&MotorEvent::Anim(AnimEvent::Impact)));
}

#[test]
fn test_warp_passes_one_wall_but_not_two() {
    let motor = spawn_on(IVec3::ZERO);
    let ctx = MotorContext::default();

    let mut one_wall = row(4);
    one_wall.insert(IVec3::new(1, 1, 0));
    assert!(motor.can_warp(&warp(true), ctx, &one_wall));

    let mut far_wall = row(4);
    far_wall.insert(IVec3::new(2, 1, 0));
    assert!(!motor.can_warp(&warp(true), ctx, &far_wall));

    assert!(!motor.can_warp(
        &warp(true),
        MotorContext {
            camera_default: false,
            paused: false,
        },
        &row(4)
    ));
}

#[test]
fn test_upward_warp_onto_ceiling_flips_gravity() {
    let mut grid = row(1);
    grid.insert(IVec3::new(0, 4, 0));
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &warp(false), &grid);
    let LocomotionState::Warping(jump) = *motor.state() else {
        panic!("expected Warping, got {:?}", motor.kind());
    };
    assert!(!jump.forward);
    assert_vec_eq(jump.target, Vec3::new(0.0, 3.0, 0.0));

    run_until_idle(&mut motor, &grid);

    assert_vec_eq(motor.orientation().up(), Vec3::NEG_Y);
    assert_vec_eq(motor.orientation().forward(), Vec3::X);
    assert_vec_eq(motor.body().position, Vec3::new(0.0, 3.25, 0.0));
}

#[test]
fn test_warp_into_nothing_ends_in_a_fall() {
    let grid = row(1);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &warp(true), &grid);
    let falling = run_until(&mut motor, &MovementInput::default(), &grid, 120, |m| {
        m.kind() == LocomotionKind::Falling
    });

    assert!(falling);
    assert_eq!(motor.orientation(), Orientation::default());
}

#[test]
fn test_warp_face_priority_with_shuffled_placement() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6b75_6c61);
    let orientation = Orientation::default();
    let order = warp_probe_order(&orientation);

    for _ in 0..64 {
        let mut faces: Vec<Vec3> = order
            .iter()
            .copied()
            .filter(|_| rng.random_bool(0.5))
            .collect();
        faces.shuffle(&mut rng);

        let grid = BlockGrid::from_cells(1.0, faces.iter().map(|face| face.as_ivec3()));
        let result = select_warp_face(&grid, Vec3::ZERO, &orientation, 1.0);

        let expected = order.iter().copied().find(|face| faces.contains(face));
        assert_eq!(result.face, expected);
        assert!(result.orientation.is_valid());
        if let Some(face) = expected {
            assert_vec_eq(result.orientation.up(), -face);
        }
    }
}

#[test]
fn test_warp_onto_forward_face_takes_old_up_as_forward() {
    let orientation = Orientation::default();
    let grid = BlockGrid::from_cells(1.0, [IVec3::new(1, 0, 0)]);

    let result = select_warp_face(&grid, Vec3::ZERO, &orientation, 1.0);

    assert_eq!(result.face, Some(Vec3::X));
    assert_vec_eq(result.orientation.up(), Vec3::NEG_X);
    assert_vec_eq(result.orientation.forward(), Vec3::Y);
}

// -----------------------------------------------------------------------------
// Falling
// -----------------------------------------------------------------------------

#[test]
fn test_endless_fall_reports_exactly_one_death() {
    let grid = BlockGrid::new(1.0);
    let mut motor = spawn_on(IVec3::ZERO);

    for _ in 0..240 {
        tick(&mut motor, &MovementInput::default(), &grid);
    }

    assert_eq!(count_deaths(&motor.drain_events()), 1);
    assert_eq!(motor.kind(), LocomotionKind::Falling);
}

#[test]
fn test_long_fall_over_ground_lands_alive() {
    let grid = BlockGrid::from_cells(1.0, [IVec3::new(0, -20, 0)]);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &MovementInput::default(), &grid);
    run_until_idle(&mut motor, &grid);

    assert_eq!(count_deaths(&motor.drain_events()), 0);
    assert_vec_eq(motor.body().position, Vec3::new(0.0, -19.25, 0.0));
}

// -----------------------------------------------------------------------------
// Forced exit
// -----------------------------------------------------------------------------

#[test]
fn test_halt_mid_warp_restores_physics_flags() {
    let grid = row(4);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &warp(true), &grid);
    for _ in 0..5 {
        tick(&mut motor, &MovementInput::default(), &grid);
    }
    assert_eq!(motor.kind(), LocomotionKind::Warping);

    motor.halt();

    assert_eq!(motor.kind(), LocomotionKind::Idle);
    assert!(motor.body().gravity_enabled);
    assert!(motor.body().collision_enabled);
}

#[test]
fn test_halt_mid_edge_roll_restores_gravity() {
    let grid = BlockGrid::from_cells(1.0, [IVec3::ZERO]);
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    let rolling = run_until(&mut motor, &MovementInput::default(), &grid, 120, |m| {
        matches!(
            m.state(),
            LocomotionState::GravityChange(shift) if shift.origin == ShiftOrigin::EdgeRoll
        )
    });
    assert!(rolling);

    motor.halt();

    assert!(motor.body().gravity_enabled);
    assert!(motor.body().collision_enabled);
}

#[test]
fn test_reset_returns_to_spawn() {
    let mut grid = row(3);
    grid.insert(IVec3::new(1, 1, 0));
    let mut motor = spawn_on(IVec3::ZERO);

    tick(&mut motor, &forward(), &grid);
    run_until_idle(&mut motor, &grid);
    assert_ne!(motor.orientation(), Orientation::default());

    motor.reset();

    assert_eq!(motor.kind(), LocomotionKind::Idle);
    assert_eq!(motor.orientation(), Orientation::default());
    assert_vec_eq(motor.body().position, Vec3::new(0.0, 0.75, 0.0));
    assert_eq!(motor.sphere_rotation(), Quat::IDENTITY);
}

#[test]
fn test_set_forward_rejects_vector_along_up() {
    let mut motor = spawn_on(IVec3::ZERO);

    assert!(motor.set_forward(Vec3::Y).is_err());
    assert!(motor.set_forward(Vec3::new(0.0, 0.0, 0.98)).is_ok());
    assert_eq!(motor.orientation().forward(), Vec3::Z);
}

// -----------------------------------------------------------------------------
// Invariants under random play
// -----------------------------------------------------------------------------

#[test]
fn test_random_play_keeps_basis_valid_and_rests_on_lattice() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut grid = BlockGrid::new(1.0);
    for x in 0..5 {
        for z in 0..5 {
            grid.insert(IVec3::new(x, 0, z));
        }
    }
    grid.insert(IVec3::new(1, 1, 1));
    grid.insert(IVec3::new(3, 1, 2));

    let mut motor = spawn_on(IVec3::new(2, 0, 2));
    let metrics = motor.metrics();
    let mut input = MovementInput::default();

    for step in 0..4000 {
        if step % 12 == 0 {
            input = MovementInput {
                forward_held: rng.random_bool(0.7),
                warp_pressed: rng.random_bool(0.05),
                ..default()
            };

            if motor.kind() == LocomotionKind::Idle && rng.random_bool(0.3) {
                let turn = [Turn::Left, Turn::Right, Turn::Back][rng.random_range(0..3)];
                let turned = motor.orientation().turned(turn).forward();
                motor
                    .set_forward(turned)
                    .expect("turned forward stays orthogonal to up");
            }
        }

        tick(&mut motor, &input, &grid);
        input.warp_pressed = false;

        let orientation = motor.orientation();
        assert!(orientation.is_valid(), "invalid basis at step {}", step);
        assert_eq!(orientation.up(), orientation.up().round());
        assert_eq!(orientation.forward(), orientation.forward().round());

        let events = motor.drain_events();
        let transitions = events
            .iter()
            .filter(|event| matches!(event, MotorEvent::StateChanged { .. }))
            .count();
        assert!(transitions <= 1, "{} transitions in one tick", transitions);

        if motor.kind() == LocomotionKind::Idle {
            let position = motor.body().position;
            assert_vec_eq(position, metrics.snap_all(position, orientation.up()));
        }

        if count_deaths(&events) > 0 {
            motor.reset();
        }
    }
}

// -----------------------------------------------------------------------------
// Sphere animation
// -----------------------------------------------------------------------------

#[test]
fn test_warp_cue_shrinks_sphere_over_dissolve_time() {
    let mut animation = SphereAnimation::default();
    assert_eq!(animation.scale(), Vec3::ONE);

    animation.play(AnimEvent::Warp, 0.2);
    assert_vec_eq(animation.scale(), Vec3::ONE);

    animation.advance(0.1);
    assert_vec_eq(animation.scale(), Vec3::splat(0.5));

    animation.advance(0.2);
    assert_eq!(animation.scale(), Vec3::ONE);
}

#[test]
fn test_impact_squash_survives_settling_but_not_rolling() {
    let mut animation = SphereAnimation::default();

    // Landing sends Impact then Moving(false) in the same tick
    animation.play(AnimEvent::Impact, 0.25);
    animation.play(AnimEvent::Moving(false), 0.25);
    let squashed = animation.scale();
    assert!(squashed.y < 1.0);
    assert!(squashed.x > 1.0);

    animation.play(AnimEvent::Moving(true), 0.25);
    assert_eq!(animation.scale(), Vec3::ONE);
}

#[test]
fn test_reset_mid_warp_restores_full_size() {
    let grid = row(5);
    let mut motor = spawn_on(IVec3::ZERO);
    let mut animation = SphereAnimation::default();

    tick(&mut motor, &warp(false), &grid);
    motor.reset();

    for event in motor.drain_events() {
        if let MotorEvent::Anim(cue) = event {
            animation.play(cue, 0.25);
        }
    }
    assert_eq!(animation.scale(), Vec3::ONE);
}
