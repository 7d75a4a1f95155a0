//! Movement domain: the locomotion state machine driving the rolling sphere.

use bevy::prelude::*;

use crate::grid::{GridMetrics, Orientation, OrientationError, quad_ease_in};
use crate::movement::body::Body;
use crate::movement::resources::{MovementInput, MovementTuning};
use crate::movement::state::{
    BlockLevel, EdgeRoll, FallTracker, GravityShift, LocomotionKind, LocomotionState, MoveIntent,
    ShiftOrigin, WarpJump, WarpPhase,
};
use crate::movement::warp::select_warp_face;
use crate::probe::{CollisionProbe, all_hits_within};

/// Where and how the player starts a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub orientation: Orientation,
}

/// Facts about the rest of the game the transition predicates depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorContext {
    pub camera_default: bool,
    pub paused: bool,
}

impl Default for MotorContext {
    fn default() -> Self {
        Self {
            camera_default: true,
            paused: false,
        }
    }
}

/// Presentation cues, replacing animator trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimEvent {
    Moving(bool),
    Impact,
    Warp,
}

/// Everything the machine reports outward. Drained by the ECS layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorEvent {
    StateChanged {
        from: LocomotionKind,
        to: LocomotionKind,
    },
    GravityChanged(Orientation),
    Anim(AnimEvent),
    Died,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Next {
    Idle,
    Moving { after_shift: bool },
    GravityChange(ShiftOrigin),
    Warping,
    Falling,
}

/// Grid locomotion of the player: rolling, edge rounding, warping and
/// falling, with the gravity axis following the face the sphere is on.
#[derive(Component, Debug, Clone)]
pub struct PlayerMotor {
    orientation: Orientation,
    body: Body,
    state: LocomotionState,
    metrics: GridMetrics,
    tuning: MovementTuning,
    gravity_magnitude: f32,
    spawn: SpawnPoint,
    sphere_rotation: Quat,
    events: Vec<MotorEvent>,
}

impl PlayerMotor {
    pub fn new(
        spawn: SpawnPoint,
        box_size: f32,
        gravity_magnitude: f32,
        tuning: MovementTuning,
    ) -> Self {
        Self {
            orientation: spawn.orientation,
            body: Body::at(spawn.position),
            state: LocomotionState::Idle,
            metrics: tuning.metrics(box_size),
            tuning,
            gravity_magnitude,
            spawn,
            sphere_rotation: Quat::IDENTITY,
            events: Vec::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn kind(&self) -> LocomotionKind {
        self.state.kind()
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn spawn(&self) -> SpawnPoint {
        self.spawn
    }

    /// Process-wide gravity vector implied by the current floor.
    pub fn gravity(&self) -> Vec3 {
        -self.gravity_magnitude * self.orientation.up()
    }

    /// World rotation of the visible sphere, accumulated from rolling.
    pub fn sphere_rotation(&self) -> Quat {
        self.sphere_rotation
    }

    pub fn events(&self) -> &[MotorEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MotorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        self.metrics = tuning.metrics(self.metrics.box_size);
        self.tuning = tuning;
    }

    /// Hands the rolling direction over from the camera after a turn.
    pub fn set_forward(&mut self, forward: Vec3) -> Result<(), OrientationError> {
        self.orientation = self.orientation.with_forward(forward)?.snapped();
        Ok(())
    }

    /// Advances the machine by one fixed step.
    ///
    /// Predicate transitions are evaluated first on freshly sampled input;
    /// if one fires, the new state starts updating on the next tick. At
    /// most one transition happens per tick, except the Moving -> Moving
    /// continuation which swaps the leg in place.
    pub fn tick(
        &mut self,
        input: &MovementInput,
        ctx: MotorContext,
        probe: &dyn CollisionProbe,
        dt: f32,
    ) {
        if let Some(next) = self.pending_transition(input, ctx, probe) {
            self.change_state(next, input, probe);
            return;
        }
        self.update_state(input, ctx, probe, dt);
    }

    pub fn can_move(&self, ctx: MotorContext, probe: &dyn CollisionProbe) -> bool {
        if matches!(
            self.kind(),
            LocomotionKind::GravityChange | LocomotionKind::Warping | LocomotionKind::Falling
        ) || !ctx.camera_default
            || ctx.paused
        {
            return false;
        }

        let origin = self.probe_origin();
        let up = self.orientation.up();
        let reach = self.probe_reach();

        // Anything ahead, same level or one up, is something to roll onto.
        if probe.hits(origin, self.orientation.forward() - up, reach) {
            return true;
        }

        // Rolling over an edge is only allowed with nothing to either side.
        let left = self.orientation.left();
        !probe.hits(origin, left - up, reach) && !probe.hits(origin, -left - up, reach)
    }

    pub fn can_warp(
        &self,
        input: &MovementInput,
        ctx: MotorContext,
        probe: &dyn CollisionProbe,
    ) -> bool {
        if !ctx.camera_default
            || ctx.paused
            || matches!(
                self.kind(),
                LocomotionKind::Warping | LocomotionKind::Falling | LocomotionKind::GravityChange
            )
        {
            return false;
        }

        let box_size = self.metrics.box_size;
        let position = self.body.position;
        let hits = if self.kind() == LocomotionKind::Moving || input.forward_held {
            probe.probe_all(position, self.orientation.forward(), 2.0 * box_size)
        } else {
            probe.probe_all(
                position,
                self.orientation.up(),
                2.0 * box_size + self.metrics.rest_offset(),
            )
        };

        all_hits_within(&hits, box_size)
    }

    pub fn next_block_level(&self, probe: &dyn CollisionProbe) -> BlockLevel {
        let direction = self.orientation.forward() - self.orientation.up();
        match probe.probe(self.probe_origin(), direction, self.probe_reach()) {
            Some(distance) if distance < self.metrics.box_size => BlockLevel::Up,
            Some(_) => BlockLevel::Level,
            None => BlockLevel::Down,
        }
    }

    /// Forced exit to Idle in place (death, game over). Always restores the
    /// gravity and collision flags whatever state was interrupted.
    pub fn halt(&mut self) {
        let from = self.kind();
        self.on_forced_exit();
        self.state = LocomotionState::Idle;

        if from != LocomotionKind::Idle {
            self.events.push(MotorEvent::StateChanged {
                from,
                to: LocomotionKind::Idle,
            });
        }
    }

    /// Level restart: back to the spawn point, Idle, flags restored, any
    /// in-flight leg discarded.
    pub fn reset(&mut self) {
        self.halt();
        self.orientation = self.spawn.orientation;
        self.body.position = self.spawn.position;
        self.sphere_rotation = Quat::IDENTITY;
        self.events.push(MotorEvent::Anim(AnimEvent::Moving(false)));
    }

    /// Moves the player into a freshly loaded level.
    pub fn respawn(&mut self, spawn: SpawnPoint, box_size: f32, gravity_magnitude: f32) {
        self.spawn = spawn;
        self.metrics = self.tuning.metrics(box_size);
        self.gravity_magnitude = gravity_magnitude;
        self.reset();
    }

    fn on_forced_exit(&mut self) {
        self.body.restore_flags();
        self.body.stop();
    }

    fn probe_origin(&self) -> Vec3 {
        let up = self.orientation.up();
        self.metrics.snap_up(self.body.position, up)
            + (self.metrics.box_size - self.metrics.sphere_radius) * up
    }

    fn probe_reach(&self) -> f32 {
        self.tuning.probe_length * self.metrics.box_size
    }

    fn pending_transition(
        &self,
        input: &MovementInput,
        ctx: MotorContext,
        probe: &dyn CollisionProbe,
    ) -> Option<Next> {
        match &self.state {
            LocomotionState::Idle => {
                if input.warp_pressed && self.can_warp(input, ctx, probe) {
                    Some(Next::Warping)
                } else if input.forward_held && self.can_move(ctx, probe) {
                    Some(Next::Moving { after_shift: false })
                } else {
                    None
                }
            }
            LocomotionState::Moving(_) => {
                (input.warp_pressed && self.can_warp(input, ctx, probe)).then_some(Next::Warping)
            }
            LocomotionState::Falling(fall) => fall.grounded.then_some(Next::Idle),
            LocomotionState::GravityChange(_) | LocomotionState::Warping(_) => None,
        }
    }

    fn update_state(
        &mut self,
        input: &MovementInput,
        ctx: MotorContext,
        probe: &dyn CollisionProbe,
        dt: f32,
    ) {
        match self.state {
            LocomotionState::Idle => self.update_idle(input, probe),
            LocomotionState::Moving(intent) => self.update_moving(intent, input, ctx, probe, dt),
            LocomotionState::GravityChange(shift) => {
                self.update_gravity_change(shift, input, probe, dt)
            }
            LocomotionState::Warping(jump) => self.update_warping(jump, input, probe, dt),
            LocomotionState::Falling(fall) => self.update_falling(fall, probe, dt),
        }
    }

    fn update_idle(&mut self, input: &MovementInput, probe: &dyn CollisionProbe) {
        self.body.stop();

        let reach = self.metrics.sphere_radius * self.tuning.idle_probe_factor;
        if !probe.hits(self.body.position, -self.orientation.up(), reach) {
            self.change_state(Next::Falling, input, probe);
        }
    }

    fn update_moving(
        &mut self,
        mut intent: MoveIntent,
        input: &MovementInput,
        ctx: MotorContext,
        probe: &dyn CollisionProbe,
        dt: f32,
    ) {
        intent.elapsed += dt;
        let step = quad_ease_in(
            intent.start,
            intent.target,
            intent.elapsed,
            intent.ease_in,
            self.tuning.speed,
        );
        self.roll_to(step.position);

        if !step.arrived {
            self.state = LocomotionState::Moving(intent);
            return;
        }

        match intent.level {
            BlockLevel::Down => {
                self.change_state(Next::GravityChange(ShiftOrigin::EdgeRoll), input, probe)
            }
            BlockLevel::Up => {
                self.change_state(Next::GravityChange(ShiftOrigin::Climb), input, probe)
            }
            BlockLevel::Level => {
                if input.forward_held && self.can_move(ctx, probe) {
                    let next = self.begin_move(probe, true);
                    debug!("Rolling on: next block level {}", next.level.as_i8());
                    self.state = LocomotionState::Moving(next);
                } else {
                    self.change_state(Next::Idle, input, probe);
                }
            }
        }
    }

    fn update_gravity_change(
        &mut self,
        shift: GravityShift,
        input: &MovementInput,
        probe: &dyn CollisionProbe,
        dt: f32,
    ) {
        let Some(mut roll) = shift.roll else {
            let next = match shift.origin {
                ShiftOrigin::Warp(_) => Next::Falling,
                ShiftOrigin::EdgeRoll | ShiftOrigin::Climb => Next::Moving { after_shift: true },
            };
            self.change_state(next, input, probe);
            return;
        };

        let angular_speed = self.tuning.edge_angular_speed(self.metrics.box_size);
        let step = (angular_speed * dt).min(90.0 - roll.degrees_done).max(0.0);
        let rotation = Quat::from_axis_angle(roll.axis, step.to_radians());
        self.body.position = roll.contact_point + rotation * (self.body.position - roll.contact_point);
        self.sphere_rotation = (rotation * self.sphere_rotation).normalize();
        roll.degrees_done += step;

        if roll.degrees_done >= 90.0 - 1e-3 {
            self.body.position =
                roll.contact_point + self.orientation.up() * self.metrics.sphere_radius;
            self.body.gravity_enabled = true;
            self.change_state(Next::Moving { after_shift: true }, input, probe);
        } else {
            self.state = LocomotionState::GravityChange(GravityShift {
                roll: Some(roll),
                ..shift
            });
        }
    }

    fn update_warping(
        &mut self,
        mut jump: WarpJump,
        input: &MovementInput,
        probe: &dyn CollisionProbe,
        dt: f32,
    ) {
        jump.elapsed += dt;

        match jump.phase {
            WarpPhase::Dissolving => {
                if jump.elapsed >= self.tuning.warp_dissolve_time {
                    self.body.position = jump.target;
                    self.body.stop();
                    jump.phase = WarpPhase::Hovering;
                    jump.elapsed = 0.0;
                }
            }
            WarpPhase::Hovering => {
                if jump.elapsed > self.tuning.hover_time {
                    let reach = self.tuning.warp_face_probe * self.metrics.box_size;
                    let result =
                        select_warp_face(probe, self.body.position, &self.orientation, reach);
                    match result.face {
                        Some(face) => debug!("Warp landed next to face {:?}", face),
                        None => debug!("Warp found no face, falling"),
                    }
                    self.change_state(
                        Next::GravityChange(ShiftOrigin::Warp(result)),
                        input,
                        probe,
                    );
                    return;
                }
            }
        }

        self.state = LocomotionState::Warping(jump);
    }

    fn update_falling(&mut self, mut fall: FallTracker, probe: &dyn CollisionProbe, dt: f32) {
        let down = -self.orientation.up();
        let radius = self.metrics.sphere_radius;

        if self.body.gravity_enabled {
            self.body.velocity += self.gravity() * dt;
        }
        let displacement = self.body.velocity * dt;
        let drop = displacement.dot(down).max(0.0);

        let contact = if self.body.collision_enabled {
            let reach = radius * self.tuning.landing_probe_factor + drop;
            probe.probe(self.body.position, down, reach)
        } else {
            None
        };

        match contact {
            Some(distance) => {
                self.body.position += down * (distance - radius).max(0.0);
                self.body.stop();
                fall.grounded = true;
            }
            None => self.body.position += displacement,
        }

        if !probe.hits(self.body.position, down, self.tuning.fall_death_probe) {
            fall.unsupported += dt;
        }

        if fall.unsupported > self.tuning.fall_death_time && !fall.death_reported {
            fall.death_reported = true;
            info!(
                "Player fell off the level after {:.2}s without ground",
                fall.unsupported
            );
            self.events.push(MotorEvent::Died);
        }

        self.state = LocomotionState::Falling(fall);
    }

    fn change_state(&mut self, next: Next, input: &MovementInput, probe: &dyn CollisionProbe) {
        let from = self.kind();
        self.exit_state();
        self.state = self.enter_state(next, from, input, probe);
        let to = self.kind();

        self.events.push(MotorEvent::StateChanged { from, to });
    }

    fn exit_state(&mut self) {
        match self.state {
            LocomotionState::Idle => self.events.push(MotorEvent::Anim(AnimEvent::Moving(true))),
            LocomotionState::Moving(_) => {}
            LocomotionState::GravityChange(_) => self.body.gravity_enabled = true,
            LocomotionState::Warping(_) => self.body.collision_enabled = true,
            LocomotionState::Falling(_) => self.events.push(MotorEvent::Anim(AnimEvent::Impact)),
        }
    }

    fn enter_state(
        &mut self,
        next: Next,
        from: LocomotionKind,
        input: &MovementInput,
        probe: &dyn CollisionProbe,
    ) -> LocomotionState {
        match next {
            Next::Idle => {
                self.body.stop();
                self.events.push(MotorEvent::Anim(AnimEvent::Moving(false)));
                LocomotionState::Idle
            }
            Next::Moving { after_shift: true } => LocomotionState::Moving(self.resume_after_shift()),
            Next::Moving { after_shift: false } => {
                LocomotionState::Moving(self.begin_move(probe, false))
            }
            Next::GravityChange(origin) => LocomotionState::GravityChange(self.begin_shift(origin)),
            Next::Warping => {
                let forward = from == LocomotionKind::Moving || input.forward_held;
                LocomotionState::Warping(self.begin_warp(forward))
            }
            Next::Falling => LocomotionState::Falling(FallTracker::default()),
        }
    }

    fn begin_move(&self, probe: &dyn CollisionProbe, continuing: bool) -> MoveIntent {
        let level = self.next_block_level(probe);
        let up = self.orientation.up();
        let box_size = self.metrics.box_size;
        let start = self.metrics.snap_all(self.body.position, up);
        let reach = level.reach(self.metrics.sphere_radius / box_size) * box_size;

        MoveIntent {
            level,
            start,
            target: start + self.orientation.forward() * reach,
            elapsed: 0.0,
            ease_in: if continuing {
                0.0
            } else {
                self.tuning.ease_in_time
            },
        }
    }

    /// Second half of an edge or climb: from the edge to the middle of
    /// the new face, without easing.
    fn resume_after_shift(&self) -> MoveIntent {
        let up = self.orientation.up();
        let start = self.metrics.snap_up(self.body.position, up);
        let target = self.metrics.snap_all(
            start + self.orientation.forward() * 0.5 * self.metrics.box_size,
            up,
        );

        MoveIntent {
            level: BlockLevel::Level,
            start,
            target,
            elapsed: 0.0,
            ease_in: 0.0,
        }
    }

    fn begin_shift(&mut self, origin: ShiftOrigin) -> GravityShift {
        let roll = match origin {
            ShiftOrigin::EdgeRoll => {
                let before = self.orientation;
                let contact_point =
                    self.body.position - before.up() * self.metrics.sphere_radius;
                self.orientation = before.roll_over_edge();
                // No gravity while pivoting, otherwise the sphere slides off the edge.
                self.body.gravity_enabled = false;
                Some(EdgeRoll {
                    contact_point,
                    axis: before.left(),
                    degrees_done: 0.0,
                })
            }
            ShiftOrigin::Climb => {
                self.orientation = self.orientation.climb();
                self.body.gravity_enabled = true;
                None
            }
            ShiftOrigin::Warp(result) => {
                self.orientation = result.orientation;
                self.body.gravity_enabled = true;
                None
            }
        };

        self.events.push(MotorEvent::GravityChanged(self.orientation));
        GravityShift { origin, roll }
    }

    fn begin_warp(&mut self, forward: bool) -> WarpJump {
        let up = self.orientation.up();
        let box_size = self.metrics.box_size;
        let base = self.metrics.snap_all(self.body.position, up);
        let target = if forward {
            base + self.orientation.forward() * 2.0 * box_size + up * self.metrics.rest_offset()
        } else {
            base + up * (2.0 * box_size + self.metrics.rest_offset())
        };

        self.body.gravity_enabled = false;
        self.body.collision_enabled = false;
        self.body.stop();
        self.events.push(MotorEvent::Anim(AnimEvent::Warp));

        WarpJump {
            target,
            forward,
            phase: WarpPhase::Dissolving,
            elapsed: 0.0,
        }
    }

    fn roll_to(&mut self, position: Vec3) {
        let distance = position.distance(self.body.position);
        let radius = self.metrics.sphere_radius;
        if distance > 0.0 && radius > 0.0 {
            let spin = Quat::from_axis_angle(self.orientation.left(), distance / radius);
            self.sphere_rotation = (spin * self.sphere_rotation).normalize();
        }
        self.body.position = position;
    }
}
