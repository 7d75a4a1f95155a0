//! Camera domain: the follow camera's state machine.

use bevy::prelude::*;

use crate::camera::resources::CameraTuning;
use crate::grid::{GridMetrics, Orientation, Turn, move_towards, move_towards_vec};
use crate::movement::{LocomotionKind, Tilt};

/// Data-less view of [`CameraState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMode {
    Default,
    Rotate,
    GravChange,
    Warp,
    Pause,
    Anim,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    /// Smoothly follows the player from behind.
    Default,
    /// Quarter or half turn about the player's up axis.
    Rotate {
        turn: Turn,
        base_forward: Vec3,
        progress: f32,
    },
    /// Blends the camera basis onto the player's new gravity axis.
    GravChange {
        start_up: Vec3,
        start_dir: Vec3,
        target_up: Vec3,
        target_dir: Vec3,
        progress: f32,
    },
    /// Tracks the spot the player will reappear at.
    Warp,
    /// Parked at the level's overview pose.
    Pause,
    /// Level intro: flies from the overview pose down to the follow pose.
    Anim { elapsed: f32 },
    Falling,
}

impl CameraState {
    pub fn mode(&self) -> CameraMode {
        match self {
            CameraState::Default => CameraMode::Default,
            CameraState::Rotate { .. } => CameraMode::Rotate,
            CameraState::GravChange { .. } => CameraMode::GravChange,
            CameraState::Warp => CameraMode::Warp,
            CameraState::Pause => CameraMode::Pause,
            CameraState::Anim { .. } => CameraMode::Anim,
            CameraState::Falling => CameraMode::Falling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

/// Fixed overview pose used while paused and as the start of the intro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PausePose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for PausePose {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.5, 6.5, -6.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// What the rig needs to know about the rest of the game this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigInput {
    /// -1 left, 0 none, 1 right
    pub horizontal: i8,
    pub back_held: bool,
    pub tilt: Tilt,
    pub player_kind: LocomotionKind,
    pub player_position: Vec3,
    pub player_orientation: Orientation,
    /// Where a warping player reappears.
    pub warp_target: Option<Vec3>,
    /// False while paused, won, lost or game over.
    pub game_default: bool,
}

/// Side effects the rig asks the rest of the game to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigCommand {
    /// A turn finished: the player now rolls along the camera's direction.
    SetPlayerForward(Vec3),
}

#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    state: CameraState,
    tuning: CameraTuning,
    metrics: GridMetrics,
    pose: CameraPose,
    up: Vec3,
    dir: Vec3,
    dir_offset: f32,
    up_offset: f32,
    pause_pose: PausePose,
    intro_duration: f32,
    grav_change_pending: bool,
    intro_requested: bool,
    intro_done: bool,
}

impl CameraRig {
    pub fn new(
        tuning: CameraTuning,
        metrics: GridMetrics,
        start: Orientation,
        pause_pose: PausePose,
        intro_duration: f32,
    ) -> Self {
        let mut rig = Self {
            state: CameraState::Anim { elapsed: 0.0 },
            tuning,
            metrics,
            pose: CameraPose {
                position: pause_pose.position,
                look_at: pause_pose.look_at,
                up: start.up(),
            },
            up: start.up(),
            dir: start.forward(),
            dir_offset: tuning.dir_offset,
            up_offset: tuning.up_offset,
            pause_pose,
            intro_duration,
            grav_change_pending: false,
            intro_requested: false,
            intro_done: false,
        };
        rig.reset(start);
        rig
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode()
    }

    /// Only a camera in its follow state lets the player act.
    pub fn is_default(&self) -> bool {
        self.mode() == CameraMode::Default
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn direction(&self) -> Vec3 {
        self.dir
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Current (direction, up) offsets after tilting.
    pub fn offsets(&self) -> (f32, f32) {
        (self.dir_offset, self.up_offset)
    }

    pub fn set_tuning(&mut self, tuning: CameraTuning) {
        self.tuning = tuning;
    }

    /// Level-specific settings, applied on level load.
    pub fn configure(&mut self, metrics: GridMetrics, pause_pose: PausePose, intro_duration: f32) {
        self.metrics = metrics;
        self.pause_pose = pause_pose;
        self.intro_duration = intro_duration;
    }

    pub fn trigger_grav_change(&mut self) {
        self.grav_change_pending = true;
    }

    /// Replays the intro from the follow state.
    pub fn request_intro(&mut self) {
        self.intro_requested = true;
    }

    /// Signals the intro animation finished.
    pub fn end_intro(&mut self) {
        self.intro_done = true;
    }

    /// Level restart: straight back into the intro, all triggers cleared.
    pub fn reset(&mut self, start: Orientation) {
        self.grav_change_pending = false;
        self.intro_requested = false;
        self.intro_done = false;
        self.up = start.up();
        self.dir = start.forward();
        self.dir_offset = self.tuning.dir_offset;
        self.up_offset = self.tuning.up_offset;
        self.pose = CameraPose {
            position: self.pause_pose.position,
            look_at: self.pause_pose.look_at,
            up: self.up,
        };
        self.state = CameraState::Anim { elapsed: 0.0 };
    }

    /// One frame: at most one predicate transition, then the state's update.
    pub fn update(&mut self, input: &RigInput, dt: f32) -> Vec<RigCommand> {
        let mut commands = Vec::new();

        if let Some(next) = self.pending_transition(input) {
            self.change_state(next, input, &mut commands);
        }
        self.update_state(input, dt, &mut commands);

        commands
    }

    fn pending_transition(&self, input: &RigInput) -> Option<CameraMode> {
        let player = input.player_kind;

        match self.state {
            CameraState::Default => {
                let turn_requested = input.horizontal != 0 || input.back_held;
                if turn_requested && player == LocomotionKind::Idle {
                    Some(CameraMode::Rotate)
                } else if player == LocomotionKind::Warping {
                    Some(CameraMode::Warp)
                } else if self.intro_requested {
                    Some(CameraMode::Anim)
                } else if self.grav_change_pending {
                    Some(CameraMode::GravChange)
                } else if !input.game_default {
                    Some(CameraMode::Pause)
                } else if player == LocomotionKind::Falling {
                    Some(CameraMode::Falling)
                } else {
                    None
                }
            }
            CameraState::Warp => {
                if player != LocomotionKind::Warping {
                    Some(CameraMode::GravChange)
                } else if !input.game_default {
                    Some(CameraMode::Pause)
                } else {
                    None
                }
            }
            CameraState::GravChange { .. } => (!input.game_default).then_some(CameraMode::Pause),
            CameraState::Pause => input.game_default.then_some(CameraMode::Default),
            CameraState::Anim { .. } => self.intro_done.then_some(CameraMode::Default),
            CameraState::Falling => {
                if player != LocomotionKind::Falling {
                    Some(CameraMode::Default)
                } else if !input.game_default {
                    Some(CameraMode::Pause)
                } else {
                    None
                }
            }
            CameraState::Rotate { .. } => None,
        }
    }

    fn change_state(&mut self, next: CameraMode, input: &RigInput, commands: &mut Vec<RigCommand>) {
        let from = self.mode();
        let handed_forward = self.exit_state(input, commands);
        self.state = self.enter_state(next, input, handed_forward);
        debug!("Camera {:?} -> {:?}", from, self.mode());
    }

    fn exit_state(&mut self, input: &RigInput, commands: &mut Vec<RigCommand>) -> Option<Vec3> {
        match self.state {
            CameraState::Rotate { .. } => {
                let forward = self.dir.round();
                commands.push(RigCommand::SetPlayerForward(forward));
                Some(forward)
            }
            CameraState::GravChange { .. } => {
                self.grav_change_pending = false;
                None
            }
            CameraState::Pause => {
                let anchor = self.snapped_player(input);
                self.pose = CameraPose {
                    position: self.follow_target(anchor),
                    look_at: self.look_at(anchor),
                    up: self.up,
                };
                None
            }
            CameraState::Anim { .. } => {
                self.intro_done = false;
                None
            }
            CameraState::Default | CameraState::Warp | CameraState::Falling => None,
        }
    }

    fn enter_state(
        &mut self,
        next: CameraMode,
        input: &RigInput,
        handed_forward: Option<Vec3>,
    ) -> CameraState {
        let player = input.player_orientation;

        match next {
            CameraMode::Default => {
                self.up = player.up();
                self.dir = handed_forward.unwrap_or(player.forward());
                CameraState::Default
            }
            CameraMode::Rotate => {
                let turn = match input.horizontal {
                    h if h < 0 => Turn::Left,
                    h if h > 0 => Turn::Right,
                    _ => Turn::Back,
                };
                CameraState::Rotate {
                    turn,
                    base_forward: player.forward(),
                    progress: 0.0,
                }
            }
            CameraMode::GravChange => CameraState::GravChange {
                start_up: self.up,
                start_dir: self.dir,
                target_up: player.up(),
                target_dir: player.forward(),
                progress: 0.0,
            },
            CameraMode::Warp => {
                self.up = player.up();
                self.dir = player.forward();
                CameraState::Warp
            }
            CameraMode::Pause => {
                self.pose = CameraPose {
                    position: self.pause_pose.position,
                    look_at: self.pause_pose.look_at,
                    up: self.up,
                };
                CameraState::Pause
            }
            CameraMode::Anim => {
                self.intro_requested = false;
                self.pose.position = self.pause_pose.position;
                self.pose.look_at = self.pause_pose.look_at;
                CameraState::Anim { elapsed: 0.0 }
            }
            CameraMode::Falling => {
                self.up = player.up();
                self.dir = player.forward();
                CameraState::Falling
            }
        }
    }

    fn update_state(&mut self, input: &RigInput, dt: f32, commands: &mut Vec<RigCommand>) {
        match self.state {
            CameraState::Default => {
                self.tilt(input.tilt, dt);
                let anchor = self.snapped_player(input);
                self.follow(anchor, dt * self.tuning.follow_speed);
            }
            CameraState::Rotate {
                turn,
                base_forward,
                progress,
            } => {
                let progress = (progress + dt * self.tuning.rot_speed).clamp(0.0, 1.0);
                let angle = progress * turn.degrees().to_radians();
                self.dir = Quat::from_axis_angle(input.player_orientation.up(), angle) * base_forward;

                self.tilt(input.tilt, dt);
                let anchor = self.snapped_player(input);
                self.place(anchor);

                if progress >= 1.0 {
                    self.change_state(CameraMode::Default, input, commands);
                } else {
                    self.state = CameraState::Rotate {
                        turn,
                        base_forward,
                        progress,
                    };
                }
            }
            CameraState::GravChange {
                start_up,
                start_dir,
                target_up,
                target_dir,
                progress,
            } => {
                let progress = (progress + dt * self.tuning.rot_speed).clamp(0.0, 1.0);
                if progress >= 1.0 {
                    self.up = target_up;
                    self.dir = target_dir;
                } else {
                    self.up = slerp_axis(start_up, target_up, progress);
                    self.dir = slerp_axis(start_dir, target_dir, progress);
                }

                self.tilt(input.tilt, dt);
                self.place(input.player_position);

                if progress >= 1.0 {
                    self.change_state(CameraMode::Default, input, commands);
                } else {
                    self.state = CameraState::GravChange {
                        start_up,
                        start_dir,
                        target_up,
                        target_dir,
                        progress,
                    };
                }
            }
            CameraState::Warp => {
                self.tilt(input.tilt, dt);
                let anchor = input.warp_target.unwrap_or(input.player_position);
                let target = self.follow_target(anchor);
                let step = dt * self.tuning.follow_speed * self.tuning.warp_follow_factor;
                self.pose.position = move_towards_vec(self.pose.position, target, step);
            }
            CameraState::Pause => {}
            CameraState::Anim { elapsed } => {
                let elapsed = elapsed + dt;
                let t = if self.intro_duration > 0.0 {
                    (elapsed / self.intro_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let eased = t * t * (3.0 - 2.0 * t);

                let anchor = self.snapped_player(input);
                self.pose = CameraPose {
                    position: self
                        .pause_pose
                        .position
                        .lerp(self.follow_target(anchor), eased),
                    look_at: self.pause_pose.look_at.lerp(self.look_at(anchor), eased),
                    up: self.up,
                };

                if t >= 1.0 && !self.intro_done {
                    self.end_intro();
                }
                self.state = CameraState::Anim { elapsed };
            }
            CameraState::Falling => {
                self.tilt(input.tilt, dt);
                self.follow(input.player_position, dt * self.tuning.follow_speed);
            }
        }
    }

    fn tilt(&mut self, tilt: Tilt, dt: f32) {
        let (dir, up) = match tilt {
            Tilt::Level => (self.tuning.dir_offset, self.tuning.up_offset),
            Tilt::Up => (self.tuning.tilt_up.dir, self.tuning.tilt_up.up),
            Tilt::Down => (self.tuning.tilt_down.dir, self.tuning.tilt_down.up),
        };
        let step = dt * self.tuning.tilt_speed;
        self.dir_offset = move_towards(self.dir_offset, dir, step);
        self.up_offset = move_towards(self.up_offset, up, step);
    }

    fn snapped_player(&self, input: &RigInput) -> Vec3 {
        self.metrics
            .snap_up(input.player_position, input.player_orientation.up())
    }

    fn follow_target(&self, anchor: Vec3) -> Vec3 {
        anchor + self.dir * self.dir_offset + self.up * self.up_offset
    }

    fn look_at(&self, anchor: Vec3) -> Vec3 {
        anchor + self.up * self.tuning.look_at_up_offset
    }

    /// Eases the camera towards its follow position.
    fn follow(&mut self, anchor: Vec3, max_step: f32) {
        let target = self.follow_target(anchor);
        self.pose = CameraPose {
            position: move_towards_vec(self.pose.position, target, max_step),
            look_at: self.look_at(anchor),
            up: self.up,
        };
    }

    /// Puts the camera straight onto its follow position.
    fn place(&mut self, anchor: Vec3) {
        self.pose = CameraPose {
            position: self.follow_target(anchor),
            look_at: self.look_at(anchor),
            up: self.up,
        };
    }
}

fn slerp_axis(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let arc = Quat::from_rotation_arc(from, to);
    Quat::IDENTITY.slerp(arc, t) * from
}
