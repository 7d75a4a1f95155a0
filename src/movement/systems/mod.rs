//! Movement domain: system modules for input and locomotion updates.

pub(crate) mod input;
pub(crate) mod locomotion;

pub(crate) use input::read_input;
pub(crate) use locomotion::{
    apply_tuning_changes, halt_player_on_death, play_sphere_animations, publish_motor_events,
    reset_player_on_restart, sync_player_transform, tick_player_motor,
};
