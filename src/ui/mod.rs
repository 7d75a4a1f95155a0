//! UI domain: level HUD and state banners.

mod banner;
mod hud;


pub use banner::{StateBanner, banner_text};
pub use hud::{HudFlash, HudLine, LevelHud, format_time, hud_text, scored_line};

use bevy::prelude::*;

use crate::ui::banner::sync_state_banner;
use crate::ui::hud::{flash_scored_lines, spawn_level_hud, update_level_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level_hud)
            .add_systems(
                Update,
                (update_level_hud, flash_scored_lines, sync_state_banner),
            );
    }
}
