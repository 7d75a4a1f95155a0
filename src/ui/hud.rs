//! UI domain: level HUD with time, points and energy.

use bevy::color::Mix;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::Currency;
use crate::level::{LevelSession, ScoredEvent};
use crate::save::SaveData;

pub const HUD_PADDING: f32 = 16.0;
/// How long a HUD line stays highlighted after it scored.
pub const FLASH_TIME: f32 = 0.4;

/// Marker for the HUD container
#[derive(Component)]
pub struct LevelHud;

/// Which session value a HUD line shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Level,
    Time,
    Points,
    Energy,
    Total,
}

/// Highlight on a HUD line, fading back to its own color.
#[derive(Component, Debug, Clone, Copy)]
pub struct HudFlash {
    pub base: Color,
    pub left: f32,
}

impl HudFlash {
    pub fn new(base: Color) -> Self {
        Self { base, left: 0.0 }
    }

    pub fn color(&self) -> Color {
        self.base.mix(&Color::WHITE, (self.left / FLASH_TIME).clamp(0.0, 1.0))
    }
}

/// Line that lights up for a pickup. Secrets have no line of their own.
pub fn scored_line(currency: Currency) -> Option<HudLine> {
    match currency {
        Currency::Points => Some(HudLine::Points),
        Currency::Energy => Some(HudLine::Energy),
        Currency::Secret => None,
    }
}

/// `m:ss`, rounded up so the display reads 0:00 only once time is out.
pub fn format_time(seconds: f32) -> String {
    let whole = seconds.max(0.0).ceil() as u32;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn hud_text(line: HudLine, session: &LevelSession, save: &SaveData) -> String {
    match line {
        HudLine::Level => format!("{}. {}", session.level_index + 1, session.level_name),
        HudLine::Time => format!("Time {}", format_time(session.remaining())),
        HudLine::Points => format!("Points {}", session.points),
        HudLine::Energy => format!("Energy {} / {}", session.energy, session.target_energy),
        HudLine::Total => format!("Total {}", save.total_points),
    }
}

pub(crate) fn spawn_level_hud(mut commands: Commands) {
    commands
        .spawn((
            LevelHud,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            for (line, size, color) in [
                (HudLine::Level, 22.0, Color::srgb(0.9, 0.9, 0.95)),
                (HudLine::Time, 18.0, Color::srgb(0.8, 0.8, 0.85)),
                (HudLine::Points, 18.0, Color::srgb(0.95, 0.8, 0.2)),
                (HudLine::Energy, 18.0, Color::srgb(0.2, 0.9, 0.95)),
                (HudLine::Total, 16.0, Color::srgb(0.6, 0.6, 0.65)),
            ] {
                parent.spawn((
                    line,
                    HudFlash::new(color),
                    Text::new(""),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(color),
                ));
            }
        });
}

pub(crate) fn update_level_hud(
    session: Res<LevelSession>,
    save: Res<SaveData>,
    mut query: Query<(&HudLine, &mut Text)>,
) {
    if !session.is_changed() && !save.is_changed() {
        return;
    }

    for (line, mut text) in &mut query {
        let value = hud_text(*line, &session, &save);
        if **text != value {
            **text = value;
        }
    }
}

pub(crate) fn flash_scored_lines(
    time: Res<Time>,
    mut events: MessageReader<ScoredEvent>,
    mut query: Query<(&HudLine, &mut HudFlash, &mut TextColor)>,
) {
    let scored: Vec<HudLine> = events
        .read()
        .filter_map(|event| scored_line(event.currency))
        .collect();

    for (line, mut flash, mut color) in &mut query {
        if scored.contains(line) {
            flash.left = FLASH_TIME;
        } else if flash.left <= 0.0 {
            continue;
        } else {
            flash.left = (flash.left - time.delta_secs()).max(0.0);
        }
        color.0 = flash.color();
    }
}
