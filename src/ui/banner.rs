//! UI domain: full-screen banner for paused, won, lost and game over.

use bevy::prelude::*;

use crate::core::GameState;

/// Marker for the banner overlay
#[derive(Component)]
pub struct StateBanner;

/// Title and hint shown for `state`, if it has a banner.
pub fn banner_text(state: GameState) -> Option<(&'static str, &'static str)> {
    match state {
        GameState::Paused => Some(("PAUSED", "Press Esc to resume")),
        GameState::Won => Some(("LEVEL COMPLETE", "Press Enter for the next level")),
        GameState::Lost => Some(("YOU FELL", "Press Enter to try again")),
        GameState::GameOver => Some(("GAME OVER", "Press Enter to start over")),
        GameState::Boot | GameState::Playing => None,
    }
}

fn banner_color(state: GameState) -> Color {
    match state {
        GameState::Won => Color::srgb(0.3, 0.9, 0.4),
        GameState::Lost | GameState::GameOver => Color::srgb(0.85, 0.2, 0.15),
        _ => Color::srgb(0.9, 0.9, 0.95),
    }
}

pub(crate) fn sync_state_banner(
    mut commands: Commands,
    state: Res<State<GameState>>,
    existing: Query<Entity, With<StateBanner>>,
) {
    if !state.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let state = *state.get();
    let Some((title, hint)) = banner_text(state) else {
        return;
    };

    commands
        .spawn((
            StateBanner,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(banner_color(state)),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(hint),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        });
}
