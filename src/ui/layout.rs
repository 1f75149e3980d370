//! Screen layout and clickable hotspots.
//!
//! Drawing and mouse hit-testing share these rectangles so a click lands on
//! exactly what was drawn there.

use crate::core::{GameState, Overlay};
use crate::input::GameAction;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The fixed regions of the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub hud: Rect,
    pub scene: Rect,
    /// Fish, collection, achievements, sit
    pub buttons: [Rect; 4],
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // HUD
            Constraint::Min(8),    // Scene
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[2]);

    ScreenLayout {
        hud: rows[0],
        scene: rows[1],
        buttons: [buttons[0], buttons[1], buttons[2], buttons[3]],
    }
}

/// A dialog of at most `width` x `height` centered in `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Catch notice box inside the scene.
pub fn catch_notice_rect(scene: Rect) -> Rect {
    centered_rect(scene, 40, 7)
}

pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(area, 64, 20)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Action for a left click at (`column`, `row`), if it hit a hotspot.
///
/// With an overlay open, a click anywhere outside it dismisses it.
pub fn hotspot_at(area: Rect, state: &GameState, column: u16, row: u16) -> Option<GameAction> {
    if state.overlay != Overlay::None {
        return (!contains(overlay_rect(area), column, row)).then_some(GameAction::Dismiss);
    }

    let layout = screen_layout(area);
    if state.player.current_catch.is_some()
        && contains(catch_notice_rect(layout.scene), column, row)
    {
        return Some(GameAction::Dismiss);
    }

    let actions = [
        GameAction::Fish,
        GameAction::OpenCollection,
        GameAction::OpenAchievements,
        GameAction::ToggleSit,
    ];
    layout
        .buttons
        .iter()
        .zip(actions)
        .find(|(rect, _)| contains(**rect, column, row))
        .map(|(_, action)| action)
}
