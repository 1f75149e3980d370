pub mod layout;
pub mod overlays;
pub mod scene;

use crate::core::{GameState, Overlay};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main UI drawing function. `frame_count` animates the scene.
pub fn draw(frame: &mut Frame, state: &GameState, frame_count: u64) {
    let screen = layout::screen_layout(frame.size());

    draw_hud(frame, screen.hud, state);
    scene::draw_scene(frame, screen.scene, state, frame_count);
    draw_buttons(frame, screen.buttons, state);

    if let Some(fish) = &state.player.current_catch {
        overlays::draw_catch_notice(frame, screen.scene, fish);
    }

    match state.overlay {
        Overlay::Collection => overlays::draw_collection(frame, state),
        Overlay::Achievements => overlays::draw_achievements(frame, state),
        Overlay::None => {}
    }
}

fn format_countdown(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn hud_line(state: &GameState) -> Line<'static> {
    let weather = state.current_weather();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Fish: ", label),
        Span::styled(state.player.total_fish_caught.to_string(), value),
        Span::raw("   "),
        Span::styled("Weather: ", label),
        Span::styled(format!("{} {}", weather.icon(), weather), value),
        Span::styled(
            format!(" (next in {})", format_countdown(state.weather.remaining().as_secs())),
            label,
        ),
        Span::raw("   "),
        Span::styled("Achievements: ", label),
        Span::styled(
            format!(
                "{}/{}",
                state.achievements.unlocked_count(),
                state.achievements.total_count()
            ),
            value,
        ),
    ];
    if state.is_offline() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "[offline]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn draw_hud(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Lakeside ")
        .title_alignment(Alignment::Center);
    frame.render_widget(
        Paragraph::new(hud_line(state))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_buttons(frame: &mut Frame, areas: [Rect; 4], state: &GameState) {
    let player = &state.player;
    let labels = [
        if player.is_fishing() {
            "[Space] Reel in"
        } else {
            "[Space] Cast line"
        },
        "[c] Collection",
        "[a] Achievements",
        if player.is_sitting() {
            "[Down] Stand up"
        } else {
            "[Down] Sit down"
        },
    ];
    let dimmed = state.overlay != Overlay::None;

    for (area, label) in areas.into_iter().zip(labels) {
        let style = if dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
