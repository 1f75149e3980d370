//! Catch notice and the two modal overlays.

use super::layout::{catch_notice_rect, overlay_rect};
use crate::achievements::ALL_ACHIEVEMENTS;
use crate::core::GameState;
use crate::fishing::{summarize, CaughtFish};
use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Formats a millisecond timestamp as a local date.
pub fn format_date(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn dialog_block(title: &str, accent: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Center)
}

/// Small box over the scene announcing the latest catch.
pub fn draw_catch_notice(frame: &mut Frame, scene: Rect, fish: &CaughtFish) {
    let area = catch_notice_rect(scene);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", fish.species.icon(), fish.species),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} cm", fish.size_cm)),
        Line::from(format!("Caught in {} {}", fish.weather.icon(), fish.weather)),
        Line::from(Span::styled("[Enter] OK", HINT_STYLE)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(dialog_block("You caught a fish!", Color::Yellow)),
        area,
    );
}

fn collection_lines(state: &GameState) -> Vec<Line<'static>> {
    let summary = summarize(&state.collection);
    let mut lines = vec![Line::from(vec![
        Span::raw("Total caught: "),
        Span::styled(
            summary.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Species: {}/{}   Biggest: {} cm",
            summary.species_discovered(),
            summary.species.len(),
            summary.biggest_cm
        )),
    ])];
    lines.push(Line::from(""));

    for entry in &summary.species {
        if entry.has_caught() {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", entry.species.icon())),
                Span::styled(
                    format!("{:<8}", entry.species.name()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    " x{:<4} best {:>3} cm  avg {:>3} cm",
                    entry.count, entry.biggest_cm, entry.average_cm
                )),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("?  {:<8}  not caught yet", "???"),
                HINT_STYLE,
            )));
        }
    }

    if !summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Recent catches",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for fish in state.collection.iter().take(5) {
            lines.push(Line::from(format!(
                "  {} {} {} cm  {} {}",
                fish.species.icon(),
                fish.species,
                fish.size_cm,
                fish.weather.icon(),
                format_date(fish.caught_at)
            )));
        }
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from("No fish yet. Cast a line with [Space]."));
    }
    lines
}

pub fn draw_collection(frame: &mut Frame, state: &GameState) {
    let area = overlay_rect(frame.size());
    frame.render_widget(Clear, area);

    let mut lines = collection_lines(state);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[Esc] Close", HINT_STYLE)));

    frame.render_widget(
        Paragraph::new(lines).block(dialog_block("Fish Collection", Color::Cyan)),
        area,
    );
}

fn achievement_lines(state: &GameState) -> Vec<Line<'static>> {
    let achievements = &state.achievements;
    let mut lines = vec![
        Line::from(format!(
            "Unlocked {}/{}",
            achievements.unlocked_count(),
            achievements.total_count()
        )),
        Line::from(""),
    ];

    for def in ALL_ACHIEVEMENTS {
        match achievements.unlocked_at(def.id) {
            Some(at) => {
                lines.push(Line::from(vec![
                    Span::raw(format!("{} ", def.icon)),
                    Span::styled(
                        def.title,
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", format_date(at)), HINT_STYLE),
                ]));
                lines.push(Line::from(format!("   {}", def.description)));
                lines.push(Line::from(Span::styled(
                    format!("   \"{}\"", def.unlocked_quote),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(vec![
                    Span::styled("🔒 ", HINT_STYLE),
                    Span::styled(def.title, Style::default().fg(Color::Gray)),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("   {}", def.description),
                    HINT_STYLE,
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn draw_achievements(frame: &mut Frame, state: &GameState) {
    let area = overlay_rect(frame.size());
    frame.render_widget(Clear, area);

    let mut lines = achievement_lines(state);
    lines.push(Line::from(Span::styled("[Esc] Close", HINT_STYLE)));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(dialog_block("Achievements", Color::Yellow)),
        area,
    );
}
