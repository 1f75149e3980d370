//! Dock scene rendering: sky, weather particles, lake, dock, and fisherman.
//!
//! ```text
//!   *        .          *         .      <- sky / weather
//!        /\        /\                     <- hills
//!  ___                o
//! |[] |              /|\ \                <- cabin, fisherman
//! |___|==============/=\===\==            <- dock
//!  ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ o ~ ~ ~      <- lake, bobber
//! ```

use crate::core::{GameState, MAX_POSITION, MIN_POSITION};
use crate::weather::Weather;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Sky, hills and lake colours for one weather.
struct Palette {
    sky: Color,
    hills: Color,
    lake: Color,
    particle: Color,
}

fn palette(weather: Weather) -> Palette {
    match weather {
        Weather::Sunset => Palette {
            sky: Color::Rgb(255, 107, 53),
            hills: Color::Rgb(107, 68, 35),
            lake: Color::Rgb(67, 56, 202),
            particle: Color::Rgb(255, 210, 63),
        },
        Weather::Mountain => Palette {
            sky: Color::Rgb(74, 85, 104),
            hills: Color::Rgb(45, 55, 72),
            lake: Color::Rgb(55, 65, 81),
            particle: Color::Gray,
        },
        Weather::Snow => Palette {
            sky: Color::Rgb(247, 250, 252),
            hills: Color::Rgb(203, 213, 224),
            lake: Color::Rgb(59, 130, 246),
            particle: Color::White,
        },
        Weather::Rain => Palette {
            sky: Color::Rgb(66, 153, 225),
            hills: Color::Rgb(43, 108, 176),
            lake: Color::Rgb(30, 64, 175),
            particle: Color::Rgb(96, 165, 250),
        },
        Weather::Starry => Palette {
            sky: Color::Rgb(26, 32, 44),
            hills: Color::Rgb(26, 32, 44),
            lake: Color::Rgb(30, 58, 138),
            particle: Color::Rgb(251, 191, 36),
        },
    }
}

/// Mutable grid of styled cells, flushed into `Line`s.
struct Canvas {
    width: usize,
    cells: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            cells: vec![vec![(' ', Style::default()); width]; height],
        }
    }

    fn fill_row(&mut self, row: usize, ch: char, style: Style) {
        if let Some(cells) = self.cells.get_mut(row) {
            cells.iter_mut().for_each(|c| *c = (ch, style));
        }
    }

    fn put(&mut self, row: usize, col: usize, ch: char, style: Style) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = (ch, style);
        }
    }

    fn text(&mut self, row: usize, col: usize, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.put(row, col + i, ch, style);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(ch, style)| Span::styled(ch.to_string(), style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Screen column of the fisherman for a dock position.
pub fn fisherman_column(position: i32, width: usize) -> usize {
    let span = (MAX_POSITION - MIN_POSITION).max(1) as usize;
    let usable = width.saturating_sub(8).max(1);
    4 + (position.clamp(MIN_POSITION, MAX_POSITION) - MIN_POSITION) as usize * usable / span
}

/// Cheap deterministic scatter for particle placement.
fn scatter(seed: u64) -> u64 {
    let mut x = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 29;
    x.wrapping_mul(0xBF58_476D_1CE4_E5B9) >> 32
}

fn draw_weather_particles(canvas: &mut Canvas, weather: Weather, sky_rows: usize, frame: u64) {
    let p = palette(weather);
    let (glyph, count, fall) = match weather {
        Weather::Rain => ('|', canvas.width / 3, 2),
        Weather::Snow => ('*', canvas.width / 5, 1),
        Weather::Starry => ('.', canvas.width / 6, 0),
        Weather::Sunset | Weather::Mountain => return,
    };
    let style = Style::default().fg(p.particle).bg(p.sky);

    for i in 0..count as u64 {
        let col = (scatter(i * 2 + 1) % canvas.width.max(1) as u64) as usize;
        let start = scatter(i * 2 + 2) % sky_rows.max(1) as u64;
        let row = ((start + frame * fall / 4) % sky_rows.max(1) as u64) as usize;
        // Stars twinkle instead of falling
        if fall == 0 && (frame / 8 + i) % 3 == 0 {
            continue;
        }
        canvas.put(row, col, glyph, style);
    }

    if weather == Weather::Starry {
        let moon = Style::default().fg(Color::Rgb(254, 240, 138)).bg(p.sky);
        canvas.text(0, canvas.width.saturating_sub(6), "( )", moon);
    }
}

fn draw_backdrop(canvas: &mut Canvas, weather: Weather, sky_rows: usize) {
    let p = palette(weather);
    let hills = Style::default().fg(p.hills).bg(p.sky);
    let hill_row = sky_rows.saturating_sub(1);
    let mut col = 2;
    while col + 6 < canvas.width {
        canvas.text(hill_row.saturating_sub(1), col + 2, "/\\", hills);
        canvas.text(hill_row, col, "/    \\", hills);
        col += 11;
    }

    if weather == Weather::Sunset {
        let sun = Style::default()
            .fg(Color::Rgb(255, 210, 63))
            .bg(p.sky)
            .add_modifier(Modifier::BOLD);
        canvas.text(0, canvas.width / 2, "\\ | /", sun);
        canvas.text(1, canvas.width / 2, "- O -", sun);
    }
}

fn draw_cabin(canvas: &mut Canvas, dock_row: usize, sky: Color) {
    let wood = Style::default().fg(Color::Rgb(139, 69, 19)).bg(sky);
    let window = Style::default().fg(Color::Rgb(255, 215, 0)).bg(sky);
    canvas.text(dock_row.saturating_sub(3), 1, " ___ ", wood);
    canvas.text(dock_row.saturating_sub(2), 1, "/   \\", wood);
    canvas.text(dock_row.saturating_sub(1), 1, "|", wood);
    canvas.text(dock_row.saturating_sub(1), 2, "[]", window);
    canvas.text(dock_row.saturating_sub(1), 4, " |", wood);
}

fn draw_fisherman(canvas: &mut Canvas, state: &GameState, dock_row: usize, lake_rows: usize) {
    let player = &state.player;
    let col = fisherman_column(player.position, canvas.width);
    let body = Style::default()
        .fg(Color::Rgb(139, 69, 19))
        .add_modifier(Modifier::BOLD);
    let head = Style::default().fg(Color::Rgb(253, 188, 180));

    if player.is_sitting() {
        canvas.put(dock_row.saturating_sub(1), col, 'o', head);
        canvas.text(dock_row, col.saturating_sub(1), "/|_", body);
    } else {
        canvas.put(dock_row.saturating_sub(2), col, 'o', head);
        canvas.text(dock_row.saturating_sub(1), col.saturating_sub(1), "/|\\", body);
        canvas.text(dock_row, col.saturating_sub(1), "/ \\", body);
    }

    if player.is_fishing() {
        let rod = Style::default().fg(Color::Rgb(74, 85, 104));
        let tip_row = dock_row.saturating_sub(if player.is_sitting() { 1 } else { 2 });
        canvas.put(tip_row, col + 2, '\\', rod);
        for depth in 0..=lake_rows.min(2) {
            canvas.put(tip_row + 1 + depth, col + 3 + depth, '\\', rod);
        }
        let bobber_row = (tip_row + 2 + lake_rows.min(2)).min(canvas.cells.len() - 1);
        let bobber = Style::default()
            .fg(Color::Rgb(239, 68, 68))
            .add_modifier(Modifier::BOLD);
        canvas.put(bobber_row, col + 4 + lake_rows.min(2), 'o', bobber);
    }
}

/// Draws the whole scene into `area`. `frame_count` drives particle motion.
pub fn draw_scene(frame: &mut Frame, area: Rect, state: &GameState, frame_count: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", state.current_weather().icon(), state.current_weather()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    if width < 12 || height < 6 {
        return;
    }

    let weather = state.current_weather();
    let p = palette(weather);
    let lake_rows = (height / 3).max(2);
    let dock_row = height - lake_rows - 1;
    let sky_rows = dock_row.saturating_sub(2).max(1);

    let mut canvas = Canvas::new(width, height);
    for row in 0..=dock_row {
        canvas.fill_row(row, ' ', Style::default().bg(p.sky));
    }
    for row in (dock_row + 1)..height {
        let wave = if (row + frame_count as usize / 6) % 2 == 0 {
            '~'
        } else {
            ' '
        };
        canvas.fill_row(row, wave, Style::default().fg(Color::LightBlue).bg(p.lake));
    }

    draw_backdrop(&mut canvas, weather, sky_rows);
    draw_weather_particles(&mut canvas, weather, sky_rows, frame_count);
    draw_cabin(&mut canvas, dock_row, p.sky);

    let plank = Style::default()
        .fg(Color::Rgb(60, 24, 16))
        .bg(Color::Rgb(139, 90, 60));
    for col in 0..width.saturating_sub(2) {
        canvas.put(dock_row, col, '=', plank);
    }

    draw_fisherman(&mut canvas, state, dock_row, lake_rows);

    frame.render_widget(Paragraph::new(canvas.into_lines()), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fisherman_column_spans_scene() {
        let width = 88;
        assert_eq!(fisherman_column(MIN_POSITION, width), 4);
        assert_eq!(fisherman_column(MAX_POSITION, width), 4 + width - 8);
        assert!(fisherman_column(50, width) > fisherman_column(20, width));
    }

    #[test]
    fn test_fisherman_column_clamps_position() {
        assert_eq!(fisherman_column(-40, 50), fisherman_column(MIN_POSITION, 50));
        assert_eq!(fisherman_column(400, 50), fisherman_column(MAX_POSITION, 50));
    }

    #[test]
    fn test_canvas_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(3, 2);
        canvas.put(5, 5, 'x', Style::default());
        canvas.text(1, 2, "abc", Style::default());
        let lines = canvas.into_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[2].content, "a");
    }
}
