use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::{BrailleCanvas, Cell};
use super::presenter::{present, Theme};
use crate::game::GameState;

// Bottom row is the controls hint, everything above is the playfield
const UI_FOOTER_ROWS: u16 = 1;

/// Size of the drawable field area for a terminal area
pub fn field_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(UI_FOOTER_ROWS),
        ..area
    }
}

pub fn render(frame: &mut Frame, state: &GameState, theme: &Theme, controls: &str) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let field = field_area(area);
    let mut canvas = BrailleCanvas::new(
        field.width as usize,
        field.height as usize,
        state.field_width,
        state.field_height,
    );
    present(&mut canvas, state, theme);
    render_braille_canvas(frame, &canvas, field);

    draw_controls(frame, area, controls);
}

fn cell_style(cell: &Cell) -> Style {
    let [r, g, b] = cell.color;
    let style = Style::default().fg(Color::Rgb(r, g, b)).bg(Color::Rgb(0, 0, 0));
    if cell.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    let mut lines = Vec::with_capacity(canvas.height());

    for y in 0..canvas.height() {
        // Merge runs of equally styled cells into one span
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for x in 0..canvas.width() {
            let cell = canvas.cell(x, y);
            let style = cell_style(&cell);
            if run_style != Some(style) {
                if let Some(prev) = run_style {
                    spans.push(Span::styled(std::mem::take(&mut run), prev));
                }
                run_style = Some(style);
            }
            run.push(cell.symbol());
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_controls(frame: &mut Frame, area: Rect, controls: &str) {
    let controls = Paragraph::new(controls.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    let controls_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(UI_FOOTER_ROWS),
        width: area.width,
        height: UI_FOOTER_ROWS.min(area.height),
    };

    frame.render_widget(controls, controls_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, KeyBindings, PhysicsConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_render_draws_field_and_hint() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::new(640.0, 384.0, &PhysicsConfig::default(), &mut rng);
        let theme = Theme::new(&DisplayConfig::default(), &KeyBindings::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();

        terminal
            .draw(|f| render(f, &state, &theme, "W/S  Up/Down  Space  Q"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let hint: String = (0..80).map(|x| buffer[(x, 24)].symbol().to_string()).collect();
        assert!(hint.contains("W/S  Up/Down  Space  Q"));

        // Some Braille dots made it into the field rows
        let dotted = (0..80u16)
            .flat_map(|x| (0..24u16).map(move |y| (x, y)))
            .any(|(x, y)| {
                let symbol = buffer[(x, y)].symbol();
                symbol != "\u{2800}" && symbol != " "
            });
        assert!(dotted);
    }

    #[test]
    fn test_field_area_reserves_footer() {
        let area = Rect::new(0, 0, 80, 25);
        assert_eq!(field_area(area), Rect::new(0, 0, 80, 24));
        assert_eq!(field_area(Rect::new(0, 0, 10, 0)).height, 0);
    }
}
