use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::game::{CellKind, GameState, Position};
use crate::metrics::GameMetrics;

/// Each cell is two terminal columns wide so the board looks square
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);
        frame.render_widget(self.render_controls(), chunks[2]);

        // A clipped board would hide cells the snake can still move into
        let Some(board_area) = board_rect(chunks[1], state.board_size) else {
            frame.render_widget(self.render_too_small(state.board_size), chunks[1]);
            return;
        };
        frame.render_widget(self.render_grid(state), board_area);

        // The restart prompt only exists once the game is over
        if state.game_over {
            let popup = centered(board_area, 36, 6);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(), popup);
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..state.board_size as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..state.board_size as i32)
                    .map(|x| cell_span(state.cell_kind(Position::new(x, y))))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border_color = if state.game_over {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let status = if state.game_over {
            Span::styled("over", Style::default().fg(Color::Red))
        } else {
            Span::styled("running", Style::default().fg(Color::Green))
        };

        let text = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_finished.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            status,
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_too_small(&self, board_size: usize) -> Paragraph<'_> {
        let needed = format!(
            "The board needs {}x{} cells, please enlarge the window",
            board_size.saturating_mul(CELL_WIDTH as usize).saturating_add(2),
            board_size.saturating_add(2)
        );
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(needed, Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(kind: CellKind) -> Span<'static> {
    match kind {
        CellKind::Head => Span::styled(
            "██",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::Body => Span::styled("▓▓", Style::default().fg(Color::Green)),
        CellKind::Food => Span::styled(
            "()",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellKind::Empty => Span::styled(" .", Style::default().fg(Color::DarkGray)),
    }
}

/// Where the bordered board goes, or None if it does not fit in `area`
fn board_rect(area: Rect, board_size: usize) -> Option<Rect> {
    let cells = u16::try_from(board_size).ok()?;
    let width = cells.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = cells.checked_add(2)?;

    if width > area.width || height > area.height {
        return None;
    }
    Some(centered(area, width, height))
}

/// A `width` x `height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
