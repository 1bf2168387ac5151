use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Cell, CollisionType, EngineSnapshot, GridBounds, Status};
use crate::metrics::GameMetrics;

/// What occupies a grid cell in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

/// Draws engine snapshots into a terminal frame; never touches the engine
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &EngineSnapshot,
        bounds: GridBounds,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.is_running() {
            frame.render_widget(self.render_grid(snapshot, bounds, paused), game_area);
        } else {
            frame.render_widget(self.render_game_end(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(
        &self,
        snapshot: &EngineSnapshot,
        bounds: GridBounds,
        paused: bool,
    ) -> Paragraph<'_> {
        let body: HashSet<Cell> = snapshot.segments.iter().copied().collect();
        let mut lines = Vec::with_capacity(bounds.height);

        for row in 0..bounds.height {
            let spans: Vec<Span> = (0..bounds.width)
                .map(|col| {
                    let cell = Cell::new(col as i32, row as i32);
                    cell_span(classify(snapshot, &body, cell))
                })
                .collect();
            lines.push(Line::from(spans));
        }

        let title = if paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &EngineSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.segments.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(snapshot.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Wins: ", label),
            Span::styled(
                format!("{}/{}", metrics.games_won, metrics.games_played),
                value,
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_end(&self, snapshot: &EngineSnapshot) -> Paragraph<'_> {
        let (headline, color) = match snapshot.status {
            Status::Won => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };
        let reason = match snapshot.collision {
            Some(CollisionType::Wall) => "Hit the wall",
            Some(CollisionType::SelfCollision) => "Ran into yourself",
            None => "The board is full",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn classify(snapshot: &EngineSnapshot, body: &HashSet<Cell>, cell: Cell) -> CellKind {
    if cell == snapshot.head() {
        CellKind::Head
    } else if body.contains(&cell) {
        CellKind::Body
    } else if snapshot.food == Some(cell) {
        CellKind::Food
    } else {
        CellKind::Empty
    }
}

fn cell_span(kind: CellKind) -> Span<'static> {
    match kind {
        CellKind::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
        CellKind::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}
