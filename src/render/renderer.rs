use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use super::{Scene, UiState};
use crate::game::{Cell, EndReason, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Food,
    Body,
    Head,
}

/// Builds the ratatui widgets for one frame
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene<'_>, ui: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board or panels
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(scene), chunks[0]);

        // Center the board horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match scene.status {
            GameStatus::NotStarted => {
                frame.render_widget(self.render_start_screen(scene, ui), game_area)
            }
            GameStatus::Running | GameStatus::Paused => {
                frame.render_widget(self.render_grid(scene), game_area)
            }
            GameStatus::Ended(reason) => {
                frame.render_widget(self.render_game_over(scene, reason), game_area)
            }
        }

        if ui.show_leaderboard {
            let popup = centered_rect(60, 70, game_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_leaderboard(scene), popup);
        }

        frame.render_widget(self.render_controls(scene.status), chunks[2]);
    }

    fn tiles(scene: &Scene<'_>) -> Vec<Vec<Tile>> {
        let mut tiles = vec![vec![Tile::Empty; scene.grid_size]; scene.grid_size];

        let Cell { x, y } = scene.food;
        if let Some(tile) = tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
            *tile = Tile::Food;
        }

        for (i, Cell { x, y }) in scene.snake.cells().enumerate() {
            if let Some(tile) = tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
                *tile = if i == 0 { Tile::Head } else { Tile::Body };
            }
        }

        tiles
    }

    fn render_grid(&self, scene: &Scene<'_>) -> Paragraph<'_> {
        let lines: Vec<Line> = Self::tiles(scene)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|tile| match tile {
                        Tile::Head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Tile::Body => Span::styled("■ ", Style::default().fg(Color::LightGreen)),
                        Tile::Food => Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Tile::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if scene.status == GameStatus::Paused {
            " Snake - PAUSED "
        } else {
            " Snake "
        };

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

    fn render_stats(&self, scene: &Scene<'_>) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Player: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scene.profile.display_name().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scene.score.current.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scene.score.highest.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_screen(&self, scene: &Scene<'_>, ui: &UiState) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match (&scene.profile.username, ui.name_input.is_empty()) {
            (Some(name), true) => {
                text.push(Line::from(format!("Welcome back, {name}!")));
                text.push(Line::from(Span::styled(
                    "Type a name to play as someone else",
                    Style::default().fg(Color::Gray),
                )));
            }
            _ => {
                text.push(Line::from(vec![
                    Span::styled("Enter your name: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{}_", ui.name_input),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, scene: &Scene<'_>, reason: EndReason) -> Paragraph<'_> {
        let headline = match reason {
            EndReason::SelfCollision => "GAME OVER",
            EndReason::BoardFilled => "BOARD CLEARED",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scene.score.current.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scene.score.highest.to_string(),
                    Style::default().fg(Color::White),
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
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_leaderboard(&self, scene: &Scene<'_>) -> List<'_> {
        let items: Vec<ListItem> = if scene.profile.leaderboard.is_empty() {
            vec![ListItem::new(Span::styled(
                "No games recorded yet",
                Style::default().fg(Color::Gray),
            ))]
        } else {
            scene
                .profile
                .leaderboard
                .ranked()
                .map(|(rank, entry)| {
                    ListItem::new(format!("{rank}. {}: {}", entry.name, entry.score))
                })
                .collect()
        };

        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Leaderboard "),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let key =
            |label: &'static str, color: Color| Span::styled(label, Style::default().fg(color));

        let spans = match status {
            GameStatus::NotStarted => vec![
                key("Enter", Color::Green),
                Span::raw(" to start | "),
                key("Esc", Color::Red),
                Span::raw(" to quit"),
            ],
            GameStatus::Running | GameStatus::Paused => vec![
                key("↑↓←→", Color::Cyan),
                Span::raw(" or "),
                key("WASD", Color::Cyan),
                Span::raw(" to move | "),
                key("P", Color::Yellow),
                Span::raw(" pause | "),
                key("L", Color::Yellow),
                Span::raw(" leaderboard | "),
                key("Q", Color::Red),
                Span::raw(" to quit"),
            ],
            GameStatus::Ended(_) => vec![
                key("R", Color::Green),
                Span::raw(" restart | "),
                key("L", Color::Yellow),
                Span::raw(" leaderboard | "),
                key("Q", Color::Red),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Score, Snake};
    use crate::store::Profile;

    #[test]
    fn test_tiles_mark_snake_and_food() {
        let snake =
            Snake::from_cells([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right).unwrap();
        let profile = Profile::default();
        let scene = Scene {
            snake: &snake,
            food: Cell::new(2, 2),
            grid_size: 3,
            score: Score::default(),
            status: GameStatus::Running,
            profile: &profile,
        };

        let tiles = Renderer::tiles(&scene);

        assert_eq!(tiles[0], vec![Tile::Body, Tile::Head, Tile::Empty]);
        assert_eq!(tiles[1], vec![Tile::Empty; 3]);
        assert_eq!(tiles[2][2], Tile::Food);
    }

    #[test]
    fn test_head_drawn_over_food() {
        let snake = Snake::from_cells([Cell::new(1, 1)], Direction::Up).unwrap();
        let profile = Profile::default();
        let scene = Scene {
            snake: &snake,
            food: Cell::new(1, 1),
            grid_size: 2,
            score: Score::default(),
            status: GameStatus::Ended(EndReason::BoardFilled),
            profile: &profile,
        };

        assert_eq!(Renderer::tiles(&scene)[1][1], Tile::Head);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 70, area);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 35);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }
}
