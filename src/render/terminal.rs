use anyhow::{Context, Result};
use ratatui::{Terminal, backend::Backend};

use super::{Render, Renderer, Scene, UiState};

/// [`Render`] implementation drawing into a ratatui terminal
pub struct TerminalView<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
    pub ui: UiState,
}

impl<B: Backend> TerminalView<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
            ui: UiState::default(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Render for TerminalView<B> {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
        let Self {
            terminal,
            renderer,
            ui,
        } = self;

        terminal
            .draw(|frame| renderer.render(frame, scene, ui))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, EndReason, GameStatus, Score, Snake};
    use crate::store::{LeaderboardEntry, Profile};
    use ratatui::backend::TestBackend;

    fn view() -> TerminalView<TestBackend> {
        TerminalView::new(Terminal::new(TestBackend::new(80, 40)).unwrap())
    }

    fn screen_text(view: &TerminalView<TestBackend>) -> String {
        let buffer = view.terminal().backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(view: &mut TerminalView<TestBackend>, status: GameStatus, profile: &Profile) {
        let snake =
            Snake::from_cells([Cell::new(2, 2), Cell::new(1, 2)], Direction::Right).unwrap();
        let scene = Scene {
            snake: &snake,
            food: Cell::new(5, 5),
            grid_size: 10,
            score: Score {
                current: 3,
                highest: 7,
            },
            status,
            profile,
        };
        view.draw(&scene).unwrap();
    }

    #[test]
    fn test_running_frame_shows_stats_and_board() {
        let mut view = view();
        let profile = Profile {
            username: Some("ana".to_string()),
            ..Default::default()
        };

        draw(&mut view, GameStatus::Running, &profile);
        let text = screen_text(&view);

        assert!(text.contains("Player: ana"));
        assert!(text.contains("Score: 3"));
        assert!(text.contains("Best: 7"));
        assert!(text.contains(" Snake "));
        assert!(text.contains('●'));
    }

    #[test]
    fn test_paused_frame_is_marked() {
        let mut view = view();
        draw(&mut view, GameStatus::Paused, &Profile::default());

        assert!(screen_text(&view).contains("PAUSED"));
    }

    #[test]
    fn test_start_screen_prompts_for_name() {
        let mut view = view();
        view.ui.name_input = "bo".to_string();
        draw(&mut view, GameStatus::NotStarted, &Profile::default());

        assert!(screen_text(&view).contains("Enter your name: bo_"));
    }

    #[test]
    fn test_start_screen_greets_known_player() {
        let mut view = view();
        let profile = Profile {
            username: Some("cy".to_string()),
            ..Default::default()
        };
        draw(&mut view, GameStatus::NotStarted, &profile);

        assert!(screen_text(&view).contains("Welcome back, cy!"));
    }

    #[test]
    fn test_game_over_panel() {
        let mut view = view();
        draw(
            &mut view,
            GameStatus::Ended(EndReason::SelfCollision),
            &Profile::default(),
        );
        let text = screen_text(&view);

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 3"));
    }

    #[test]
    fn test_leaderboard_overlay_lists_ranks() {
        let mut view = view();
        view.ui.show_leaderboard = true;
        let profile = Profile {
            leaderboard: vec![
                LeaderboardEntry::new("ana", 4),
                LeaderboardEntry::new("bo", 9),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        draw(&mut view, GameStatus::Ended(EndReason::SelfCollision), &profile);
        let text = screen_text(&view);

        assert!(text.contains("Leaderboard"));
        assert!(text.contains("1. bo: 9"));
        assert!(text.contains("2. ana: 4"));
    }
}
