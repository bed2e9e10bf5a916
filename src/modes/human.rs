use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use tracing::debug;

use super::ticker::Ticker;
use crate::game::{GameConfig, GameLoop, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction, NameKey};
use crate::render::{Render, TerminalView, UiState};
use crate::store::ScoreStore;

/// Interactive session: start screen, play, game over, restart
pub struct HumanMode<S: ScoreStore> {
    game: GameLoop<S>,
    input_handler: InputHandler,
    ticker: Ticker,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        let ticker = Ticker::new(config.tick_interval());

        Ok(Self {
            game: GameLoop::new(config, store)?,
            input_handler: InputHandler::new(),
            ticker,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        let mut view = TerminalView::new(terminal);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut view).await;

        // Cleanup terminal
        self.cleanup_terminal(view.terminal_mut())?;

        result
    }

    async fn run_game_loop(
        &mut self,
        view: &mut TerminalView<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        view.draw(&self.game.scene())?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, view)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; pends while the ticker is stopped
                _ = self.ticker.tick() => {
                    self.update_game(view)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event<B: Backend>(&mut self, event: Event, view: &mut TerminalView<B>) -> Result<()> {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, view),
            Event::Resize(_, _) => view.draw(&self.game.scene()),
            _ => Ok(()),
        }
    }

    fn handle_key<B: Backend>(&mut self, key: KeyEvent, view: &mut TerminalView<B>) -> Result<()> {
        if self.game.status() == GameStatus::NotStarted {
            self.handle_start_screen_key(key, &mut view.ui);
        } else {
            self.handle_game_key(key, &mut view.ui)?;
        }

        if self.should_quit {
            return Ok(());
        }
        view.draw(&self.game.scene())
    }

    fn handle_start_screen_key(&mut self, key: KeyEvent, ui: &mut UiState) {
        let typed = ui.name_input.chars().count();

        match self.input_handler.handle_name_key(key, typed) {
            NameKey::Push(c) => ui.name_input.push(c),
            NameKey::Pop => {
                ui.name_input.pop();
            }
            NameKey::Submit => self.start_game(ui),
            NameKey::Quit => self.should_quit = true,
            NameKey::None => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, ui: &mut UiState) -> Result<()> {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.game.set_direction(direction);
            }
            KeyAction::TogglePause => {
                self.game.toggle_pause();
            }
            KeyAction::ToggleLeaderboard => ui.show_leaderboard = !ui.show_leaderboard,
            KeyAction::Restart => {
                if self.game.status().is_ended() {
                    self.restart_game(ui)?;
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    /// Start playing unless nobody has a name yet
    fn start_game(&mut self, ui: &mut UiState) {
        let typed = ui.name_input.trim();
        if typed.is_empty() && self.game.profile().username.is_none() {
            return;
        }

        if self.game.start(typed) {
            ui.name_input.clear();
            ui.show_leaderboard = false;
            self.ticker.start();
        }
    }

    /// A known player goes straight back into play; otherwise the start
    /// screen asks for a name.
    fn restart_game(&mut self, ui: &mut UiState) -> Result<()> {
        self.game.reset()?;
        ui.show_leaderboard = false;
        debug!("game reset");

        if self.game.profile().username.is_some() {
            self.start_game(ui);
        }
        Ok(())
    }

    fn update_game<R: Render + ?Sized>(&mut self, view: &mut R) -> Result<()> {
        if let TickOutcome::Ended(_) = self.game.tick(view)? {
            self.ticker.stop();
            view.draw(&self.game.scene())?;
        }

        Ok(())
    }

    fn cleanup_terminal<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(std::io::stderr(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
