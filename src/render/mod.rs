//! Drawing collaborators for the game loop
//!
//! [`GameLoop`](crate::game::GameLoop) hands a [`Scene`] to a [`Render`]
//! implementation after every tick. [`TerminalView`] draws it with ratatui;
//! tests plug in their own recorders.

pub mod renderer;
pub mod terminal;

use anyhow::Result;

use crate::game::{Cell, GameStatus, Score, Snake};
use crate::store::Profile;

pub use renderer::Renderer;
pub use terminal::TerminalView;

/// Read-only view of one game at one moment
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub snake: &'a Snake,
    pub food: Cell,
    pub grid_size: usize,
    pub score: Score,
    pub status: GameStatus,
    pub profile: &'a Profile,
}

/// Something that can show a [`Scene`]
pub trait Render {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()>;
}

/// Screen state that belongs to the session rather than to the game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Name typed on the start screen so far
    pub name_input: String,
    pub show_leaderboard: bool,
}
