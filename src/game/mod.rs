//! Core game logic module for Snake
//!
//! This module contains the rules of the game without any terminal or file
//! dependencies. Rendering and persistence are reached through the
//! [`crate::render::Render`] and [`crate::store::ScoreStore`] traits.

pub mod config;
pub mod direction;
pub mod game_loop;
pub mod state;

// Re-export commonly used types
pub use config::{CollisionRule, GameConfig};
pub use direction::Direction;
pub use game_loop::{GameLoop, TickOutcome};
pub use state::{Cell, EndReason, GameState, GameStatus, Score, Snake};
