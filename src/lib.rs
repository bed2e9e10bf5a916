//! tui_snake - Snake on a wrapping board, played in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Persistence of scores and the leaderboard (store module)
//! - TUI rendering (render module)
//! - Keyboard decoding (input module)
//! - The interactive session and its tick timer (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod store;
