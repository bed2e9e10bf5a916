use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Longest username accepted on the start screen
pub const MAX_NAME_LEN: usize = 16;

/// What a key means while a game is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    ToggleLeaderboard,
    Restart,
    Quit,
    None,
}

/// What a key means while typing a name on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKey {
    Push(char),
    Pop,
    Submit,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(key) {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                KeyAction::TogglePause
            }
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::ToggleLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    /// Decode a key on the start screen. `current_len` is the length of the
    /// name typed so far, in characters.
    pub fn handle_name_key(&self, key: KeyEvent, current_len: usize) -> NameKey {
        if is_ctrl_c(key) {
            return NameKey::Quit;
        }

        match key.code {
            KeyCode::Enter => NameKey::Submit,
            KeyCode::Backspace => NameKey::Pop,
            KeyCode::Esc => NameKey::Quit,
            KeyCode::Char(c) if !c.is_control() && current_len < MAX_NAME_LEN => {
                if current_len == 0 && c.is_whitespace() {
                    NameKey::None
                } else {
                    NameKey::Push(c)
                }
            }
            _ => NameKey::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
