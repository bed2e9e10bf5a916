use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::config::CollisionRule;
use super::direction::Direction;

/// A cell on the square, wrapping game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, wrapping around the board edges
    pub fn stepped(self, direction: Direction, grid_size: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap(self.x, dx, grid_size),
            y: wrap(self.y, dy, grid_size),
        }
    }
}

fn wrap(coord: usize, delta: isize, grid_size: usize) -> usize {
    let size = grid_size as isize;
    ((coord as isize % size) + delta).rem_euclid(size) as usize
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Cell>,
    /// Direction the snake moved in on the last tick
    pub direction: Direction,
}

impl Snake {
    /// Lay out a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize, grid_size: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.stepped(behind, grid_size);
            body.push_back(cell);
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first. `None` without cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head onto `cell` runs into the body.
    ///
    /// The head itself is never counted. On a move that does not grow, the
    /// tail leaves its cell on the same tick; `rule` decides whether that
    /// cell still blocks.
    pub fn blocks(&self, cell: Cell, growing: bool, rule: CollisionRule) -> bool {
        let tail_vacates = !growing && rule == CollisionRule::VacatingTailIsFree;
        let end = if tail_vacates {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body.iter().take(end).skip(1).any(|&segment| segment == cell)
    }

    /// Put a new head in front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through the constructors
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Points of the running game and the best ever reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub current: u32,
    pub highest: u32,
}

impl Score {
    pub fn new(highest: u32) -> Self {
        Self { current: 0, highest }
    }

    /// Add a point; returns true when this sets a new best
    pub fn increment(&mut self) -> bool {
        self.current += 1;
        if self.current > self.highest {
            self.highest = self.current;
            true
        } else {
            false
        }
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    Ended(EndReason),
}

impl GameStatus {
    pub fn is_ended(self) -> bool {
        matches!(self, GameStatus::Ended(_))
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The head ran into the body
    SelfCollision,
    /// The snake covers the whole board and food has nowhere to go
    BoardFilled,
}

/// Board contents of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub grid_size: usize,
    pub score: Score,
    pub steps: u32,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: Score::default(),
            steps: 0,
        }
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.grid_size && cell.y < self.grid_size
    }
}
