use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, EndReason, GameState, GameStatus, Score, Snake},
};
use crate::render::{Render, Scene};
use crate::store::{LeaderboardEntry, Profile, ScoreStore};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Idle,
    /// The snake moved without eating
    Moved,
    /// The snake ate and grew by one cell
    Ate,
    /// This tick ended the game
    Ended(EndReason),
}

/// One game of Snake, from start screen to game over.
///
/// All mutable game state lives here, with no globals; [`GameLoop::reset`]
/// swaps in a brand-new board for the next game. Persistence goes through
/// the [`ScoreStore`] the loop owns, rendering through the [`Render`] passed
/// to [`GameLoop::tick`].
pub struct GameLoop<S: ScoreStore> {
    config: GameConfig,
    state: GameState,
    status: GameStatus,
    pending_direction: Option<Direction>,
    profile: Profile,
    store: S,
    rng: StdRng,
}

impl<S: ScoreStore> GameLoop<S> {
    /// Set up a fresh game: snake at the board center heading right, food
    /// placed, waiting for [`GameLoop::start`].
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        config.validate()?;
        let mut rng = new_rng(&config);
        let state = fresh_state(&config, &mut rng)?;
        Ok(Self::assemble(config, store, state, rng))
    }

    /// Set up a game on a prepared board. The score starts at zero with the
    /// stored best.
    pub fn from_state(config: GameConfig, store: S, state: GameState) -> Result<Self> {
        config.validate()?;
        let rng = new_rng(&config);
        Ok(Self::assemble(config, store, state, rng))
    }

    fn assemble(config: GameConfig, store: S, mut state: GameState, rng: StdRng) -> Self {
        let profile = store.load();
        state.score = Score::new(profile.highest_score);

        Self {
            config,
            state,
            status: GameStatus::NotStarted,
            pending_direction: None,
            profile,
            store,
            rng,
        }
    }

    /// Replace the board with a new game waiting on the start screen. The
    /// profile is reloaded from the store; config and store carry over.
    pub fn reset(&mut self) -> Result<()> {
        let mut state = fresh_state(&self.config, &mut self.rng)?;
        self.profile = self.store.load();
        state.score = Score::new(self.profile.highest_score);

        self.state = state;
        self.status = GameStatus::NotStarted;
        self.pending_direction = None;
        Ok(())
    }

    /// Leave the start screen. A non-blank `username` replaces the stored
    /// name; a blank one keeps it.
    pub fn start(&mut self, username: &str) -> bool {
        if self.status != GameStatus::NotStarted {
            return false;
        }

        let username = username.trim();
        if !username.is_empty() {
            self.profile.username = Some(username.to_string());
        }
        self.profile.current_score = 0;
        self.persist("game start");

        self.status = GameStatus::Running;
        info!(
            player = self.profile.display_name(),
            grid_size = self.config.grid_size,
            best = self.profile.highest_score,
            "game started"
        );
        true
    }

    /// Advance the game by one step and ask `renderer` to draw the result.
    ///
    /// Has no effect unless the game is running. Errors come only from the
    /// renderer.
    pub fn tick<R: Render + ?Sized>(&mut self, renderer: &mut R) -> Result<TickOutcome> {
        if self.status != GameStatus::Running {
            return Ok(TickOutcome::Idle);
        }

        if let Some(direction) = self.pending_direction.take() {
            self.state.snake.direction = direction;
        }

        let new_head = self
            .state
            .snake
            .head()
            .stepped(self.state.snake.direction, self.state.grid_size);
        let ate_food = new_head == self.state.food;
        self.state.steps += 1;

        if self
            .state
            .snake
            .blocks(new_head, ate_food, self.config.collision_rule)
        {
            return Ok(self.finish(EndReason::SelfCollision));
        }

        self.state.snake.advance(new_head, ate_food);

        let outcome = if ate_food {
            if self.state.score.increment() && self.profile.raise_highest(self.state.score.highest)
            {
                debug!(best = self.profile.highest_score, "new high score");
                self.persist("new high score");
            }

            match self.spawn_food() {
                Some(food) => self.state.food = food,
                None => return Ok(self.finish(EndReason::BoardFilled)),
            }
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        };

        renderer.draw(&self.scene())?;
        Ok(outcome)
    }

    /// Pick a random cell the snake does not cover, by rejection sampling.
    /// `None` once the snake fills the board.
    pub fn spawn_food(&mut self) -> Option<Cell> {
        random_free_cell(&mut self.rng, &self.state.snake, self.state.grid_size)
    }

    /// Queue a turn for the next tick. Ignored when it would reverse the
    /// snake or the game is not running.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => false,
        }
    }

    /// Stop the game, put the player's best on the leaderboard and persist
    /// the profile. Only a running or paused game can end.
    pub fn end_game(&mut self, reason: EndReason) -> bool {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return false;
        }

        self.status = GameStatus::Ended(reason);
        self.pending_direction = None;

        let score = self.state.score;
        self.profile.current_score = score.current;
        self.profile.raise_highest(score.highest);
        let entry = LeaderboardEntry::new(self.profile.display_name(), self.profile.highest_score);
        self.profile.leaderboard.record(entry);
        self.persist("game over");

        info!(
            ?reason,
            score = score.current,
            best = self.profile.highest_score,
            steps = self.state.steps,
            "game over"
        );
        true
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.end_game(reason);
        TickOutcome::Ended(reason)
    }

    fn persist(&mut self, cause: &str) {
        if let Err(err) = self.store.save(&self.profile) {
            warn!(error = ?err, cause, "failed to save profile");
        }
    }

    /// Everything a renderer needs for one frame
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            snake: &self.state.snake,
            food: self.state.food,
            grid_size: self.state.grid_size,
            score: self.state.score,
            status: self.status,
            profile: &self.profile,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }
}

fn new_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> Result<GameState> {
    let center = config.grid_size / 2;
    let snake = Snake::new(
        Cell::new(center, center),
        Direction::Right,
        config.initial_snake_length,
        config.grid_size,
    );
    let food =
        random_free_cell(rng, &snake, config.grid_size).context("No free cell left for food")?;
    Ok(GameState::new(snake, food, config.grid_size))
}

fn random_free_cell<R: Rng>(rng: &mut R, snake: &Snake, grid_size: usize) -> Option<Cell> {
    // Snake cells are distinct, so covering this many means no cell is free
    if snake.len() >= grid_size * grid_size {
        return None;
    }

    loop {
        let cell = Cell::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
}
