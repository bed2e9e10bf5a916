use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the cell the tail is leaving is treated on a non-growing move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionRule {
    /// The tail moves out on the same tick, so the head may take its cell
    #[default]
    VacatingTailIsFree,
    /// Every body cell except the head blocks, including the departing tail
    TailBlocks,
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square, wrapping board
    pub grid_size: usize,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Length of the snake when a game starts
    pub initial_snake_length: usize,
    pub collision_rule: CollisionRule,
    /// Fixed seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            tick_interval_ms: 100,
            initial_snake_length: 1,
            collision_rule: CollisionRule::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Reject configurations the game loop cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size >= 2,
            "grid size must be at least 2, got {}",
            self.grid_size
        );
        ensure!(
            self.initial_snake_length >= 1 && self.initial_snake_length <= self.grid_size,
            "initial snake length must be between 1 and {}, got {}",
            self.grid_size,
            self.initial_snake_length
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.collision_rule, CollisionRule::VacatingTailIsFree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_seed(7);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.cell_count(), 225);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validation_rejects_degenerate_boards() {
        assert!(GameConfig::new(1).validate().is_err());

        let mut config = GameConfig::small();
        config.initial_snake_length = 11;
        assert!(config.validate().is_err());

        config.initial_snake_length = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::small();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{"grid_size":12,"tick_interval_ms":80,"initial_snake_length":2,
                "collision_rule":"TailBlocks","seed":null}"#,
        )
        .unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.collision_rule, CollisionRule::TailBlocks);
    }
}
