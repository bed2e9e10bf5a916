use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tui_snake::game::{CollisionRule, GameConfig};
use tui_snake::modes::{HumanMode, print_leaderboard};
use tui_snake::store::{JsonFileStore, json_file::DEFAULT_DATA_FILE};

#[derive(Parser)]
#[command(name = "tui_snake")]
#[command(version, about = "Snake on a wrapping board with a local leaderboard")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// Side length of the square board
    #[arg(long, default_value = "30")]
    grid_size: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// JSON file holding username, scores and leaderboard
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Treat the cell the tail is leaving as an obstacle
    #[arg(long)]
    tail_blocks: bool,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Print the leaderboard and exit
    Leaderboard,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_size: self.grid_size,
            tick_interval_ms: self.tick_ms,
            collision_rule: if self.tail_blocks {
                CollisionRule::TailBlocks
            } else {
                CollisionRule::VacatingTailIsFree
            },
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tui_snake::logging::init(cli.log_file.as_deref())?;

    let store = JsonFileStore::new(&cli.data_file);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let config = cli.game_config();
            let mut human_mode = HumanMode::new(config, store)?;
            human_mode.run().await?;
        }
        Mode::Leaderboard => {
            print_leaderboard(&store, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
