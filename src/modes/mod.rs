pub mod human;
pub mod leaderboard;
pub mod ticker;

pub use human::HumanMode;
pub use leaderboard::print_leaderboard;
pub use ticker::Ticker;
