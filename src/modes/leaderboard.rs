use std::io::Write;

use anyhow::{Context, Result};

use crate::store::ScoreStore;

/// Print the stored leaderboard, best first, one `rank. name: score` per line
pub fn print_leaderboard<S: ScoreStore + ?Sized, W: Write>(store: &S, out: &mut W) -> Result<()> {
    let profile = store.load();

    writeln!(out, "Leaderboard").context("Failed to write leaderboard")?;
    if profile.leaderboard.is_empty() {
        writeln!(out, "  no games recorded yet").context("Failed to write leaderboard")?;
    }
    for (rank, entry) in profile.leaderboard.ranked() {
        writeln!(out, "{rank}. {}: {}", entry.name, entry.score)
            .context("Failed to write leaderboard")?;
    }
    writeln!(out, "Best score: {}", profile.highest_score).context("Failed to write leaderboard")?;

    Ok(())
}
