//! Persistence of the player profile: username, scores and leaderboard
//!
//! The game loop only talks to the [`ScoreStore`] trait. [`JsonFileStore`]
//! keeps the profile in a JSON document on disk; [`MemoryStore`] keeps it in
//! memory for tests and throwaway sessions.

pub mod json_file;
pub mod memory;
pub mod profile;

use anyhow::Result;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use profile::{Leaderboard, LeaderboardEntry, Profile};

/// Load/save capability for the persisted profile
pub trait ScoreStore {
    /// Read the stored profile. Missing or unreadable data yields the default
    /// profile; loading never fails.
    fn load(&self) -> Profile;

    /// Replace the stored profile
    fn save(&mut self, profile: &Profile) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Profile {
        (**self).load()
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        (**self).save(profile)
    }
}
