use anyhow::Result;

use super::{Profile, ScoreStore};

/// Profile held in memory; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Profile,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self { profile, saves: 0 }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Profile {
        self.profile.clone()
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        self.profile = profile.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_profile() {
        let mut store = MemoryStore::new();
        let profile = Profile {
            highest_score: 3,
            ..Default::default()
        };

        store.save(&profile).unwrap();

        assert_eq!(store.load(), profile);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::new());
        let profile = Profile {
            current_score: 2,
            ..Default::default()
        };

        store.save(&profile).unwrap();

        assert_eq!(store.load().current_score, 2);
    }
}
