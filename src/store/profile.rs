use serde::{Deserialize, Serialize};

/// Name shown for a player who never entered one
pub const ANONYMOUS: &str = "anonymous";

/// Everything that outlives a single game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub username: Option<String>,
    /// Score of the last game played
    pub current_score: u32,
    /// Best score ever reached; never decreases
    pub highest_score: u32,
    pub leaderboard: Leaderboard,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Raise the best score; lower values are ignored
    pub fn raise_highest(&mut self, score: u32) -> bool {
        if score > self.highest_score {
            self.highest_score = score;
            true
        } else {
            false
        }
    }
}

/// One finished game on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(alias = "username")]
    pub name: String,
    #[serde(alias = "highestScore")]
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Finished games, best score first. Equal scores keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and restore the descending order
    pub fn record(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.sort();
    }

    /// Stable descending sort; repairs order after loading hand-edited data
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Entries paired with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &LeaderboardEntry)> {
        self.entries.iter().enumerate().map(|(i, entry)| (i + 1, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<LeaderboardEntry> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = LeaderboardEntry>>(iter: I) -> Self {
        let mut board = Self {
            entries: iter.into_iter().collect(),
        };
        board.sort();
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_descending_order() {
        let mut board = Leaderboard::new();
        board.record(LeaderboardEntry::new("ana", 3));
        board.record(LeaderboardEntry::new("bo", 9));
        board.record(LeaderboardEntry::new("cy", 5));

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 3]);
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.record(LeaderboardEntry::new("first", 4));
        board.record(LeaderboardEntry::new("second", 4));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_ranked_is_one_based() {
        let board: Leaderboard = vec![
            LeaderboardEntry::new("low", 1),
            LeaderboardEntry::new("high", 7),
        ]
        .into_iter()
        .collect();

        let ranked: Vec<(usize, &str)> = board
            .ranked()
            .map(|(rank, entry)| (rank, entry.name.as_str()))
            .collect();
        assert_eq!(ranked, vec![(1, "high"), (2, "low")]);
    }

    #[test]
    fn test_profile_json_layout() {
        let mut profile = Profile {
            username: Some("ana".to_string()),
            current_score: 2,
            highest_score: 8,
            ..Default::default()
        };
        profile.leaderboard.record(LeaderboardEntry::new("ana", 8));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["username"], "ana");
        assert_eq!(json["currentScore"], 2);
        assert_eq!(json["highestScore"], 8);
        assert_eq!(json["leaderboard"][0]["name"], "ana");
        assert_eq!(json["leaderboard"][0]["score"], 8);
    }

    #[test]
    fn test_entries_accept_legacy_field_names() {
        let board: Leaderboard =
            serde_json::from_str(r#"[{"username":"old","highestScore":12}]"#).unwrap();
        assert_eq!(board.entries(), &[LeaderboardEntry::new("old", 12)]);
    }

    #[test]
    fn test_partial_profile_uses_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"highestScore":5}"#).unwrap();
        assert_eq!(profile.highest_score, 5);
        assert_eq!(profile.username, None);
        assert_eq!(profile.display_name(), ANONYMOUS);
        assert!(profile.leaderboard.is_empty());
    }

    #[test]
    fn test_raise_highest_never_lowers() {
        let mut profile = Profile {
            highest_score: 10,
            ..Default::default()
        };
        assert!(!profile.raise_highest(4));
        assert_eq!(profile.highest_score, 10);
        assert!(profile.raise_highest(11));
        assert_eq!(profile.highest_score, 11);
    }
}
