//! High score leaderboard system
//!
//! Persisted to LocalStorage, keeps the top 10 runs across both players.

use serde::{Deserialize, Serialize};

use crate::platform::storage::{self, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player who ran
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted by score, highest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "magic_dash_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a stored leaderboard. Malformed data yields an empty board.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.normalize();
                scores
            }
            Err(e) => {
                log::warn!("Discarding malformed high scores: {}", e);
                Self::new()
            }
        }
    }

    /// Re-establish ordering and size after loading foreign data
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run.
    ///
    /// Ties rank below earlier entries. Returns the rank achieved (1-indexed)
    /// or None if the run fell off the board.
    pub fn add_score(&mut self, name: &str, score: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best `n` entries
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Load high scores, starting fresh when missing or unreadable
    pub fn load() -> Self {
        match storage::get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("High scores unavailable: {}", e);
                Self::new()
            }
        }
    }

    /// Rewrite the stored leaderboard
    pub fn save(&self) -> Result<(), StorageError> {
        storage::save_json(Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[u64]) -> HighScores {
        let mut hs = HighScores::new();
        for (i, &s) in scores.iter().enumerate() {
            hs.add_score("Lily", s, i as f64);
        }
        hs
    }

    #[test]
    fn test_sorted_descending() {
        let hs = board(&[300, 1200, 50, 800]);
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![1200, 800, 300, 50]);
        assert_eq!(hs.top_score(), Some(1200));
    }

    #[test]
    fn test_capped_at_ten() {
        let hs = board(&(1..=15).map(|i| i * 100).collect::<Vec<_>>());
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries[0].score, 1500);
        assert_eq!(hs.entries[9].score, 600);
    }

    #[test]
    fn test_low_score_falls_off_full_board() {
        let mut hs = board(&[1000; 10]);
        assert!(!hs.qualifies(1000));
        assert_eq!(hs.add_score("Theo", 999, 0.0), None);
        assert_eq!(hs.add_score("Theo", 1001, 0.0), Some(1));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut hs = board(&[500]);
        assert_eq!(hs.add_score("Theo", 500, 9.0), Some(2));
        assert_eq!(hs.entries[1].name, "Theo");
    }

    #[test]
    fn test_zero_score_still_recorded_on_short_board() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score("Lily", 0, 0.0), Some(1));
    }

    #[test]
    fn test_top_three() {
        let hs = board(&[10, 20, 30, 40]);
        let top: Vec<u64> = hs.top(3).iter().map(|e| e.score).collect();
        assert_eq!(top, vec![40, 30, 20]);
        assert_eq!(HighScores::new().top(3).len(), 0);
    }

    #[test]
    fn test_json_is_plain_array() {
        let hs = board(&[42]);
        let json = serde_json::to_string(&hs).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(HighScores::from_json(&json), hs);
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        assert!(HighScores::from_json("not json").is_empty());
        assert!(HighScores::from_json(r#"{"entries": 5}"#).is_empty());
    }

    #[test]
    fn test_unsorted_json_is_normalized() {
        let json = r#"[{"name":"Theo","score":5,"timestamp":0},{"name":"Lily","score":50,"timestamp":1}]"#;
        let hs = HighScores::from_json(json);
        assert_eq!(hs.entries[0].name, "Lily");
    }

    #[test]
    fn test_save_then_load() {
        let hs = board(&[700, 70]);
        hs.save().unwrap();
        assert_eq!(HighScores::load(), hs);
    }
}
