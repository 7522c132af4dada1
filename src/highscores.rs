//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process; nothing is saved.

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u32,
    /// Mode the run was played in
    pub mode: GameMode,
    /// Ticks survived
    pub ticks: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, mode: GameMode, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, mode, ticks };

        // Sorted descending by score; ties keep the earlier run first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best entry for one mode
    pub fn best_for(&self, mode: GameMode) -> Option<&HighScoreEntry> {
        self.entries.iter().find(|e| e.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_ranked_descending() {
        let mut scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.add_score(5, GameMode::Easy, 100), Some(1));
        assert!(!scores.is_empty());
        assert_eq!(scores.add_score(9, GameMode::Hard, 100), Some(1));
        assert_eq!(scores.add_score(7, GameMode::Easy, 100), Some(2));
        assert_eq!(scores.add_score(7, GameMode::Medium, 100), Some(3));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
        assert_eq!(scores.best_for(GameMode::Easy).map(|e| e.score), Some(7));
        assert!(scores.best_for(GameMode::TimeTrial).is_none());
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s * 10, GameMode::Medium, 0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, GameMode::Medium, 0), None);
        assert_eq!(scores.add_score(15, GameMode::Medium, 0), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }
}
