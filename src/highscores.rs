//! High score bookkeeping
//!
//! A live session only counts points. When it ends the host hands the final
//! score to `record_session`, which updates the game record, and optionally
//! to a `HighScores` leaderboard of recent best runs.

use serde::{Deserialize, Serialize};

use crate::store::{GameKind, RetroGame, Store};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Write a finished session into its game record.
///
/// Returns true if the score beat the stored high score.
pub fn record_session(game: &mut RetroGame, score: u64, now_ms: u64) -> bool {
    game.last_played = now_ms;
    if score > game.high_score {
        log::info!(
            "New high score for {}: {} (was {})",
            game.name,
            score,
            game.high_score
        );
        game.high_score = score;
        true
    } else {
        false
    }
}

/// Name of the game record the built-in arcade writes to
pub const ARCADE_GAME_NAME: &str = "Arcade";

/// Result of filing a finished arcade run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: u64,
    /// Beat the game's stored high score
    pub new_record: bool,
    /// Leaderboard rank, if it made the board
    pub rank: Option<usize>,
}

/// File a finished arcade run into the store's game record and leaderboard
pub fn record_arcade_run(store: &mut Store, score: u64, player: &str, now_ms: u64) -> RunOutcome {
    let game = store.game_by_name_or_insert(ARCADE_GAME_NAME, GameKind::Arcade);
    let new_record = record_session(game, score, now_ms);
    let rank = store.arcade_scores_mut().add_score(score, player, now_ms);
    RunOutcome {
        score,
        new_record,
        rank,
    }
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Player name at the time (from settings)
    #[serde(default)]
    pub player: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Place a finished run on the board. Earlier runs keep their place on
    /// a tie. Returns the rank achieved (1-indexed), or `None` for a scoreless
    /// run or one that falls off the bottom.
    pub fn add_score(&mut self, score: u64, player: &str, timestamp: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                player: player.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(high_score: u64) -> RetroGame {
        RetroGame {
            id: 1,
            name: "Arcade".into(),
            high_score,
            last_played: 0,
            game_type: GameKind::Arcade,
        }
    }

    #[test]
    fn test_record_session_only_raises() {
        let mut g = game(500);
        assert!(!record_session(&mut g, 300, 10));
        assert_eq!(g.high_score, 500);
        assert_eq!(g.last_played, 10);

        assert!(!record_session(&mut g, 500, 20));
        assert!(record_session(&mut g, 1200, 30));
        assert_eq!(g.high_score, 1200);
        assert_eq!(g.last_played, 30);
    }

    #[test]
    fn test_zero_score_is_not_placed() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(0, "idle", 1), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_leaderboard_orders_and_trims() {
        let mut board = HighScores::new();
        for score in 1..=12u64 {
            board.add_score(score * 100, "ace", score);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(1200));
        assert_eq!(board.entries.last().map(|e| e.score), Some(300));

        assert_eq!(board.add_score(200, "late", 99), None);
        assert_eq!(board.add_score(650, "mid", 99), Some(7));
        assert_eq!(board.entries[6].player, "mid");
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut board = HighScores::new();
        board.add_score(500, "first", 1);
        assert_eq!(board.add_score(500, "second", 2), Some(2));
        assert_eq!(board.entries[0].player, "first");
    }

    #[test]
    fn test_tie_with_last_place_is_dropped() {
        let mut board = HighScores::new();
        for score in 1..=10u64 {
            board.add_score(score * 100, "ace", score);
        }
        assert_eq!(board.add_score(100, "late", 11), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries[9].player, "ace");
    }

    #[test]
    fn test_record_arcade_run_creates_game() {
        let mut store = Store::in_memory();
        let first = record_arcade_run(&mut store, 700, "flynn", 5);
        assert!(first.new_record);
        assert_eq!(first.rank, Some(1));

        let second = record_arcade_run(&mut store, 400, "flynn", 6);
        assert!(!second.new_record);
        assert_eq!(second.rank, Some(2));

        assert_eq!(store.games().len(), 1);
        assert_eq!(store.games()[0].high_score, 700);
        assert_eq!(store.games()[0].last_played, 6);
        assert_eq!(store.arcade_scores().top_score(), Some(700));
    }

    #[test]
    fn test_scoreless_run_keeps_board_empty() {
        let mut store = Store::in_memory();
        let outcome = record_arcade_run(&mut store, 0, "", 1);
        assert!(!outcome.new_record);
        assert_eq!(outcome.rank, None);
        assert!(store.arcade_scores().is_empty());
    }
}
